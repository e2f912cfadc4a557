//! Non-interactive command dispatch for the CLI.
//!
//! Output and the `delete --all` confirmation go through the supplied
//! writer and reader so the binary passes stdout/stdin and tests pass buffers.

use std::io::{BufRead, Write};

use chrono::{DateTime, Local, Utc};

use crate::{
    repository::{ListQuery, TaskRepository},
    task::{NewTask, Task, TaskUpdate},
    Cmd, Result,
};

/// Runs one command against `repo`. `Cmd::Gui` is not handled here; the
/// binary owns the terminal.
pub fn run(
    repo: &TaskRepository,
    cmd: Cmd,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<()> {
    let now = Utc::now();
    match cmd {
        Cmd::Add { title, due_date, description, id } => {
            let new = NewTask { title, description, due_date, id };
            let task = repo.add(new)?;
            writeln!(out, "Task {} successfully added:", task.id)?;
            writeln!(out, "{}", render_task(&task, now))?;
        }
        Cmd::List { sort_by, filter_by, reverse } => {
            let query = ListQuery { sort_by, filter_by, reverse };
            let mut tasks = repo.list_at(&query, now)?.peekable();
            if tasks.peek().is_none() {
                writeln!(out, "No tasks yet.")?;
            }
            for task in tasks {
                writeln!(out, "{}", render_task(&task, now))?;
            }
        }
        Cmd::Update { id, title, description, due_date, completed } => {
            let update = TaskUpdate { title, description, due_date };
            let mut task = if update.is_empty() { repo.get(id)? } else { repo.update(id, update)? };
            if completed {
                task = repo.complete(id)?;
            }
            writeln!(out, "Task successfully updated:")?;
            writeln!(out, "{}", render_task(&task, now))?;
        }
        // clap guarantees exactly one of --id / --all
        Cmd::Delete { id: Some(id), .. } => {
            repo.delete(id)?;
            writeln!(out, "Successfully deleted task {}", id)?;
        }
        Cmd::Delete { id: None, yes, .. } => {
            if yes || confirm(out, input, "are you sure? (y/n) ")? {
                let count = repo.delete_all()?;
                writeln!(out, "Successfully deleted all tasks ({}).", count)?;
            } else {
                writeln!(out, "Aborted.")?;
            }
        }
        Cmd::Gui => tracing::warn!("gui is launched by the binary, not the command runner"),
    }
    Ok(())
}

/// Exit code for an error that reached `main`: the task error's own code,
/// 1 for anything else.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<crate::Error>()
        .map_or(1, crate::Error::exit_code)
}

pub fn render_task(task: &Task, now: DateTime<Utc>) -> String {
    let state = if task.completed { "x" } else { " " };
    let mut line = format!("{:>3}. [{}] {}", task.id, state, task.title);
    if let Some(due) = task.due_date {
        let due = due.with_timezone(&Local).format("%Y %b %d %H:%M");
        line.push_str(&format!("  (due {})", due));
    }
    if task.is_overdue(now) {
        line.push_str("  OVERDUE");
    }
    if !task.description.is_empty() {
        line.push_str(&format!("\n       {}", task.description));
    }
    line
}

fn confirm(out: &mut impl Write, input: &mut impl BufRead, prompt: &str) -> Result<bool> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim() == "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn render_marks_overdue_pending_tasks_only() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut task = Task::new(7, "Pay rent").with_due_date(now - Duration::days(1));
        assert!(render_task(&task, now).contains("OVERDUE"));
        assert!(!render_task(&task, now - Duration::days(2)).contains("OVERDUE"));

        task.complete();
        let line = render_task(&task, now);
        assert!(line.starts_with("  7. [x] Pay rent"));
        assert!(!line.contains("OVERDUE"));
    }

    #[test]
    fn render_shows_description_on_second_line() {
        let task = Task::new(1, "Buy milk").with_description("2 litres");
        let now = Utc::now();
        assert_eq!(render_task(&task, now), "  1. [ ] Buy milk\n       2 litres");
    }

    #[test]
    fn exit_code_follows_the_wrapped_task_error() {
        let not_found = anyhow::Error::from(crate::Error::NotFound(9));
        assert_eq!(exit_code(&not_found), 3);
        let wrapped = anyhow::Error::from(crate::Error::validation("x")).context("while adding");
        assert_eq!(exit_code(&wrapped), 2);
        assert_eq!(exit_code(&anyhow::anyhow!("terminal gone")), 1);
    }
}
