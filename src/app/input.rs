use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use crate::app::{App, InputMode, InsertField};

/// Returns `false` when the user asked to quit.
pub fn handle_event(app: &mut App, ev: Event) -> bool {
    match ev {
        Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => match app.input_mode {
            InputMode::Normal => handle_normal_mode(app, code),
            InputMode::Insert => handle_insert_mode(app, code),
        },
        _ => true,
    }
}

fn handle_normal_mode(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,

        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),

        KeyCode::Char('a') => app.begin_insert(),
        KeyCode::Enter | KeyCode::Char('c') => app.complete_selected(),
        KeyCode::Char('d') => app.delete_selected(),

        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('r') => app.toggle_reverse(),

        _ => {}
    }
    true
}

fn handle_insert_mode(app: &mut App, code: KeyCode) -> bool {
    match (app.insert_field, code) {
        (_, KeyCode::Esc) => app.cancel_insert(),
        (_, KeyCode::Enter) => app.submit_draft(),
        (field, KeyCode::Tab) => app.insert_field = field.next(),

        (InsertField::Title, KeyCode::Backspace) => { app.draft_title.pop(); }
        (InsertField::Description, KeyCode::Backspace) => { app.draft_description.pop(); }
        (InsertField::DueDate, KeyCode::Backspace) => { app.draft_due.pop(); }

        (InsertField::Title, KeyCode::Char(c)) => app.draft_title.push(c),
        (InsertField::Description, KeyCode::Char(c)) => app.draft_description.push(c),
        (InsertField::DueDate, KeyCode::Char(c)) => app.draft_due.push(c),

        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::TaskStore;
    use crate::repository::TaskRepository;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_a_task_and_quitting() {
        let temp = TempDir::new().unwrap();
        let repo = TaskRepository::new(TaskStore::new(temp.path().join("tasks.json")));
        let mut app = App::new(repo).unwrap();

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Buy milkx");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2 litres");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2030-01-01");
        assert!(press(&mut app, KeyCode::Enter));

        let task = app.repo.get(1).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "2 litres");
        assert!(task.due_date.is_some());

        // 'q' while typing is text, not quit
        press(&mut app, KeyCode::Char('a'));
        assert!(press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!press(&mut app, KeyCode::Char('q')));
    }
}
