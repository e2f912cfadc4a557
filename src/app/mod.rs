pub mod ui;
pub mod input;

use crate::repository::{Filter, ListQuery, SortKey, TaskRepository};
use crate::task::{parse_due_date, NewTask, Task};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode { Normal, Insert }

// Focusable fields in Insert mode (Tab cycles through these)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertField { Title, Description, DueDate }

impl InsertField {
    pub fn next(self) -> Self {
        match self {
            InsertField::Title => InsertField::Description,
            InsertField::Description => InsertField::DueDate,
            InsertField::DueDate => InsertField::Title,
        }
    }
}

/// Central TUI state. `tasks` is the current view; every action goes
/// through the repository and then re-reads it.
pub struct App {
    pub repo: TaskRepository,
    pub tasks: Vec<Task>,
    pub selected: usize,
    pub query: ListQuery,
    pub input_mode: InputMode,

    // insert-mode drafts
    pub insert_field: InsertField,
    pub draft_title: String,
    pub draft_description: String,
    pub draft_due: String,

    pub status_line: String,
}

impl App {
    pub fn new(repo: TaskRepository) -> Result<Self> {
        let mut app = Self {
            repo,
            tasks: Vec::new(),
            selected: 0,
            query: ListQuery::default(),
            input_mode: InputMode::Normal,
            insert_field: InsertField::Title,
            draft_title: String::new(),
            draft_description: String::new(),
            draft_due: String::new(),
            status_line: String::new(),
        };
        app.refresh()?;
        Ok(app)
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.tasks = self.repo.list(&self.query)?.collect();
        self.clamp_selection();
        Ok(())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() { self.selected += 1; }
    }
    pub fn select_prev(&mut self) {
        if self.selected > 0 { self.selected -= 1; }
    }
    pub fn clamp_selection(&mut self) {
        let len = self.tasks.len();
        if len == 0 { self.selected = 0; }
        else if self.selected >= len { self.selected = len - 1; }
    }

    pub fn begin_insert(&mut self) {
        self.input_mode = InputMode::Insert;
        self.insert_field = InsertField::Title;
        self.draft_title.clear();
        self.draft_description.clear();
        self.draft_due.clear();
        self.status_line.clear();
    }

    pub fn cancel_insert(&mut self) {
        self.input_mode = InputMode::Normal;
        self.status_line = "Cancelled".into();
    }

    /// Adds the drafted task. On a bad title or date the form stays open.
    pub fn submit_draft(&mut self) {
        match self.add_from_draft() {
            Ok(task) => {
                self.input_mode = InputMode::Normal;
                self.status_line = format!("Added task {} ✓", task.id);
                if let Some(pos) = self.tasks.iter().position(|t| t.id == task.id) {
                    self.selected = pos;
                }
            }
            Err(e) => self.status_line = e.to_string(),
        }
    }

    fn add_from_draft(&mut self) -> Result<Task> {
        let mut new = NewTask::new(self.draft_title.trim());
        let description = self.draft_description.trim();
        if !description.is_empty() {
            new = new.with_description(description);
        }
        let due = self.draft_due.trim();
        if !due.is_empty() {
            new = new.with_due_date(parse_due_date(due)?);
        }
        let task = self.repo.add(new)?;
        self.refresh()?;
        Ok(task)
    }

    pub fn complete_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id) else { return };
        let result = self.repo.complete(id).and_then(|_| self.refresh());
        self.report(result, format!("Completed task {} ✓", id));
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id) else { return };
        let result = self.repo.delete(id).and_then(|_| self.refresh());
        self.report(result, format!("Deleted task {} ✓", id));
    }

    pub fn cycle_sort(&mut self) {
        let pos = SortKey::ALL.iter().position(|k| *k == self.query.sort_by).unwrap_or(0);
        self.query.sort_by = SortKey::ALL[(pos + 1) % SortKey::ALL.len()];
        let result = self.refresh();
        self.report(result, format!("Sort: {}", self.query.sort_by.label()));
    }

    pub fn cycle_filter(&mut self) {
        self.query.filter_by = match self.query.filter_by {
            None => Some(Filter::Pending),
            Some(Filter::Pending) => Some(Filter::Overdue),
            Some(Filter::Overdue) => Some(Filter::Completed),
            Some(Filter::Completed) => None,
        };
        let result = self.refresh();
        self.report(result, format!("Filter: {}", self.filter_label()));
    }

    pub fn toggle_reverse(&mut self) {
        self.query.reverse = !self.query.reverse;
        let result = self.refresh();
        self.report(result, format!("Reverse: {}", if self.query.reverse { "On" } else { "Off" }));
    }

    pub fn filter_label(&self) -> &'static str {
        self.query.filter_by.map_or("all", Filter::label)
    }

    fn report(&mut self, result: Result<()>, success: String) {
        self.status_line = match result {
            Ok(()) => success,
            Err(e) => {
                tracing::debug!(error = %e, "action failed");
                e.to_string()
            }
        };
    }

    // metrics
    pub fn percent_done(&self) -> f64 {
        let total = self.tasks.len() as f64;
        if total == 0.0 { 0.0 } else {
            let done = self.tasks.iter().filter(|t| t.completed).count() as f64;
            done / total
        }
    }
}
