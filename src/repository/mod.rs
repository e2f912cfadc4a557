//! Task lifecycle operations on top of the store.
//!
//! Every call is a full load-modify-save round trip against the file, so
//! a process always reads its own writes but gets no isolation from other
//! processes using the same file.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::{
    persistence::TaskStore,
    task::{validate_title, NewTask, Task, TaskUpdate},
    Error, Result,
};

/// Ordering for `list`. Ties always fall back to id ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    Id,
    #[value(name = "due_date", alias = "due-date")]
    DueDate,
    Title,
    #[value(name = "created_at", alias = "created-at")]
    CreatedAt,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Id, SortKey::DueDate, SortKey::Title, SortKey::CreatedAt];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::DueDate => "due date",
            SortKey::Title => "title",
            SortKey::CreatedAt => "created",
        }
    }

    fn compare(self, a: &Task, b: &Task) -> Ordering {
        let primary = match self {
            SortKey::Id => Ordering::Equal,
            // Undated tasks go after every dated one.
            SortKey::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        primary.then(a.id.cmp(&b.id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    Completed,
    Pending,
    /// Pending and past the due date
    Overdue,
}

impl Filter {
    pub fn label(self) -> &'static str {
        match self {
            Filter::Completed => "completed",
            Filter::Pending => "pending",
            Filter::Overdue => "overdue",
        }
    }

    pub fn matches(self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            Filter::Completed => task.completed,
            Filter::Pending => !task.completed,
            Filter::Overdue => task.is_overdue(now),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort_by: SortKey,
    pub filter_by: Option<Filter>,
    pub reverse: bool,
}

impl ListQuery {
    pub fn sorted_by(mut self, sort_by: SortKey) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn filtered_by(mut self, filter: Filter) -> Self {
        self.filter_by = Some(filter);
        self
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

#[derive(Debug, Clone)]
pub struct TaskRepository {
    store: TaskStore,
}

impl TaskRepository {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Creates a task with the next id (max + 1, or 1 when empty), or the
    /// requested one if it is positive and unused.
    ///
    /// Ids below the current maximum are never handed out again, but the
    /// file keeps no high-water mark: after deleting the highest-numbered
    /// task, the next add reuses its id.
    pub fn add(&self, new: NewTask) -> Result<Task> {
        validate_title(&new.title)?;
        let mut tasks = self.store.load()?;

        let id = match new.id {
            Some(0) => return Err(Error::validation("task id must be a positive integer")),
            Some(id) if tasks.iter().any(|t| t.id == id) => {
                return Err(Error::validation(format!("id {id} is already in use")))
            }
            Some(id) => id,
            None => tasks
                .iter()
                .map(|t| t.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| Error::validation("no free task id"))?,
        };

        let mut task = Task::new(id, new.title);
        task.description = new.description.unwrap_or_default();
        task.due_date = new.due_date;
        tasks.push(task.clone());
        self.store.save(&tasks)?;

        tracing::debug!(id, title = %task.title, "added task");
        Ok(task)
    }

    /// Tasks matching `query`, recomputed from the file on every call.
    pub fn list(&self, query: &ListQuery) -> Result<impl Iterator<Item = Task>> {
        self.list_at(query, Utc::now())
    }

    /// Like [`list`](Self::list) with an explicit clock for the overdue check.
    pub fn list_at(
        &self,
        query: &ListQuery,
        now: DateTime<Utc>,
    ) -> Result<impl Iterator<Item = Task>> {
        let mut tasks = self.store.load()?;
        let ListQuery {
            sort_by,
            filter_by,
            reverse,
        } = *query;

        tasks.sort_by(|a, b| sort_by.compare(a, b));
        if reverse {
            tasks.reverse();
        }

        Ok(tasks
            .into_iter()
            .filter(move |task| filter_by.map_or(true, |f| f.matches(task, now))))
    }

    pub fn get(&self, id: u64) -> Result<Task> {
        self.store
            .load()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// Applies the supplied fields only. Completed tasks can still be edited.
    pub fn update(&self, id: u64, update: TaskUpdate) -> Result<Task> {
        let mut tasks = self.store.load()?;
        let task = find_mut(&mut tasks, id)?;
        update.validate()?;
        update.apply_to(task);
        let task = task.clone();
        self.store.save(&tasks)?;

        tracing::debug!(id, "updated task");
        Ok(task)
    }

    /// Marks the task done. Completing an already completed task is a no-op.
    pub fn complete(&self, id: u64) -> Result<Task> {
        let mut tasks = self.store.load()?;
        let task = find_mut(&mut tasks, id)?;
        if !task.complete() {
            tracing::debug!(id, "task already completed");
            return Ok(task.clone());
        }
        let task = task.clone();
        self.store.save(&tasks)?;

        tracing::debug!(id, "completed task");
        Ok(task)
    }

    pub fn delete(&self, id: u64) -> Result<Task> {
        let mut tasks = self.store.load()?;
        let idx = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;
        let removed = tasks.remove(idx);
        self.store.save(&tasks)?;

        tracing::debug!(id, "deleted task");
        Ok(removed)
    }

    /// Removes every task, returning how many there were. Works on any
    /// prior state, including a corrupt file.
    pub fn delete_all(&self) -> Result<usize> {
        let count = match self.store.load() {
            Ok(tasks) => tasks.len(),
            Err(Error::CorruptStore { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "overwriting corrupt task file");
                0
            }
            Err(e) => return Err(e),
        };
        self.store.save(&[])?;

        tracing::debug!(count, "deleted all tasks");
        Ok(count)
    }
}

fn find_mut(tasks: &mut [Task], id: u64) -> Result<&mut Task> {
    tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(Error::NotFound(id))
}
