//! Task use-case service.
//!
//! # Responsibility
//! - Orchestrate task creation and the complete/snooze state transitions.
//! - Derive plain-text description previews for list surfaces.
//!
//! # Invariants
//! - `create_task` seeds an absent schedule before first persistence.
//! - Complete/snooze load the task, apply the engine transition and write
//!   the whole field set back through one repository update.
//! - Every transition takes `today` from the caller; this service never
//!   reads the wall clock.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use crate::schedule::recurrence::{complete, ensure_schedule, snooze};

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(task_id) => write!(f, "task not found: {task_id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(task_id) => Self::TaskNotFound(task_id),
            other => Self::Repo(other),
        }
    }
}

/// Confirmation payload handed back after completing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReceipt {
    pub task_id: TaskId,
    /// Task name for caller-side confirmation messages.
    pub name: String,
    /// The day the completion was recorded for.
    pub last_performed: NaiveDate,
    /// The recomputed schedule date.
    pub next_due_date: NaiveDate,
}

/// Confirmation payload handed back after snoozing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnoozeReceipt {
    pub task_id: TaskId,
    /// Task name for caller-side confirmation messages.
    pub name: String,
    /// The new deferral floor.
    pub snoozed_until: NaiveDate,
    /// Snoozes accumulated since the last completion, this one included.
    pub snooze_count: u32,
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one task, seeding `next_due_date` when the caller left it
    /// absent.
    ///
    /// # Contract
    /// - A task without completion history is scheduled for `today`.
    /// - A caller-provided `next_due_date` is persisted untouched.
    /// - Returns the persisted record read back from storage.
    pub fn create_task(&self, task: Task, today: NaiveDate) -> Result<Task, TaskServiceError> {
        let mut task = task;
        ensure_schedule(&mut task, today);

        let task_id = self.repo.create_task(&task)?;
        self.repo
            .get_task(task_id)?
            .ok_or(TaskServiceError::InconsistentState(
                "created task not found in read-back",
            ))
    }

    /// Records a completion on `today` and persists the transition.
    ///
    /// # Contract
    /// - `last_performed` becomes `today`; `next_due_date` is recomputed.
    /// - Any snooze overlay is dissolved.
    /// - Returns a receipt naming the task and its new schedule date.
    pub fn complete_task(
        &self,
        task_id: TaskId,
        today: NaiveDate,
    ) -> Result<CompletionReceipt, TaskServiceError> {
        let mut task = self
            .repo
            .get_task(task_id)?
            .ok_or(TaskServiceError::TaskNotFound(task_id))?;

        let next_due_date = complete(&mut task, today);
        self.repo.update_task(&task)?;

        Ok(CompletionReceipt {
            task_id: task.id,
            name: task.name,
            last_performed: today,
            next_due_date,
        })
    }

    /// Defers a task by the fixed snooze interval and persists the
    /// transition.
    ///
    /// # Contract
    /// - Works on any task, scheduled or not, due or not.
    /// - `next_due_date` and `last_performed` are left untouched.
    /// - Returns a receipt carrying the new floor and snooze count.
    pub fn snooze_task(
        &self,
        task_id: TaskId,
        today: NaiveDate,
    ) -> Result<SnoozeReceipt, TaskServiceError> {
        let mut task = self
            .repo
            .get_task(task_id)?
            .ok_or(TaskServiceError::TaskNotFound(task_id))?;

        let snoozed_until = snooze(&mut task, today);
        self.repo.update_task(&task)?;

        Ok(SnoozeReceipt {
            task_id: task.id,
            name: task.name,
            snoozed_until,
            snooze_count: task.snooze_count,
        })
    }

    /// Updates an existing task by stable ID.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_task(&self, task: &Task) -> RepoResult<()> {
        self.repo.update_task(task)
    }

    /// Gets one task by stable ID.
    pub fn get_task(&self, task_id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(task_id)
    }

    /// Lists tasks using the item/location filters.
    pub fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks(query)
    }

    /// Hard-deletes one task by stable ID.
    pub fn delete_task(&self, task_id: TaskId) -> RepoResult<()> {
        self.repo.delete_task(task_id)
    }
}

/// Derives a plain-text summary from a markdown task description.
///
/// Rules:
/// - Images dropped, links reduced to their text.
/// - Markdown symbols removed, whitespace normalized.
/// - First 100 chars retained; `None` when nothing readable remains.
pub fn derive_description_preview(description: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(description, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(100).collect())
    }
}
