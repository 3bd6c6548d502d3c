//! Core domain logic for Upkeep.
//! This crate is the single source of truth for scheduling invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{Item, ItemId, ItemStatus};
pub use model::location::{Location, LocationId};
pub use model::task::{Frequency, Task, TaskId, REQUIRED_DESCRIPTION_HEADERS};
pub use model::ValidationError;
pub use repo::item_repo::{ItemListQuery, ItemRepository, SqliteItemRepository};
pub use repo::location_repo::{LocationRepository, SqliteLocationRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use schedule::active_location::resolve_active_location;
pub use schedule::due_list::{
    group_tasks, is_due, select_due, DueList, GroupBy, TaskGroup, DEFAULT_GROUP_LABEL,
};
pub use schedule::recurrence::{
    calculate_next_due_date, complete, effective_due_date, ensure_schedule, snooze,
    SNOOZE_DEFERRAL_DAYS,
};
pub use schedule::stats::{location_summary, task_progress, AreaLoad, LocationSummary, TaskProgress};
pub use service::dashboard_service::{
    DashboardService, DueGroupView, DueListView, GroupedDueView, ItemOverview, MaintenanceOverview,
};
pub use service::task_service::{
    derive_description_preview, CompletionReceipt, SnoozeReceipt, TaskService, TaskServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
