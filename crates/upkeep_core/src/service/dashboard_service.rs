//! Dashboard and due-list assembly service.
//!
//! # Responsibility
//! - Load one location's items and tasks and run the pure engine over
//!   them for a caller-supplied day.
//! - Shape borrowed engine output into owned view records.
//!
//! # Invariants
//! - All scheduling decisions are delegated to `crate::schedule`; this
//!   service only fetches and reshapes.
//! - `today` always comes from the caller, never from the wall clock.

use chrono::NaiveDate;

use crate::model::item::Item;
use crate::model::location::LocationId;
use crate::model::task::Task;
use crate::repo::item_repo::{ItemListQuery, ItemRepository};
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::repo::RepoResult;
use crate::schedule::due_list::{group_tasks, select_due, GroupBy};
use crate::schedule::stats::{location_summary, task_progress, LocationSummary, TaskProgress};

/// Ordered due worklist for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueListView {
    /// The day the selection was evaluated against.
    pub today: NaiveDate,
    /// Due tasks, effective due date descending, name ascending.
    pub tasks: Vec<Task>,
}

/// One labelled bucket of a grouped due worklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueGroupView {
    pub label: String,
    pub tasks: Vec<Task>,
}

/// Due worklist bucketed for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedDueView {
    pub today: NaiveDate,
    /// Buckets in label order; tasks keep selection order inside each.
    pub groups: Vec<DueGroupView>,
}

/// Per-item slice of a maintenance overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOverview {
    pub item: Item,
    pub progress: TaskProgress,
}

/// Location-wide maintenance overview with per-item progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceOverview {
    pub today: NaiveDate,
    /// Progress over every task in the location.
    pub location_progress: TaskProgress,
    /// Items in name order with their own progress counters.
    pub items: Vec<ItemOverview>,
}

/// Read-side service assembling dashboard and due-list views.
pub struct DashboardService<I: ItemRepository, T: TaskRepository> {
    items: I,
    tasks: T,
}

impl<I: ItemRepository, T: TaskRepository> DashboardService<I, T> {
    /// Creates a service using the provided repository implementations.
    pub fn new(items: I, tasks: T) -> Self {
        Self { items, tasks }
    }

    /// Ordered due list for one location on `today`.
    pub fn due_list(&self, location: LocationId, today: NaiveDate) -> RepoResult<DueListView> {
        let tasks = self.location_tasks(location)?;
        let selection = select_due(&tasks, today);
        Ok(DueListView {
            today,
            tasks: selection.tasks.into_iter().cloned().collect(),
        })
    }

    /// Due list bucketed under the given grouping mode.
    pub fn grouped_due_list(
        &self,
        location: LocationId,
        today: NaiveDate,
        mode: GroupBy,
    ) -> RepoResult<GroupedDueView> {
        let items = self.location_items(location)?;
        let tasks = self.location_tasks(location)?;
        let selection = select_due(&tasks, today);
        let groups = group_tasks(&selection, &items, mode)
            .into_iter()
            .map(|group| DueGroupView {
                label: group.label,
                tasks: group.tasks.into_iter().cloned().collect(),
            })
            .collect();
        Ok(GroupedDueView { today, groups })
    }

    /// Aggregated dashboard figures for one location.
    pub fn location_dashboard(
        &self,
        location: LocationId,
        today: NaiveDate,
    ) -> RepoResult<LocationSummary> {
        let items = self.location_items(location)?;
        let tasks = self.location_tasks(location)?;
        Ok(location_summary(&tasks, &items, today))
    }

    /// Maintenance overview: location-wide progress plus one entry per
    /// item with its own counters.
    pub fn maintenance_overview(
        &self,
        location: LocationId,
        today: NaiveDate,
    ) -> RepoResult<MaintenanceOverview> {
        let items = self.location_items(location)?;
        let tasks = self.location_tasks(location)?;

        let location_progress = task_progress(&tasks, today);
        let items = items
            .into_iter()
            .map(|item| {
                let own: Vec<Task> = tasks
                    .iter()
                    .filter(|task| task.item_id == item.id)
                    .cloned()
                    .collect();
                ItemOverview {
                    progress: task_progress(&own, today),
                    item,
                }
            })
            .collect();

        Ok(MaintenanceOverview {
            today,
            location_progress,
            items,
        })
    }

    fn location_items(&self, location: LocationId) -> RepoResult<Vec<Item>> {
        self.items.list_items(&ItemListQuery {
            location: Some(location),
            status: None,
        })
    }

    fn location_tasks(&self, location: LocationId) -> RepoResult<Vec<Task>> {
        self.tasks.list_tasks(&TaskListQuery {
            item: None,
            location: Some(location),
        })
    }
}
