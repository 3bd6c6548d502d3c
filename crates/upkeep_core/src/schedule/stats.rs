//! Dashboard aggregates over one location's items and tasks.
//!
//! # Responsibility
//! - Derive the action counters, workload forecast and asset figures that
//!   dashboard surfaces render.
//! - Provide the per-collection progress counters used by maintenance
//!   overviews.
//!
//! # Invariants
//! - All aggregation is pure over the supplied slices; nothing is cached
//!   or persisted.
//! - Window boundaries are inclusive on both ends.
//! - Area volume uses the same bucket labels as due-list grouping.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::item::{Item, ItemId, ItemStatus};
use crate::model::task::Task;
use crate::schedule::due_list::{bucket_label, GroupBy};

/// Days ahead the warranty watch looks.
const WARRANTY_WATCH_DAYS: i64 = 60;
/// Days ahead the weekly counter looks.
const WEEK_WINDOW_DAYS: i64 = 7;
/// Days ahead the monthly forecast looks.
const MONTH_WINDOW_DAYS: i64 = 30;
/// Maximum entries in the warranty-watch and next-up highlights.
const HIGHLIGHT_LIMIT: usize = 5;

/// Task volume for one area bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaLoad {
    pub area: String,
    pub task_count: usize,
}

/// Aggregated dashboard figures for one location.
///
/// Highlight lists carry at most [`HIGHLIGHT_LIMIT`] owned records so the
/// summary can outlive the slices it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSummary {
    /// Tasks past due and not shielded by a still-running snooze.
    pub overdue_tasks: usize,
    /// Tasks due within the next 7 days, overdue ones included.
    pub due_this_week: usize,
    /// Tasks scheduled inside the rolling 30-day window.
    pub due_this_month: usize,
    /// Sum of effort estimates over the 30-day window, in hours.
    pub maintenance_load_hours: u64,
    /// Area with the highest task volume; `None` without any tasks.
    pub most_demanding_area: Option<AreaLoad>,
    /// Items flagged broken.
    pub broken_items: usize,
    /// Items in active service.
    pub active_items: usize,
    /// Sum of purchase values across active items.
    pub total_asset_value: u64,
    /// Active items whose warranty lapses within 60 days, soonest first.
    pub warranty_watch: Vec<Item>,
    /// Next scheduled tasks, soonest first with unscheduled ones ahead.
    pub next_up: Vec<Task>,
}

/// Computes the dashboard summary for one location's records.
///
/// `tasks` and `items` are expected to already be scoped to the location;
/// the summary itself never filters by ownership.
pub fn location_summary(tasks: &[Task], items: &[Item], today: NaiveDate) -> LocationSummary {
    let week_end = today + Duration::days(WEEK_WINDOW_DAYS);
    let month_end = today + Duration::days(MONTH_WINDOW_DAYS);

    let overdue_tasks = tasks
        .iter()
        .filter(|task| {
            matches!(task.next_due_date, Some(due) if due < today)
                && task.snoozed_until.map_or(true, |floor| floor < today)
        })
        .count();

    let due_this_week = tasks
        .iter()
        .filter(|task| {
            matches!(task.next_due_date, Some(due) if due <= week_end)
                && task.snoozed_until.map_or(true, |floor| floor <= week_end)
        })
        .count();

    let month_window: Vec<&Task> = tasks
        .iter()
        .filter(|task| matches!(task.next_due_date, Some(due) if due >= today && due <= month_end))
        .collect();
    let due_this_month = month_window.len();
    let maintenance_load_hours = month_window
        .iter()
        .filter_map(|task| task.estimated_hours)
        .map(u64::from)
        .sum();

    let most_demanding_area = most_demanding_area(tasks, items);

    let broken_items = items
        .iter()
        .filter(|item| item.status == ItemStatus::Broken)
        .count();
    let active: Vec<&Item> = items
        .iter()
        .filter(|item| item.status == ItemStatus::Active)
        .collect();
    let active_items = active.len();
    let total_asset_value = active
        .iter()
        .filter_map(|item| item.purchase_value)
        .map(u64::from)
        .sum();

    let warranty_end = today + Duration::days(WARRANTY_WATCH_DAYS);
    let mut warranty_watch: Vec<&Item> = active
        .iter()
        .copied()
        .filter(|item| {
            matches!(item.warranty_expiration,
                Some(expiration) if expiration >= today && expiration <= warranty_end)
        })
        .collect();
    warranty_watch.sort_by(|a, b| {
        a.warranty_expiration
            .cmp(&b.warranty_expiration)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    warranty_watch.truncate(HIGHLIGHT_LIMIT);

    let mut next_up: Vec<&Task> = tasks.iter().collect();
    next_up.sort_by(|a, b| {
        a.next_due_date
            .cmp(&b.next_due_date)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    next_up.truncate(HIGHLIGHT_LIMIT);

    LocationSummary {
        overdue_tasks,
        due_this_week,
        due_this_month,
        maintenance_load_hours,
        most_demanding_area,
        broken_items,
        active_items,
        total_asset_value,
        warranty_watch: warranty_watch.into_iter().cloned().collect(),
        next_up: next_up.into_iter().cloned().collect(),
    }
}

/// Area with the most tasks, using due-list bucket labels.
///
/// Ties resolve to the lexicographically first label so the figure is
/// stable across runs.
fn most_demanding_area(tasks: &[Task], items: &[Item]) -> Option<AreaLoad> {
    let by_id: HashMap<ItemId, &Item> = items.iter().map(|item| (item.id, item)).collect();
    let mut volume: BTreeMap<String, usize> = BTreeMap::new();
    for task in tasks {
        let label = bucket_label(task, by_id.get(&task.item_id).copied(), GroupBy::Area);
        *volume.entry(label).or_default() += 1;
    }
    volume
        .into_iter()
        .max_by(|(area_a, count_a), (area_b, count_b)| {
            count_a.cmp(count_b).then_with(|| area_b.cmp(area_a))
        })
        .map(|(area, task_count)| AreaLoad { area, task_count })
}

/// Progress counters for one collection of tasks.
///
/// Computed per item or per location by maintenance overviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProgress {
    pub total: usize,
    /// Tasks with a schedule date on or before today.
    pub due: usize,
    /// Tasks completed since the first day of today's month.
    pub completed_this_month: usize,
}

/// Counts totals, due work and this month's completions for `tasks`.
pub fn task_progress(tasks: &[Task], today: NaiveDate) -> TaskProgress {
    let month_start = today.with_day(1).unwrap_or(today);
    let total = tasks.len();
    let due = tasks
        .iter()
        .filter(|task| matches!(task.next_due_date, Some(due) if due <= today))
        .count();
    let completed_this_month = tasks
        .iter()
        .filter(|task| {
            matches!(task.last_performed,
                Some(performed) if performed >= month_start && performed <= today)
        })
        .count();
    TaskProgress {
        total,
        due,
        completed_this_month,
    }
}
