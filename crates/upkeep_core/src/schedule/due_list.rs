//! Due-set selection, ordering and presentation grouping.
//!
//! # Responsibility
//! - Decide which tasks are actionable on a given day.
//! - Produce the display ordering and optional presentation buckets.
//!
//! # Invariants
//! - An unexpired snooze suppresses due status even for an overdue
//!   schedule; an expired snooze forces it even without one.
//! - Grouping reclassifies an already-selected set; it never changes
//!   membership, order inside a bucket, or any date.
//! - Ordering is total and deterministic: effective due date descending,
//!   then name, then id.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::model::item::{Item, ItemId};
use crate::model::task::Task;
use crate::schedule::recurrence::effective_due_date;

/// Bucket label for tasks whose item has no usable area, and for tasks
/// whose item cannot be resolved at all.
pub const DEFAULT_GROUP_LABEL: &str = "General";

/// Returns whether a task belongs in the due set for `today`.
///
/// A snoozed task is judged by its snooze floor alone: expired floor means
/// due, future floor means hidden, whatever the schedule says. Without a
/// snooze the schedule date decides, and a task with neither date is
/// never due.
pub fn is_due(task: &Task, today: NaiveDate) -> bool {
    match task.snoozed_until {
        Some(deferred_until) => deferred_until <= today,
        None => matches!(task.next_due_date, Some(due) if due <= today),
    }
}

/// Ordered due set together with the day it was evaluated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueList<'a> {
    /// The day the selection was evaluated against.
    pub today: NaiveDate,
    /// Due tasks in display order.
    pub tasks: Vec<&'a Task>,
}

/// Selects and orders the tasks due on `today`.
///
/// Ordering is effective due date descending with name then id as
/// tie-breaks, so the least-overdue work lists first. Callers wanting
/// most-overdue-first reverse the returned list.
pub fn select_due<'a, I>(tasks: I, today: NaiveDate) -> DueList<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut due: Vec<&Task> = tasks
        .into_iter()
        .filter(|task| is_due(task, today))
        .collect();
    due.sort_by(|a, b| {
        effective_due_date(b)
            .cmp(&effective_due_date(a))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    DueList { today, tasks: due }
}

/// Presentation bucketing modes for a due list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// One bucket per owning item, labelled with the item name.
    Item,
    /// One bucket per item area; blank areas pool under "General".
    Area,
    /// One bucket per recurrence interval label.
    Frequency,
}

/// One presentation bucket of a grouped due list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup<'a> {
    pub label: String,
    pub tasks: Vec<&'a Task>,
}

/// Returns the bucket label for one task under the given mode.
///
/// `item` is the resolved owning item, if any. Unresolvable items and
/// blank area labels both land in [`DEFAULT_GROUP_LABEL`] rather than
/// dropping the task.
pub fn bucket_label(task: &Task, item: Option<&Item>, mode: GroupBy) -> String {
    match mode {
        GroupBy::Item => item
            .map(|item| item.name.clone())
            .unwrap_or_else(|| DEFAULT_GROUP_LABEL.to_string()),
        GroupBy::Area => item
            .and_then(|item| item.area.as_deref())
            .map(str::trim)
            .filter(|area| !area.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_GROUP_LABEL.to_string()),
        GroupBy::Frequency => task.frequency.label().to_string(),
    }
}

/// Buckets an already-selected due list for presentation.
///
/// Buckets come back in label order; tasks keep their selection order
/// inside each bucket. Membership is exactly the input set.
pub fn group_tasks<'a>(
    selection: &DueList<'a>,
    items: &[Item],
    mode: GroupBy,
) -> Vec<TaskGroup<'a>> {
    let by_id: HashMap<ItemId, &Item> = items.iter().map(|item| (item.id, item)).collect();
    let mut buckets: BTreeMap<String, Vec<&Task>> = BTreeMap::new();
    for &task in &selection.tasks {
        let label = bucket_label(task, by_id.get(&task.item_id).copied(), mode);
        buckets.entry(label).or_default().push(task);
    }
    buckets
        .into_iter()
        .map(|(label, tasks)| TaskGroup { label, tasks })
        .collect()
}
