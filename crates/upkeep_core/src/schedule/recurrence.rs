//! Due-date calculation and the snooze overlay.
//!
//! # Responsibility
//! - Compute the next scheduled occurrence for a task.
//! - Apply the complete/snooze state transitions as whole field sets.
//!
//! # Invariants
//! - A never-performed task is due immediately: the calculator falls back
//!   to `today`, never to an absent date.
//! - Snoozing defers by exactly [`SNOOZE_DEFERRAL_DAYS`] regardless of
//!   frequency or how overdue the task is.
//! - Completing dissolves the snooze overlay entirely.

use chrono::{Duration, NaiveDate};

use crate::model::task::{Frequency, Task};

/// Fixed snooze deferral length in days.
pub const SNOOZE_DEFERRAL_DAYS: i64 = 7;

/// Returns the next scheduled occurrence for a task.
///
/// `last_performed + frequency` when a completion exists, `today`
/// otherwise, so newly created tasks surface as actionable right away.
pub fn calculate_next_due_date(
    last_performed: Option<NaiveDate>,
    frequency: Frequency,
    today: NaiveDate,
) -> NaiveDate {
    match last_performed {
        Some(last) => last + Duration::days(frequency.days()),
        None => today,
    }
}

/// Seeds `next_due_date` when absent; returns whether the task changed.
///
/// Creation paths call this explicitly before first persistence. A task
/// that already carries a schedule is left untouched, whatever the date.
pub fn ensure_schedule(task: &mut Task, today: NaiveDate) -> bool {
    if task.next_due_date.is_some() {
        return false;
    }
    task.next_due_date = Some(calculate_next_due_date(
        task.last_performed,
        task.frequency,
        today,
    ));
    true
}

/// Marks a task complete on `today` and returns the recomputed schedule.
///
/// One logical update: `last_performed` becomes `today`, `next_due_date`
/// is recomputed from it, and the snooze overlay is cleared (`snoozed_until`
/// dropped, `snooze_count` reset to 0).
pub fn complete(task: &mut Task, today: NaiveDate) -> NaiveDate {
    let next_due = calculate_next_due_date(Some(today), task.frequency, today);
    task.last_performed = Some(today);
    task.next_due_date = Some(next_due);
    task.snoozed_until = None;
    task.snooze_count = 0;
    next_due
}

/// Defers a task by the fixed snooze interval and returns the new floor.
///
/// One logical update: `snoozed_until` lands on `today + 7` even when the
/// task has no schedule or is long overdue, and `snooze_count` grows by 1.
/// `last_performed` and `next_due_date` are left untouched.
pub fn snooze(task: &mut Task, today: NaiveDate) -> NaiveDate {
    let deferred_until = today + Duration::days(SNOOZE_DEFERRAL_DAYS);
    task.snoozed_until = Some(deferred_until);
    task.snooze_count += 1;
    deferred_until
}

/// Effective date used for ordering: the later of schedule and snooze floor.
///
/// Absence of one side never nulls the result; only a task carrying
/// neither date yields `None`.
pub fn effective_due_date(task: &Task) -> Option<NaiveDate> {
    match (task.next_due_date, task.snoozed_until) {
        (Some(due), Some(floor)) => Some(due.max(floor)),
        (Some(due), None) => Some(due),
        (None, Some(floor)) => Some(floor),
        (None, None) => None,
    }
}
