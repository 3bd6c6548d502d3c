//! Task domain model and recurrence frequency.
//!
//! # Responsibility
//! - Define the recurring maintenance action attached to an item.
//! - Pin the closed set of supported recurrence intervals.
//!
//! # Invariants
//! - `frequency` is a positive whole number of days by construction.
//! - `snooze_count` only grows between completions; completing resets it.
//! - Scheduling fields are only rewritten through `crate::schedule`
//!   operations, never ad hoc.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::item::ItemId;
use crate::model::ValidationError;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Section headers every non-empty task description must contain.
///
/// Kept in sync with the capture templates shipped to clients.
pub const REQUIRED_DESCRIPTION_HEADERS: [&str; 2] = ["## Tools & Parts", "## Steps"];

/// Fixed recurrence interval, expressed as a whole number of days.
///
/// The set is closed on purpose: schedules stay comparable across items
/// and the stored day count always maps back to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    BiMonthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// Every supported interval, shortest first.
    pub const ALL: [Frequency; 7] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Monthly,
        Frequency::BiMonthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    /// Interval length in days. Months and years are fixed-length here;
    /// schedules drift relative to the calendar and that is accepted.
    pub fn days(self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::BiWeekly => 14,
            Self::Monthly => 30,
            Self::BiMonthly => 60,
            Self::Quarterly => 90,
            Self::Yearly => 365,
        }
    }

    /// Maps a persisted day count back onto the closed set.
    ///
    /// Returns `None` for any count that is not one of the seven supported
    /// intervals; read paths treat that as corrupt data.
    pub fn from_days(days: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|frequency| frequency.days() == days)
    }

    /// Display label used on list and grouping surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-weekly",
            Self::Monthly => "Monthly",
            Self::BiMonthly => "Bi-monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }
}

/// A recurring maintenance action with its schedule and snooze state.
///
/// `next_due_date` is the persisted schedule; `snoozed_until` is a
/// temporary overlay on top of it. The two never overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for linking and auditing.
    pub id: TaskId,
    /// Owning item; tasks are deleted together with it.
    pub item_id: ItemId,
    pub name: String,
    /// Markdown instructions; when present must carry the required headers.
    pub description: Option<String>,
    /// External how-to link (manual page, video).
    pub description_url: Option<String>,
    pub frequency: Frequency,
    /// Effort estimate in whole hours, consumed by the workload forecast.
    pub estimated_hours: Option<u32>,
    /// Day of the most recent completion; `None` until first completed.
    pub last_performed: Option<NaiveDate>,
    /// Derived schedule date; seeded on creation, recomputed on completion.
    pub next_due_date: Option<NaiveDate>,
    /// Temporary deferral floor; cleared by the next completion.
    pub snoozed_until: Option<NaiveDate>,
    /// Snoozes applied since the last completion.
    pub snooze_count: u32,
}

impl Task {
    /// Creates a task with a generated stable ID and an empty schedule.
    ///
    /// # Invariants
    /// - All date fields start as `None`; creation paths seed the schedule
    ///   explicitly before first persistence.
    /// - `snooze_count` starts at 0.
    pub fn new(item_id: ItemId, name: impl Into<String>, frequency: Frequency) -> Self {
        Self::with_id(Uuid::new_v4(), item_id, name, frequency)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: TaskId,
        item_id: ItemId,
        name: impl Into<String>,
        frequency: Frequency,
    ) -> Self {
        Self {
            id,
            item_id,
            name: name.into(),
            description: None,
            description_url: None,
            frequency,
            estimated_hours: None,
            last_performed: None,
            next_due_date: None,
            snoozed_until: None,
            snooze_count: 0,
        }
    }

    /// Checks field-level rules; write paths refuse records that fail.
    ///
    /// The header requirement applies only to a non-blank description, so
    /// tasks without written instructions stay valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId("task"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName("task"));
        }
        if let Some(description) = self.description.as_deref() {
            if !description.trim().is_empty() {
                for header in REQUIRED_DESCRIPTION_HEADERS {
                    if !description.contains(header) {
                        return Err(ValidationError::MissingDescriptionHeader(header));
                    }
                }
            }
        }
        Ok(())
    }
}
