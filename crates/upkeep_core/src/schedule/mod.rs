//! Recurrence and due-state engine.
//!
//! # Responsibility
//! - Derive schedule dates from completion history and frequency.
//! - Overlay temporary snooze deferrals without touching the schedule.
//! - Select, order, group and aggregate due work for display surfaces.
//!
//! # Invariants
//! - Every computation takes `today` as an explicit parameter; nothing in
//!   this module reads the wall clock.
//! - Selection, grouping and statistics are read-only over the records
//!   they are given.
//!
//! # See also
//! - `crate::service` for the orchestration that persists the results.

pub mod active_location;
pub mod due_list;
pub mod recurrence;
pub mod stats;
