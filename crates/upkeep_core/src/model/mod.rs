//! Domain model for locations, items and recurring maintenance tasks.
//!
//! # Responsibility
//! - Define the canonical records consumed by the scheduling engine.
//! - Keep field-level validation next to the data it guards.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Ownership runs location -> item -> task; a task never exists without
//!   an owning item.
//!
//! # See also
//! - `crate::schedule` for everything derived from these records.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod item;
pub mod location;
pub mod task;

/// Inclusive bounds for `Item::purchase_year`.
pub const PURCHASE_YEAR_RANGE: std::ops::RangeInclusive<u32> = 1900..=2100;

/// Field-level validation failure shared by all model records.
///
/// Write paths must refuse to persist a record whose `validate()` returns
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Record id is the nil UUID.
    NilId(&'static str),
    /// Name is empty or whitespace-only. Carries the record kind.
    BlankName(&'static str),
    /// Item quantity below the minimum of 1.
    ZeroQuantity,
    /// Purchase year outside [`PURCHASE_YEAR_RANGE`].
    PurchaseYearOutOfRange(u32),
    /// Task description is present but lacks a required section header.
    MissingDescriptionHeader(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId(kind) => write!(f, "{kind} id must not be the nil uuid"),
            Self::BlankName(kind) => write!(f, "{kind} name must not be blank"),
            Self::ZeroQuantity => write!(f, "item quantity must be at least 1"),
            Self::PurchaseYearOutOfRange(year) => {
                write!(f, "purchase year {year} is outside the supported range 1900-2100")
            }
            Self::MissingDescriptionHeader(header) => {
                write!(f, "task description must contain the section header `{header}`")
            }
        }
    }
}

impl Error for ValidationError {}
