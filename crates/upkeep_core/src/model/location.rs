//! Location domain model.
//!
//! # Responsibility
//! - Define the physical place (home, cabin, office) that groups items.
//! - Carry the default flag consumed by active-location resolution.
//!
//! # Invariants
//! - `id` is stable and never reused for another location.
//! - At most one location should carry `is_default`; resolution tolerates
//!   more by falling back to name order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ValidationError;

/// Stable identifier for a location.
pub type LocationId = Uuid;

/// A physical place that owns items and, through them, tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Stable global ID used for scoping queries and auditing.
    pub id: LocationId,
    pub name: String,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    /// ISO 3166-1 alpha-2 code when set; not validated here.
    pub country_code: Option<String>,
    /// Marks the fallback scope when a caller has no explicit selection.
    pub is_default: bool,
}

impl Location {
    /// Creates a location with a generated stable ID.
    ///
    /// Optional address fields start as `None` and `is_default` as `false`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a location with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: None,
            zip_code: None,
            city: None,
            country_code: None,
            is_default: false,
        }
    }

    /// Checks field-level rules; write paths refuse records that fail.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId("location"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName("location"));
        }
        Ok(())
    }
}
