//! Item domain model.
//!
//! # Responsibility
//! - Define the tracked object (appliance, vehicle, fixture) that owns
//!   maintenance tasks.
//! - Provide the status and warranty helpers dashboard consumers rely on.
//!
//! # Invariants
//! - `quantity` is at least 1 for any persisted item.
//! - `status` is always one of the closed [`ItemStatus`] set.
//! - `location_id` is `None` only after the owning location was deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::location::LocationId;
use crate::model::{ValidationError, PURCHASE_YEAR_RANGE};

/// Stable identifier for an item.
pub type ItemId = Uuid;

/// Lifecycle state of a tracked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// In service; counted in asset totals and eligible for scheduling.
    Active,
    /// Kept for records but no longer in service.
    Retired,
    /// In service but awaiting repair.
    Broken,
}

impl ItemStatus {
    /// Human-readable label for display surfaces.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Retired => "Retired",
            Self::Broken => "Broken",
        }
    }

    /// CSS badge class consumed by dashboard renderers.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Active => "status-active",
            Self::Retired => "status-retired",
            Self::Broken => "status-broken",
        }
    }
}

/// A physical object tracked for maintenance and warranty purposes.
///
/// Purchase metadata is intentionally all-optional so quick captures stay
/// cheap; only `name` and `status` are required for a useful record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable global ID used for task ownership and auditing.
    pub id: ItemId,
    /// Owning location; cleared (not cascaded) when the location goes away.
    pub location_id: Option<LocationId>,
    pub name: String,
    pub status: ItemStatus,
    /// How many identical units this record stands for. Minimum 1.
    pub quantity: u32,
    /// Free-text area label ("Kitchen", "Garage"); `None` means unassigned.
    pub area: Option<String>,
    pub brand: Option<String>,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    /// Purchase price in whole currency units.
    pub purchase_value: Option<u32>,
    pub purchase_place: Option<String>,
    pub purchase_year: Option<u32>,
    pub warranty_expiration: Option<NaiveDate>,
    pub notes: Option<String>,
    pub manual_url: Option<String>,
    /// Manufacturer end-of-support date, distinct from warranty.
    pub end_of_service_date: Option<NaiveDate>,
}

impl Item {
    /// Creates an active item with a generated stable ID and quantity 1.
    pub fn new(location_id: LocationId, name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), location_id, name)
    }

    /// Creates an item with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: ItemId, location_id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            location_id: Some(location_id),
            name: name.into(),
            status: ItemStatus::Active,
            quantity: 1,
            area: None,
            brand: None,
            model_number: None,
            serial_number: None,
            purchase_value: None,
            purchase_place: None,
            purchase_year: None,
            warranty_expiration: None,
            notes: None,
            manual_url: None,
            end_of_service_date: None,
        }
    }

    /// Returns whether the warranty is still running on `today`.
    ///
    /// `false` when no expiration is recorded; expiration day itself still
    /// counts as covered.
    pub fn is_under_warranty(&self, today: NaiveDate) -> bool {
        matches!(self.warranty_expiration, Some(expiration) if expiration >= today)
    }

    /// Checks field-level rules; write paths refuse records that fail.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId("item"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName("item"));
        }
        if self.quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        if let Some(year) = self.purchase_year {
            if !PURCHASE_YEAR_RANGE.contains(&year) {
                return Err(ValidationError::PurchaseYearOutOfRange(year));
            }
        }
        Ok(())
    }
}
