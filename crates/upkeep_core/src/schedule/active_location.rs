//! Active-location fallback resolution.
//!
//! # Responsibility
//! - Pick the location a due-set evaluation is scoped to when the
//!   caller's explicit selection is missing or stale.
//!
//! # Invariants
//! - A selection not present among the candidates is ignored, never an
//!   error.
//! - The fallback order is deterministic: default flag first, then name,
//!   then id.

use crate::model::location::{Location, LocationId};

/// Resolves the location scope for due-set evaluation.
///
/// Preference order: the caller's `selected` id when it is among
/// `locations`, else the default-flagged location, else the first by
/// name. Returns `None` only for an empty candidate list.
pub fn resolve_active_location(
    selected: Option<LocationId>,
    locations: &[Location],
) -> Option<&Location> {
    if let Some(id) = selected {
        if let Some(location) = locations.iter().find(|location| location.id == id) {
            return Some(location);
        }
    }

    locations.iter().min_by(|a, b| {
        (!a.is_default)
            .cmp(&!b.is_default)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    })
}
