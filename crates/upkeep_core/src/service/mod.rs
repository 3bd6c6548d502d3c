//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep callers decoupled from storage and engine internals.
//!
//! # See also
//! - `crate::schedule` for the pure computations these services persist.

pub mod dashboard_service;
pub mod task_service;
