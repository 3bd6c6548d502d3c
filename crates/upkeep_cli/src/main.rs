//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `upkeep_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("upkeep_core version={}", upkeep_core::core_version());
    println!(
        "upkeep_core schema_version={}",
        upkeep_core::db::migrations::latest_version()
    );
}
