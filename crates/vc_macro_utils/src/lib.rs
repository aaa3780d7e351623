//! Shared helpers for the proc-macro crates of the workspace.

// -----------------------------------------------------------------------------
// Modules

mod manifest;

// -----------------------------------------------------------------------------
// Exports

pub use manifest::{Manifest, UMBRELLA_CRATE};
