//! Shared types and runtime helpers used by every crate in the workspace.

pub mod types;
pub mod utils;
