//! Shared pieces used by every crate in the workspace: tracing setup,
//! startup environment checks and small response types.

pub mod types;
pub mod utils;
pub mod env;
