//! Shared types for the scaffold workspace
//!
//! This crate contains the error taxonomy and the path helpers used by the
//! configuration and path-mapping crates.

pub mod error;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfigError, PathMappingError, Result, ScaffoldError};
