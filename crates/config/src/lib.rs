//! Project configuration for the scaffold CLI
//!
//! This crate loads and validates the `components` configuration file and
//! resolves its import aliases into absolute paths using the project's
//! `tsconfig.json`/`jsconfig.json`.

pub mod loader;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLoader, ConfigSource, FileConfigSource};
pub use resolver::{derive_fallback_paths, get_config, get_raw_config, resolve_config_paths, ConfigResolver, FallbackPaths};
pub use schema::*;
pub use validation::*;
