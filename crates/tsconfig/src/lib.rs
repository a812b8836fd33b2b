//! Path-mapping support
//!
//! This crate locates and reads `tsconfig.json`/`jsconfig.json` files and
//! resolves import aliases such as `@/components` through their
//! `compilerOptions.paths` and `baseUrl` settings.

pub mod loader;
pub mod mapping;
pub mod matcher;
pub mod traits;

pub use loader::TsConfigLoader;
pub use mapping::{PathMapping, PathsBlock};
pub use matcher::PathsMatcher;
pub use traits::*;
