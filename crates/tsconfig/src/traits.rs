//! Path-mapping traits and interfaces

use crate::PathMapping;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use types::Result;

/// Trait for readers of `tsconfig.json`-style path-mapping documents
#[async_trait]
pub trait PathMappingSource: Send + Sync {
    /// Locate `config_name` starting next to `search_from` and parse it.
    ///
    /// Returns `Ok(None)` when no such file exists anywhere up to the root.
    async fn load(&self, search_from: &Path, config_name: &str) -> Result<Option<PathMapping>>;
}

/// Trait for alias-to-path resolution
#[async_trait]
pub trait AliasResolver: Send + Sync {
    /// Resolve an import alias to an absolute path, if the mapping covers it
    async fn resolve_alias(&self, alias: &str, mapping: &PathMapping) -> Option<PathBuf>;

    /// Get the name of the resolver
    fn name(&self) -> &str;
}
