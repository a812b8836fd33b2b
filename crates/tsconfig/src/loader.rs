//! Locating and reading `tsconfig.json`/`jsconfig.json` files

use crate::mapping::{PathMapping, RawTsConfig, ResolvedOptions};
use crate::traits::PathMappingSource;
use async_trait::async_trait;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tracing::{debug, trace};
use types::utils::{ancestors_of, resolve_path};
use types::{PathMappingError, Result};

type ChainFuture<'a> =
    Pin<Box<dyn Future<Output = std::result::Result<ResolvedOptions, PathMappingError>> + Send + 'a>>;

/// Reads path-mapping files from disk, following `extends`
#[derive(Debug, Clone, Default)]
pub struct TsConfigLoader;

impl TsConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self
    }

    /// Find `config_name` in the directory of `search_from` or any ancestor
    pub async fn find(search_from: &Path, config_name: &str) -> Option<PathBuf> {
        let start = search_from.parent().unwrap_or(search_from);
        for dir in ancestors_of(start) {
            let candidate = dir.join(config_name);
            if is_file(&candidate).await {
                return Some(candidate);
            }
        }
        None
    }

    /// Parse `path` and every file it extends into a single mapping
    pub async fn parse_file(path: &Path) -> std::result::Result<PathMapping, PathMappingError> {
        let mut stack = Vec::new();
        let options = Self::resolve_chain(path.to_path_buf(), &mut stack).await?;
        Ok(PathMapping::from_options(path.to_path_buf(), options))
    }

    fn resolve_chain(path: PathBuf, stack: &mut Vec<PathBuf>) -> ChainFuture<'_> {
        Box::pin(async move {
            if stack.contains(&path) {
                return Err(PathMappingError::CircularExtends {
                    path: path.display().to_string(),
                });
            }

            let raw = read_raw(&path).await?;
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            trace!(path = %path.display(), "Parsed path-mapping file");

            stack.push(path.clone());
            let mut options = ResolvedOptions::default();
            for specifier in raw.extends.map(|e| e.into_vec()).unwrap_or_default() {
                let target = locate_extends(&specifier, &dir).await.ok_or_else(|| {
                    PathMappingError::ExtendsNotFound {
                        specifier: specifier.clone(),
                        from: path.display().to_string(),
                    }
                })?;
                let inherited = Self::resolve_chain(target, stack).await?;
                options.overlay(inherited);
            }
            stack.pop();

            if let Some(compiler_options) = raw.compiler_options {
                options.overlay(compiler_options.anchor(&dir));
            }
            Ok(options)
        })
    }
}

#[async_trait]
impl PathMappingSource for TsConfigLoader {
    async fn load(&self, search_from: &Path, config_name: &str) -> Result<Option<PathMapping>> {
        let Some(path) = Self::find(search_from, config_name).await else {
            debug!(config_name, search_from = %search_from.display(), "No path-mapping file found");
            return Ok(None);
        };
        debug!(path = %path.display(), "Using path-mapping file");
        Ok(Some(Self::parse_file(&path).await?))
    }
}

async fn read_raw(path: &Path) -> std::result::Result<RawTsConfig, PathMappingError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PathMappingError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    if text.trim().is_empty() {
        return Ok(RawTsConfig::default());
    }

    json5::from_str(&text).map_err(|e| PathMappingError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Resolve an `extends` specifier the way TypeScript does for the common cases:
/// relative or absolute files (with an implied `.json`), and packages under
/// `node_modules`.
async fn locate_extends(specifier: &str, from_dir: &Path) -> Option<PathBuf> {
    if specifier.starts_with('.') || Path::new(specifier).is_absolute() {
        return file_with_json_suffix(&resolve_path(from_dir, [specifier])).await;
    }

    for dir in ancestors_of(from_dir) {
        let base = dir.join("node_modules").join(specifier);
        if let Some(found) = file_with_json_suffix(&base).await {
            return Some(found);
        }
        let nested = base.join("tsconfig.json");
        if is_file(&nested).await {
            return Some(nested);
        }
    }
    None
}

async fn file_with_json_suffix(candidate: &Path) -> Option<PathBuf> {
    if is_file(candidate).await {
        return Some(candidate.to_path_buf());
    }
    if candidate.extension().map_or(true, |ext| ext != "json") {
        let mut with_suffix = candidate.as_os_str().to_owned();
        with_suffix.push(".json");
        let with_suffix = PathBuf::from(with_suffix);
        if is_file(&with_suffix).await {
            return Some(with_suffix);
        }
    }
    None
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
