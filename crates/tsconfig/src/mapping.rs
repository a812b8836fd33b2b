//! Parsed path-mapping document

use serde::Deserialize;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use types::utils::resolve_path;

/// The parts of a `tsconfig.json` that take part in alias resolution,
/// after `extends` has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    /// File the search found (not the files it extends)
    pub config_path: PathBuf,
    /// Absolute `compilerOptions.baseUrl`
    pub base_url: Option<PathBuf>,
    /// `compilerOptions.paths` together with the directory that declared it
    pub paths: Option<PathsBlock>,
}

/// A `compilerOptions.paths` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsBlock {
    /// Directory of the file declaring the table; the implicit base when
    /// no `baseUrl` is set
    pub declared_in: PathBuf,
    /// Pattern to substitutions, e.g. `@/*` to `["./src/*"]`
    pub entries: IndexMap<String, Vec<String>>,
}

impl PathMapping {
    /// Create an empty mapping for the given file
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            base_url: None,
            paths: None,
        }
    }

    /// Set an absolute `baseUrl`
    pub fn with_base_url(mut self, base_url: impl Into<PathBuf>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the `paths` table declared in `declared_in`
    pub fn with_paths<I, P, S>(mut self, declared_in: impl Into<PathBuf>, entries: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<S>)>,
        P: Into<String>,
        S: Into<String>,
    {
        self.paths = Some(PathsBlock {
            declared_in: declared_in.into(),
            entries: entries
                .into_iter()
                .map(|(pattern, subs)| (pattern.into(), subs.into_iter().map(Into::into).collect()))
                .collect(),
        });
        self
    }

    /// Whether the mapping can resolve anything at all
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.paths.is_none()
    }

    /// Directory that `paths` substitutions are resolved against
    pub fn substitution_base(&self) -> Option<&Path> {
        self.base_url
            .as_deref()
            .or_else(|| self.paths.as_ref().map(|p| p.declared_in.as_path()))
    }

    pub(crate) fn from_options(config_path: PathBuf, options: ResolvedOptions) -> Self {
        Self {
            config_path,
            base_url: options.base_url,
            paths: options.paths,
        }
    }
}

/// Options contributed by one file of an `extends` chain
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedOptions {
    pub base_url: Option<PathBuf>,
    pub paths: Option<PathsBlock>,
}

impl ResolvedOptions {
    /// Apply `other` on top of `self`, as an extending file does
    pub fn overlay(&mut self, other: ResolvedOptions) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.paths.is_some() {
            self.paths = other.paths;
        }
    }
}

/// On-disk shape of a `tsconfig.json`; everything else is ignored
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTsConfig {
    #[serde(default)]
    pub extends: Option<Extends>,
    #[serde(default)]
    pub compiler_options: Option<RawCompilerOptions>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Extends::One(spec) => vec![spec],
            Extends::Many(specs) => specs,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCompilerOptions {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub paths: Option<IndexMap<String, Vec<String>>>,
}

impl RawCompilerOptions {
    /// Anchor the options at the directory of the file that declared them
    pub fn anchor(self, dir: &Path) -> ResolvedOptions {
        ResolvedOptions {
            base_url: self.base_url.map(|url| resolve_path(dir, [url])),
            paths: self.paths.map(|entries| PathsBlock {
                declared_in: dir.to_path_buf(),
                entries,
            }),
        }
    }
}
