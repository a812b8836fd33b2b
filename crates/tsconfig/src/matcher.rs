//! `compilerOptions.paths` matching

use crate::mapping::PathMapping;
use crate::traits::AliasResolver;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::trace;
use types::utils::{is_relative_specifier, resolve_path};

/// Resolves aliases with TypeScript's `paths` lookup rules
#[derive(Debug, Clone)]
pub struct PathsMatcher {
    name: String,
}

/// A `paths` key, either exact or with a single `*`
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern<'a> {
    Exact(&'a str),
    Star { prefix: &'a str, suffix: &'a str },
}

impl<'a> Pattern<'a> {
    fn parse(key: &'a str) -> Option<Self> {
        match key.matches('*').count() {
            0 => Some(Pattern::Exact(key)),
            1 => {
                let (prefix, suffix) = key.split_once('*')?;
                Some(Pattern::Star { prefix, suffix })
            }
            _ => None,
        }
    }

    /// Text captured by `*` when `specifier` matches a star pattern
    fn capture(&self, specifier: &'a str) -> Option<&'a str> {
        match self {
            Pattern::Star { prefix, suffix }
                if specifier.len() >= prefix.len() + suffix.len()
                    && specifier.starts_with(prefix)
                    && specifier.ends_with(suffix) =>
            {
                Some(&specifier[prefix.len()..specifier.len() - suffix.len()])
            }
            _ => None,
        }
    }
}

impl PathsMatcher {
    /// Create a new matcher
    pub fn new() -> Self {
        Self {
            name: "paths".to_string(),
        }
    }

    /// All candidate paths for `specifier`, in declaration order
    pub fn candidates(specifier: &str, mapping: &PathMapping) -> Vec<PathBuf> {
        if mapping.is_empty() || is_relative_specifier(specifier) {
            return Vec::new();
        }

        if let (Some(paths), Some(base)) = (&mapping.paths, mapping.substitution_base()) {
            let patterns: Vec<_> = paths
                .entries
                .iter()
                .filter_map(|(key, subs)| Pattern::parse(key).map(|p| (p, subs)))
                .collect();

            let exact = patterns
                .iter()
                .find(|(pattern, _)| *pattern == Pattern::Exact(specifier));
            if let Some((_, subs)) = exact {
                return subs
                    .iter()
                    .filter(|sub| !sub.contains('*'))
                    .map(|sub| resolve_path(base, [sub]))
                    .collect();
            }

            // Longest prefix wins; ties keep the pattern declared first in the file
            let mut best: Option<(usize, &str, &Vec<String>)> = None;
            for (pattern, subs) in &patterns {
                if let (Pattern::Star { prefix, .. }, Some(captured)) = (pattern, pattern.capture(specifier)) {
                    if best.map_or(true, |(len, _, _)| prefix.len() > len) {
                        best = Some((prefix.len(), captured, *subs));
                    }
                }
            }
            if let Some((_, captured, subs)) = best {
                return subs
                    .iter()
                    .filter(|sub| sub.matches('*').count() <= 1)
                    .map(|sub| resolve_path(base, [sub.replacen('*', captured, 1)]))
                    .collect();
            }
        }

        mapping
            .base_url
            .as_deref()
            .map(|base| vec![resolve_path(base, [specifier])])
            .unwrap_or_default()
    }
}

impl Default for PathsMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AliasResolver for PathsMatcher {
    async fn resolve_alias(&self, alias: &str, mapping: &PathMapping) -> Option<PathBuf> {
        let resolved = Self::candidates(alias, mapping).into_iter().next();
        trace!(alias, resolved = ?resolved, "Resolved alias");
        resolved
    }

    fn name(&self) -> &str {
        &self.name
    }
}
