//! Resolution of a `components` configuration into absolute paths

use crate::loader::{ConfigLoader, ConfigSource, FileConfigSource};
use crate::schema::{Config, RawConfig, ResolvedPaths, CONFIG_NAME};
use crate::validation::ConfigValidator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use tsconfig::{AliasResolver, PathMapping, PathMappingSource, PathsMatcher, TsConfigLoader};
use types::utils::{absolutize, parent_dir, resolve_path};
use types::{PathMappingError, Result, ScaffoldError};

/// Paths derived for `ui`, `lib` and `composables` when their aliases are not declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPaths {
    pub ui: PathBuf,
    pub lib: PathBuf,
    pub composables: PathBuf,
}

/// Derive the optional directories from the resolved `utils` and `components`.
///
/// - `ui`: `<components or cwd>/ui`
/// - `lib`: parent of `<utils or cwd>`
/// - `composables`: `<parent of components or cwd>/composables`
pub fn derive_fallback_paths(cwd: &Path, utils: Option<&Path>, components: Option<&Path>) -> FallbackPaths {
    let components = components.unwrap_or(cwd);
    let utils = utils.unwrap_or(cwd);
    FallbackPaths {
        ui: resolve_path(components, ["ui"]),
        lib: parent_dir(utils),
        composables: resolve_path(components, ["..", "composables"]),
    }
}

/// Loads `components` configuration and resolves its aliases
#[derive(Clone)]
pub struct ConfigResolver {
    config_source: Arc<dyn ConfigSource>,
    path_mappings: Arc<dyn PathMappingSource>,
    alias_resolver: Arc<dyn AliasResolver>,
}

impl ConfigResolver {
    /// Create a resolver backed by the filesystem
    pub fn new() -> Self {
        Self {
            config_source: Arc::new(FileConfigSource::new()),
            path_mappings: Arc::new(TsConfigLoader::new()),
            alias_resolver: Arc::new(PathsMatcher::new()),
        }
    }

    pub fn with_config_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.config_source = Arc::new(source);
        self
    }

    pub fn with_path_mapping_source(mut self, source: impl PathMappingSource + 'static) -> Self {
        self.path_mappings = Arc::new(source);
        self
    }

    pub fn with_alias_resolver(mut self, resolver: impl AliasResolver + 'static) -> Self {
        self.alias_resolver = Arc::new(resolver);
        self
    }

    /// Read and validate the raw configuration in `cwd`.
    ///
    /// `Ok(None)` means the directory is not configured.
    pub async fn get_raw_config(&self, cwd: &Path) -> Result<Option<RawConfig>> {
        let Some(value) = self.config_source.load_named_config(CONFIG_NAME, cwd).await? else {
            return Ok(None);
        };

        ConfigLoader::validate_value(value)
            .map(Some)
            .map_err(|e| e.in_dir(cwd))
    }

    /// Load the configuration in `cwd` and resolve all of its paths
    pub async fn get_config(&self, cwd: &Path) -> Result<Option<Config>> {
        let Some(mut raw) = self.get_raw_config(cwd).await? else {
            return Ok(None);
        };

        raw.apply_icon_library_default();

        self.resolve_config_paths(cwd, raw).await.map(Some)
    }

    /// Resolve the aliases of `raw` against the project's path mapping
    pub async fn resolve_config_paths(&self, cwd: &Path, raw: RawConfig) -> Result<Config> {
        let cwd = absolutize(cwd)?;
        let mapping_name = raw.path_mapping_file();
        let mapping = self
            .path_mappings
            .load(&cwd.join("package.json"), mapping_name)
            .await?
            .ok_or_else(|| PathMappingError::NotFound {
                name: mapping_name.to_string(),
            })?;
        debug!(path = %mapping.config_path.display(), "Resolving aliases");

        let aliases = &raw.aliases;
        let (utils, components, ui, lib, composables) = tokio::join!(
            self.alias_resolver.resolve_alias(&aliases.utils, &mapping),
            self.alias_resolver.resolve_alias(&aliases.components, &mapping),
            self.resolve_declared(aliases.ui.as_deref(), &mapping),
            self.resolve_declared(aliases.lib.as_deref(), &mapping),
            self.resolve_declared(aliases.composables.as_deref(), &mapping),
        );

        let fallback = || derive_fallback_paths(&cwd, utils.as_deref(), components.as_deref());
        let ui = match ui {
            Some((alias, resolved)) => require("ui", alias, resolved)?,
            None => fallback().ui,
        };
        let lib = match lib {
            Some((alias, resolved)) => require("lib", alias, resolved)?,
            None => fallback().lib,
        };
        let composables = match composables {
            Some((alias, resolved)) => require("composables", alias, resolved)?,
            None => fallback().composables,
        };

        let resolved_paths = ResolvedPaths {
            tailwind_config: resolve_path(&cwd, [&raw.tailwind.config]),
            tailwind_css: resolve_path(&cwd, [&raw.tailwind.css]),
            utils: require("utils", &aliases.utils, utils)?,
            components: require("components", &aliases.components, components)?,
            composables,
            lib,
            ui,
            cwd,
        };

        let config = Config { raw, resolved_paths };
        ConfigValidator::check_resolved(&config)?;
        Ok(config)
    }

    /// Resolve an optional alias; `None` when it is not declared
    async fn resolve_declared<'a>(
        &self,
        alias: Option<&'a str>,
        mapping: &PathMapping,
    ) -> Option<(&'a str, Option<PathBuf>)> {
        let alias = alias.filter(|alias| !alias.is_empty())?;
        Some((alias, self.alias_resolver.resolve_alias(alias, mapping).await))
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn require(field: &str, alias: &str, resolved: Option<PathBuf>) -> Result<PathBuf> {
    resolved.ok_or_else(|| ScaffoldError::InconsistentConfig {
        field: format!("resolvedPaths.{field}"),
        message: format!("alias '{alias}' does not resolve through the path mapping"),
    })
}

/// Read and validate the raw configuration in `cwd` from disk
pub async fn get_raw_config(cwd: &Path) -> Result<Option<RawConfig>> {
    ConfigResolver::new().get_raw_config(cwd).await
}

/// Load and fully resolve the configuration in `cwd` from disk
pub async fn get_config(cwd: &Path) -> Result<Option<Config>> {
    ConfigResolver::new().get_config(cwd).await
}

/// Resolve `raw` against the path mapping found from `cwd`
pub async fn resolve_config_paths(cwd: &Path, raw: RawConfig) -> Result<Config> {
    ConfigResolver::new().resolve_config_paths(cwd, raw).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct StaticConfig(Option<Value>);

    #[async_trait]
    impl ConfigSource for StaticConfig {
        async fn load_named_config(&self, name: &str, _dir: &Path) -> Result<Option<Value>> {
            assert_eq!(name, "components");
            Ok(self.0.clone())
        }
    }

    struct StaticMapping(Option<PathMapping>);

    #[async_trait]
    impl PathMappingSource for StaticMapping {
        async fn load(&self, search_from: &Path, _config_name: &str) -> Result<Option<PathMapping>> {
            assert!(search_from.ends_with("package.json"));
            Ok(self.0.clone())
        }
    }

    /// Counts lookups per alias, delegating to the real matcher
    #[derive(Default)]
    struct CountingResolver {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AliasResolver for CountingResolver {
        async fn resolve_alias(&self, alias: &str, mapping: &PathMapping) -> Option<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            PathsMatcher::new().resolve_alias(alias, mapping).await
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn scenario(style: &str) -> Value {
        json!({
            "style": style,
            "tailwind": {
                "config": "tailwind.config.js",
                "css": "app/globals.css",
                "baseColor": "slate",
                "cssVariables": true
            },
            "aliases": { "components": "@/components", "utils": "@/lib/utils" }
        })
    }

    fn proj_mapping() -> PathMapping {
        PathMapping::new("/proj/tsconfig.json").with_paths("/proj", [("@/*", vec!["./*"])])
    }

    fn resolver(config: Option<Value>, mapping: Option<PathMapping>) -> ConfigResolver {
        ConfigResolver::new()
            .with_config_source(StaticConfig(config))
            .with_path_mapping_source(StaticMapping(mapping))
    }

    #[tokio::test]
    async fn test_default_style_scenario() {
        let config = resolver(Some(scenario("default")), Some(proj_mapping()))
            .get_config(Path::new("/proj"))
            .await
            .unwrap()
            .unwrap();

        let paths = &config.resolved_paths;
        assert_eq!(paths.cwd, PathBuf::from("/proj"));
        assert_eq!(paths.components, PathBuf::from("/proj/components"));
        assert_eq!(paths.utils, PathBuf::from("/proj/lib/utils"));
        assert_eq!(paths.lib, PathBuf::from("/proj/lib"));
        assert_eq!(paths.ui, PathBuf::from("/proj/components/ui"));
        assert_eq!(paths.composables, PathBuf::from("/proj/composables"));
        assert_eq!(paths.tailwind_config, PathBuf::from("/proj/tailwind.config.js"));
        assert_eq!(paths.tailwind_css, PathBuf::from("/proj/app/globals.css"));
        assert_eq!(config.icon_library.as_deref(), Some("lucide"));
    }

    #[tokio::test]
    async fn test_new_york_style_defaults_to_radix() {
        let config = resolver(Some(scenario("new-york")), Some(proj_mapping()))
            .get_config(Path::new("/proj"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(config.icon_library.as_deref(), Some("radix"));
    }

    #[tokio::test]
    async fn test_explicit_icon_library_is_kept() {
        let mut value = scenario("new-york");
        value["iconLibrary"] = json!("lucide");
        let config = resolver(Some(value), Some(proj_mapping()))
            .get_config(Path::new("/proj"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(config.icon_library.as_deref(), Some("lucide"));
    }

    #[tokio::test]
    async fn test_absent_configuration() {
        let result = resolver(None, Some(proj_mapping()))
            .get_config(Path::new("/proj"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_unknown_field_is_invalid_configuration() {
        let mut value = scenario("default");
        value["foo"] = json!("bar");
        let err = resolver(Some(value), Some(proj_mapping()))
            .get_config(Path::new("/proj"))
            .await
            .unwrap_err();
        match err {
            ScaffoldError::InvalidConfiguration { cwd, message } => {
                assert_eq!(cwd, PathBuf::from("/proj"));
                assert!(message.contains("foo"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_null_optional_field_is_invalid_configuration() {
        for (pointer, field) in [("", "$schema"), ("", "iconLibrary"), ("/aliases", "ui")] {
            let mut value = scenario("default");
            value
                .pointer_mut(pointer)
                .and_then(|v| v.as_object_mut())
                .unwrap()
                .insert(field.to_string(), Value::Null);

            let err = resolver(Some(value), Some(proj_mapping()))
                .get_raw_config(Path::new("/proj"))
                .await
                .unwrap_err();
            assert!(matches!(err, ScaffoldError::InvalidConfiguration { .. }), "{field}: {err}");
        }
    }

    #[tokio::test]
    async fn test_missing_path_mapping() {
        let err = resolver(Some(scenario("default")), None)
            .get_config(Path::new("/proj"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingPathMapping { ref name } if name == "tsconfig.json"));

        let mut value = scenario("default");
        value["typescript"] = json!(false);
        let err = resolver(Some(value), None)
            .get_config(Path::new("/proj"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingPathMapping { ref name } if name == "jsconfig.json"));
    }

    #[tokio::test]
    async fn test_declared_aliases_are_resolved_directly() {
        let mut value = scenario("default");
        value["aliases"]["ui"] = json!("@/design/ui");
        value["aliases"]["lib"] = json!("@/shared");
        value["aliases"]["composables"] = json!("@/hooks");
        let counting = CountingResolver::default();
        let calls = counting.calls.clone();

        let config = resolver(Some(value), Some(proj_mapping()))
            .with_alias_resolver(counting)
            .get_config(Path::new("/proj"))
            .await
            .unwrap()
            .unwrap();

        let paths = &config.resolved_paths;
        assert_eq!(paths.ui, PathBuf::from("/proj/design/ui"));
        assert_eq!(paths.lib, PathBuf::from("/proj/shared"));
        assert_eq!(paths.composables, PathBuf::from("/proj/hooks"));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_unresolvable_base_alias_is_inconsistent() {
        let mut value = scenario("default");
        value["aliases"]["components"] = json!("~/components");
        let err = resolver(Some(value), Some(proj_mapping()))
            .get_config(Path::new("/proj"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::InconsistentConfig { ref field, .. } if field == "resolvedPaths.components"));
    }

    #[tokio::test]
    async fn test_unresolvable_declared_override_is_inconsistent() {
        let mut value = scenario("default");
        value["aliases"]["ui"] = json!("#ui");
        let err = resolver(Some(value), Some(proj_mapping()))
            .get_config(Path::new("/proj"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::InconsistentConfig { ref field, .. } if field == "resolvedPaths.ui"));
    }

    #[test]
    fn test_fallback_paths() {
        let cwd = Path::new("/proj");
        let derived = derive_fallback_paths(
            cwd,
            Some(Path::new("/proj/src/lib/utils")),
            Some(Path::new("/proj/src/components")),
        );
        assert_eq!(
            derived,
            FallbackPaths {
                ui: PathBuf::from("/proj/src/components/ui"),
                lib: PathBuf::from("/proj/src/lib"),
                composables: PathBuf::from("/proj/src/composables"),
            }
        );

        let unresolved = derive_fallback_paths(cwd, None, None);
        assert_eq!(unresolved.ui, PathBuf::from("/proj/ui"));
        assert_eq!(unresolved.lib, PathBuf::from("/"));
        assert_eq!(unresolved.composables, PathBuf::from("/composables"));
    }

    #[tokio::test]
    async fn test_resolves_from_disk() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::write(
            dir.path().join("tsconfig.json"),
            r#"{
  "compilerOptions": {
    // vite template
    "paths": { "@/*": ["./src/*"] },
  }
}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("components.json"), scenario("default").to_string()).unwrap();

        let config = get_config(dir.path()).await.unwrap().unwrap();
        let root = absolutize(dir.path()).unwrap();
        assert_eq!(config.resolved_paths.components, root.join("src/components"));
        assert_eq!(config.resolved_paths.ui, root.join("src/components/ui"));
        assert_eq!(config.resolved_paths.lib, root.join("src/lib"));
        assert_eq!(config.resolved_paths.composables, root.join("src/composables"));

        let raw = get_raw_config(dir.path()).await.unwrap().unwrap();
        assert_eq!(raw.icon_library, None);
        let resolved = resolve_config_paths(dir.path(), raw).await.unwrap();
        assert_eq!(resolved.icon_library, None);
    }

    #[tokio::test]
    async fn test_empty_file_on_disk_is_absent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("components.json"), "{}").unwrap();
        assert!(get_config(dir.path()).await.unwrap().is_none());
    }
}
