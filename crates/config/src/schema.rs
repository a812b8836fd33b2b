//! Configuration schema definitions

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

pub const DEFAULT_STYLE: &str = "default";
pub const DEFAULT_COMPONENTS: &str = "@/components";
pub const DEFAULT_UTILS: &str = "@/lib/utils";
pub const DEFAULT_TAILWIND_CSS: &str = "app/globals.css";
pub const DEFAULT_TAILWIND_CONFIG: &str = "tailwind.config.js";
pub const DEFAULT_TAILWIND_BASE_COLOR: &str = "slate";
pub const DEFAULT_TYPESCRIPT_CONFIG: &str = "./tsconfig.json";

/// Name of the configuration file, without extension
pub const CONFIG_NAME: &str = "components";

/// Style whose default icon library is radix
pub const NEW_YORK_STYLE: &str = "new-york";

/// Conventional Tailwind CSS entry points per framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailwindCssPath {
    Nuxt,
    Vite,
    Laravel,
    Astro,
}

impl TailwindCssPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            TailwindCssPath::Nuxt => "assets/css/tailwind.css",
            TailwindCssPath::Vite => "src/assets/index.css",
            TailwindCssPath::Laravel => "resources/css/app.css",
            TailwindCssPath::Astro => "src/styles/globals.css",
        }
    }
}

/// User-authored configuration, as stored in `components.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawConfig {
    /// JSON schema URL, for editor support
    #[serde(
        rename = "$schema",
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub schema: Option<String>,
    /// Component style name
    pub style: String,
    /// Whether the project uses TypeScript (`tsconfig.json` vs `jsconfig.json`)
    #[serde(default = "default_true")]
    pub typescript: bool,
    /// Tailwind configuration
    pub tailwind: TailwindConfig,
    /// Import aliases
    pub aliases: AliasesConfig,
    /// Icon library; filled in by `apply_icon_library_default` when absent
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub icon_library: Option<String>,
}

/// Tailwind configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TailwindConfig {
    /// Path of the Tailwind config file, relative to the project
    pub config: String,
    /// Path of the Tailwind CSS entry file, relative to the project
    pub css: String,
    /// Base color palette
    pub base_color: String,
    /// Whether theming uses CSS variables
    #[serde(default = "default_true")]
    pub css_variables: bool,
    /// Class prefix for utilities
    #[serde(default)]
    pub prefix: String,
}

/// Import aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasesConfig {
    pub components: String,
    pub utils: String,
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub composables: Option<String>,
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub ui: Option<String>,
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub lib: Option<String>,
}

/// Absolute paths derived from a `RawConfig`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ResolvedPaths {
    pub cwd: PathBuf,
    pub tailwind_config: PathBuf,
    pub tailwind_css: PathBuf,
    pub utils: PathBuf,
    pub components: PathBuf,
    pub composables: PathBuf,
    pub lib: PathBuf,
    pub ui: PathBuf,
}

impl ResolvedPaths {
    /// Field name and value pairs, in declaration order
    pub fn entries(&self) -> [(&'static str, &PathBuf); 8] {
        [
            ("cwd", &self.cwd),
            ("tailwindConfig", &self.tailwind_config),
            ("tailwindCss", &self.tailwind_css),
            ("utils", &self.utils),
            ("components", &self.components),
            ("composables", &self.composables),
            ("lib", &self.lib),
            ("ui", &self.ui),
        ]
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(flatten)]
    pub raw: RawConfig,
    pub resolved_paths: ResolvedPaths,
}

impl std::ops::Deref for Config {
    type Target = RawConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

impl RawConfig {
    /// Fill in the icon library when unset: radix for new-york, lucide otherwise
    pub fn apply_icon_library_default(&mut self) {
        if self.icon_library.as_deref().map_or(true, str::is_empty) {
            let library = if self.style == NEW_YORK_STYLE { "radix" } else { "lucide" };
            self.icon_library = Some(library.to_string());
        }
    }

    /// Name of the path-mapping file this project uses
    pub fn path_mapping_file(&self) -> &'static str {
        if self.typescript {
            "tsconfig.json"
        } else {
            "jsconfig.json"
        }
    }
}

fn default_true() -> bool {
    true
}

/// Optional string that may be left out but not set to `null`
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            schema: None,
            style: DEFAULT_STYLE.to_string(),
            typescript: default_true(),
            tailwind: TailwindConfig::default(),
            aliases: AliasesConfig::default(),
            icon_library: None,
        }
    }
}

impl Default for TailwindConfig {
    fn default() -> Self {
        Self {
            config: DEFAULT_TAILWIND_CONFIG.to_string(),
            css: DEFAULT_TAILWIND_CSS.to_string(),
            base_color: DEFAULT_TAILWIND_BASE_COLOR.to_string(),
            css_variables: default_true(),
            prefix: String::new(),
        }
    }
}

impl Default for AliasesConfig {
    fn default() -> Self {
        Self {
            components: DEFAULT_COMPONENTS.to_string(),
            utils: DEFAULT_UTILS.to_string(),
            composables: None,
            ui: None,
            lib: None,
        }
    }
}
