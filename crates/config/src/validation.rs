//! Configuration validation utilities

use crate::schema::{Config, NEW_YORK_STYLE};
use std::fmt;
use types::{Result, ScaffoldError};

/// Base colors shipped with the registry
pub const KNOWN_BASE_COLORS: [&str; 5] = ["slate", "gray", "zinc", "neutral", "stone"];

/// Icon libraries the registry ships components for
pub const KNOWN_ICON_LIBRARIES: [&str; 2] = ["lucide", "radix"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Check the shape of a resolved configuration.
    ///
    /// A failure here means resolution produced something it never should,
    /// not that the user's file is wrong.
    pub fn check_resolved(config: &Config) -> Result<()> {
        for (field, path) in config.resolved_paths.entries() {
            if path.as_os_str().is_empty() {
                return Err(ScaffoldError::InconsistentConfig {
                    field: format!("resolvedPaths.{field}"),
                    message: "path is empty".to_string(),
                });
            }
            if !path.is_absolute() {
                return Err(ScaffoldError::InconsistentConfig {
                    field: format!("resolvedPaths.{field}"),
                    message: format!("path is not absolute: {}", path.display()),
                });
            }
        }
        Ok(())
    }

    /// Produce advisory diagnostics for a resolved configuration
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_style(config, &mut report);
        Self::validate_tailwind(config, &mut report);
        Self::validate_aliases(config, &mut report);
        Self::validate_icon_library(config, &mut report);

        report
    }

    fn validate_style(config: &Config, report: &mut ValidationReport) {
        if config.style.trim().is_empty() {
            report.add_error("style", "Style cannot be empty");
        }

        if config.schema.is_none() {
            report.add_warning("$schema", "No $schema set, editors will not offer completion");
        }
    }

    fn validate_tailwind(config: &Config, report: &mut ValidationReport) {
        let tailwind = &config.tailwind;

        if !KNOWN_BASE_COLORS.contains(&tailwind.base_color.as_str()) {
            report.add_warning(
                "tailwind.baseColor",
                format!("Unknown base color '{}'. Known colors: {:?}", tailwind.base_color, KNOWN_BASE_COLORS),
            );
        }

        if tailwind.prefix.chars().any(char::is_whitespace) {
            report.add_error("tailwind.prefix", "Prefix cannot contain whitespace");
        }

        let paths = &config.resolved_paths;
        if !paths.tailwind_config.exists() {
            report.add_warning(
                "tailwind.config",
                format!("Tailwind config not found at {}", paths.tailwind_config.display()),
            );
        }
        if !paths.tailwind_css.exists() {
            report.add_warning(
                "tailwind.css",
                format!("Tailwind CSS file not found at {}", paths.tailwind_css.display()),
            );
        }
    }

    fn validate_aliases(config: &Config, report: &mut ValidationReport) {
        let aliases = &config.aliases;
        if aliases.components.trim().is_empty() {
            report.add_error("aliases.components", "Components alias cannot be empty");
        }
        if aliases.utils.trim().is_empty() {
            report.add_error("aliases.utils", "Utils alias cannot be empty");
        }
    }

    fn validate_icon_library(config: &Config, report: &mut ValidationReport) {
        let Some(library) = config.icon_library.as_deref() else {
            return;
        };

        if !KNOWN_ICON_LIBRARIES.contains(&library) {
            report.add_warning(
                "iconLibrary",
                format!("Unknown icon library '{library}'. Known libraries: {KNOWN_ICON_LIBRARIES:?}"),
            );
        } else if library == "radix" && config.style != NEW_YORK_STYLE {
            report.add_warning("iconLibrary", "Radix icons are normally paired with the new-york style");
        }
    }
}

/// How much an issue matters to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration should be fixed before components are added
    Error,
    /// Worth a look, but nothing breaks
    Warning,
}

/// One finding about a configuration field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted key in `components.json`, e.g. `tailwind.baseColor`
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Findings from `ConfigValidator::validate`, in the order they were raised
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &'static str, message: impl Into<String>) {
        self.push(Severity::Error, field, message.into());
    }

    pub fn add_warning(&mut self, field: &'static str, message: impl Into<String>) {
        self.push(Severity::Warning, field, message.into());
    }

    fn push(&mut self, severity: Severity, field: &'static str, message: String) {
        self.issues.push(ValidationIssue {
            severity,
            field,
            message,
        });
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.severity == severity)
    }

    /// True when nothing rises to an error
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn summary(&self) -> String {
        format!(
            "Validation: {} errors, {} warnings",
            self.errors().count(),
            self.warnings().count()
        )
    }
}
