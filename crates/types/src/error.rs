//! Error types for the scaffold workspace

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration loading and path resolution
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// The `components` configuration in `cwd` exists but could not be read or validated
    #[error("Invalid configuration found in {}: {message}", .cwd.display())]
    InvalidConfiguration { cwd: PathBuf, message: String },

    /// No `tsconfig.json`/`jsconfig.json` could be located
    #[error("Failed to find {name}")]
    MissingPathMapping { name: String },

    /// A path-mapping file was found but is unusable
    #[error("Invalid path mapping: {0}")]
    InvalidPathMapping(String),

    /// The resolved configuration does not have the expected shape
    #[error("Inconsistent resolved configuration: {field}: {message}")]
    InconsistentConfig { field: String, message: String },

    /// Filesystem errors outside of config parsing
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type alias for scaffold operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Configuration file specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// A configuration file on disk is not valid for its format
    #[error("Failed to parse {file}: {message}")]
    ParseFailed { file: String, message: String },

    /// Schema validation failure (unknown field, wrong type, missing field)
    #[error("Configuration validation error: {0}")]
    SchemaViolation(String),

    /// File already exists and overwriting was not requested
    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: String },
}

/// Path-mapping (`tsconfig.json`/`jsconfig.json`) specific errors
#[derive(Error, Debug)]
pub enum PathMappingError {
    /// No file with the requested name exists between the search root and `/`
    #[error("Failed to find {name}")]
    NotFound { name: String },

    /// The file is not valid JSON with comments
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// An `extends` target does not exist
    #[error("File '{specifier}' not found (extended from {from})")]
    ExtendsNotFound { specifier: String, from: String },

    /// An `extends` chain loops back on itself
    #[error("Circularity detected while resolving extends: {path}")]
    CircularExtends { path: String },

    /// The file could not be read
    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },
}

impl ConfigError {
    /// Attach the working directory this error was raised for
    pub fn in_dir(self, cwd: impl Into<PathBuf>) -> ScaffoldError {
        ScaffoldError::InvalidConfiguration {
            cwd: cwd.into(),
            message: self.to_string(),
        }
    }
}

impl From<PathMappingError> for ScaffoldError {
    fn from(err: PathMappingError) -> Self {
        match err {
            PathMappingError::NotFound { name } => ScaffoldError::MissingPathMapping { name },
            other => ScaffoldError::InvalidPathMapping(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ScaffoldError {
    fn from(err: std::io::Error) -> Self {
        ScaffoldError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message_names_directory() {
        let err = ConfigError::SchemaViolation("unknown field `foo`".to_string()).in_dir("/proj");
        let message = err.to_string();
        assert!(message.starts_with("Invalid configuration found in /proj: "));
        assert!(message.contains("unknown field `foo`"));
    }

    #[test]
    fn test_parse_failure_names_the_file() {
        let err = ConfigError::ParseFailed {
            file: "components.toml".to_string(),
            message: "expected `=`".to_string(),
        }
        .in_dir("/proj");
        assert_eq!(
            err.to_string(),
            "Invalid configuration found in /proj: Failed to parse components.toml: expected `=`"
        );
        assert!(!err.to_string().contains("components.json"));
    }

    #[test]
    fn test_path_mapping_conversion() {
        let err: ScaffoldError = PathMappingError::NotFound {
            name: "jsconfig.json".to_string(),
        }
        .into();
        assert!(matches!(err, ScaffoldError::MissingPathMapping { ref name } if name == "jsconfig.json"));
        assert_eq!(err.to_string(), "Failed to find jsconfig.json");

        let err: ScaffoldError = PathMappingError::CircularExtends {
            path: "/proj/tsconfig.json".to_string(),
        }
        .into();
        assert!(matches!(err, ScaffoldError::InvalidPathMapping(_)));
    }
}
