//! Error types for persistence and preset operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while saving, restoring or loading EQ settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// State blob was not valid JSON for this format
    #[error("invalid state blob: {0}")]
    State(#[from] serde_json::Error),

    /// State blob was written by a newer format version
    #[error("unsupported state version {found} (newest supported is {supported})")]
    UnsupportedVersion {
        /// Version found in the blob.
        found: u32,
        /// Newest version this build understands.
        supported: u32,
    },

    /// Preset not found
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Invalid parameter
    #[error("invalid parameter '{param}' = {value}: {reason}")]
    InvalidParameter {
        /// Host identifier of the parameter.
        param: String,
        /// Offending value.
        value: f32,
        /// Description of why the value is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(param: &str, value: f32, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            param: param.to_string(),
            value,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_display_and_source() {
        let err = ConfigError::read_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn write_file_factory_produces_correct_variant() {
        let err = ConfigError::write_file("/out/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::WriteFile { ref path, .. } if path == std::path::Path::new("/out/path"))
        );
    }

    #[test]
    fn create_dir_display() {
        let err = ConfigError::create_dir("/a/b", mock_io_err());
        assert!(err.to_string().contains("failed to create directory"));
    }

    #[test]
    fn preset_not_found_display() {
        let err = ConfigError::PresetNotFound("warm".to_string());
        assert_eq!(err.to_string(), "preset not found: warm");
    }

    #[test]
    fn invalid_parameter_display() {
        let err = ConfigError::invalid_parameter("Peak Gain", 30.0, "out of range [-24, 24]");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'Peak Gain' = 30: out of range [-24, 24]"
        );
    }

    #[test]
    fn unsupported_version_display() {
        let err = ConfigError::UnsupportedVersion {
            found: 9,
            supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "unsupported state version 9 (newest supported is 1)"
        );
    }

    #[test]
    fn json_errors_convert() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::State(_)));
        assert!(err.to_string().starts_with("invalid state blob"));
    }
}
