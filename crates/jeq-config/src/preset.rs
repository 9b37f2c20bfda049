//! Preset file format and operations.

use jeq_core::ParamStore;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::state::EqState;

/// A named set of EQ settings.
///
/// Presets are stored as TOML files. They can be loaded from files, created
/// programmatically, and saved to disk.
///
/// # TOML Format
///
/// ```toml
/// name = "Rumble Filter"
/// description = "Steep low cut below 60 Hz"
///
/// [settings]
/// "LowCut Freq" = 60.0
/// "LowCut Slope" = 3
/// ```
///
/// Parameters missing from `[settings]` take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values.
    #[serde(default)]
    pub settings: EqState,
}

impl Preset {
    /// Create a preset holding the default (flat) settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            settings: EqState::default(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the preset's settings.
    pub fn with_settings(mut self, settings: EqState) -> Self {
        self.settings = settings;
        self
    }

    /// Capture the current contents of a parameter store as a preset.
    pub fn capture(name: impl Into<String>, params: &ParamStore) -> Self {
        Self::new(name).with_settings(EqState::capture(params))
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value against its parameter range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.validate()
    }

    /// Write the preset's values into `params`.
    pub fn apply(&self, params: &ParamStore) {
        self.settings.apply(params);
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
