//! Platform-specific preset locations and preset lookup.
//!
//! User presets live in `<config dir>/jeq/presets/`:
//!
//! - Linux: `~/.config/jeq/presets/`
//! - macOS: `~/Library/Application Support/jeq/presets/`
//! - Windows: `%APPDATA%\jeq\presets\`

use std::path::{Path, PathBuf};

use crate::{ConfigError, Preset, get_factory_preset};

/// Application name used for directory paths.
const APP_NAME: &str = "jeq";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Falls back to `./jeq/presets` if the config directory cannot be determined.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Returns the user-specific configuration directory.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// List all preset files in the user presets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List `.toml` files in `dir`, sorted by path.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Locate a preset file on disk.
///
/// `name` may be a path to a TOML file, or a preset name (with or without
/// `.toml`) inside [`user_presets_dir`].
pub fn find_preset_file(name: &str) -> Option<PathBuf> {
    find_preset_file_in(name, &user_presets_dir())
}

fn find_preset_file_in(name: &str, user_dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    let user_path = user_dir.join(filename);
    user_path.is_file().then_some(user_path)
}

/// Resolve a preset by name.
///
/// Factory presets are checked first, then files found by
/// [`find_preset_file`].
pub fn find_preset(name: &str) -> Result<Preset, ConfigError> {
    find_preset_in(name, &user_presets_dir())
}

/// Like [`find_preset`], searching `user_dir` instead of the platform
/// presets directory.
pub fn find_preset_in(name: &str, user_dir: &Path) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    match find_preset_file_in(name, user_dir) {
        Some(path) => Preset::load(path),
        None => Err(ConfigError::PresetNotFound(name.to_string())),
    }
}

/// Get the preset name from a file path (the file stem).
///
/// ```rust
/// use jeq_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/warm_vocal.toml"));
/// assert_eq!(name, Some("warm_vocal".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}
