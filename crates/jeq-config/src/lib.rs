//! State persistence and preset management for the jeq equalizer.
//!
//! # Features
//!
//! - **State blobs**: Save the parameter store to an opaque JSON blob and
//!   restore it, refreshing the engine's filters afterwards
//! - **Preset System**: Load and save named settings as TOML files
//! - **Factory Presets**: Built-in presets for common corrective moves
//! - **Paths**: Platform-specific user preset directory
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use jeq_config::{get_factory_preset, restore_engine_state, save_state};
//! use jeq_core::{EqualizerEngine, ParamStore};
//!
//! let params = Arc::new(ParamStore::new());
//! let mut engine = EqualizerEngine::new(Arc::clone(&params));
//!
//! get_factory_preset("telephone").unwrap().apply(&params);
//! let blob = save_state(&params).unwrap();
//!
//! params.reset_to_defaults();
//! restore_engine_state(&mut engine, &blob).unwrap();
//! assert_eq!(engine.settings().high_cut_freq, 3400.0);
//! ```

mod error;
mod preset;

/// Parameter state capture and the persisted state blob.
pub mod state;

/// Platform-specific paths for presets.
pub mod paths;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    find_preset, find_preset_file, list_user_presets, preset_name_from_path, user_config_dir,
    user_presets_dir,
};
pub use preset::Preset;
pub use state::{
    EqState, STATE_VERSION, decode_state, encode_state, restore_engine_state, restore_state,
    save_state,
};
