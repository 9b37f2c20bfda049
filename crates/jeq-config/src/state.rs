//! Parameter state capture and the persisted state blob.
//!
//! The blob is JSON carrying a format version and the seven parameter values
//! keyed by their host identifiers:
//!
//! ```json
//! {
//!   "version": 1,
//!   "params": {
//!     "LowCut Freq": 20.0,
//!     "HighCut Freq": 20000.0,
//!     "Peak Freq": 750.0,
//!     "Peak Gain": 0.0,
//!     "Peak Quality": 1.0,
//!     "LowCut Slope": 0,
//!     "HighCut Slope": 0
//!   }
//! }
//! ```
//!
//! Missing parameters take their defaults. A blob that fails to parse, or
//! comes from a newer version, is rejected before the store is touched.

use jeq_core::{ChainSettings, EqParam, EqualizerEngine, ParamStore, Slope};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Newest state blob version this crate reads and the one it writes.
pub const STATE_VERSION: u32 = 1;

/// Plain copy of every EQ parameter, as stored in blobs and presets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqState {
    /// High-pass cutoff in Hz.
    #[serde(rename = "LowCut Freq")]
    pub low_cut_freq: f32,
    /// Low-pass cutoff in Hz.
    #[serde(rename = "HighCut Freq")]
    pub high_cut_freq: f32,
    /// Bell centre in Hz.
    #[serde(rename = "Peak Freq")]
    pub peak_freq: f32,
    /// Bell gain in dB.
    #[serde(rename = "Peak Gain")]
    pub peak_gain: f32,
    /// Bell Q.
    #[serde(rename = "Peak Quality")]
    pub peak_quality: f32,
    /// High-pass slope index (0 = 12 dB/oct .. 3 = 48 dB/oct).
    #[serde(rename = "LowCut Slope")]
    pub low_cut_slope: u32,
    /// Low-pass slope index.
    #[serde(rename = "HighCut Slope")]
    pub high_cut_slope: u32,
}

impl Default for EqState {
    fn default() -> Self {
        Self::from_settings(&ChainSettings::default())
    }
}

impl EqState {
    /// Reads the current values out of `params`.
    pub fn capture(params: &ParamStore) -> Self {
        Self {
            low_cut_freq: params.get(EqParam::LowCutFreq),
            high_cut_freq: params.get(EqParam::HighCutFreq),
            peak_freq: params.get(EqParam::PeakFreq),
            peak_gain: params.get(EqParam::PeakGain),
            peak_quality: params.get(EqParam::PeakQuality),
            low_cut_slope: params.get(EqParam::LowCutSlope) as u32,
            high_cut_slope: params.get(EqParam::HighCutSlope) as u32,
        }
    }

    /// Writes every value into `params`. Out-of-range values are clamped by
    /// the store.
    pub fn apply(&self, params: &ParamStore) {
        for param in EqParam::ALL {
            params.set(param, self.get(param));
        }
    }

    /// Value of `param` as the store represents it.
    pub fn get(&self, param: EqParam) -> f32 {
        match param {
            EqParam::LowCutFreq => self.low_cut_freq,
            EqParam::HighCutFreq => self.high_cut_freq,
            EqParam::PeakFreq => self.peak_freq,
            EqParam::PeakGain => self.peak_gain,
            EqParam::PeakQuality => self.peak_quality,
            EqParam::LowCutSlope => self.low_cut_slope as f32,
            EqParam::HighCutSlope => self.high_cut_slope as f32,
        }
    }

    /// Sets `param`; slope values are rounded to an index.
    pub fn set(&mut self, param: EqParam, value: f32) {
        match param {
            EqParam::LowCutFreq => self.low_cut_freq = value,
            EqParam::HighCutFreq => self.high_cut_freq = value,
            EqParam::PeakFreq => self.peak_freq = value,
            EqParam::PeakGain => self.peak_gain = value,
            EqParam::PeakQuality => self.peak_quality = value,
            EqParam::LowCutSlope => self.low_cut_slope = value.round().max(0.0) as u32,
            EqParam::HighCutSlope => self.high_cut_slope = value.round().max(0.0) as u32,
        }
    }

    /// Builds a state from a settings snapshot.
    pub fn from_settings(settings: &ChainSettings) -> Self {
        Self {
            low_cut_freq: settings.low_cut_freq,
            high_cut_freq: settings.high_cut_freq,
            peak_freq: settings.peak_freq,
            peak_gain: settings.peak_gain_db,
            peak_quality: settings.peak_quality,
            low_cut_slope: settings.low_cut_slope.index() as u32,
            high_cut_slope: settings.high_cut_slope.index() as u32,
        }
    }

    /// Converts to the engine's snapshot type. Slope indices past the end
    /// clamp to 48 dB/oct.
    pub fn to_settings(&self) -> ChainSettings {
        ChainSettings {
            low_cut_freq: self.low_cut_freq,
            high_cut_freq: self.high_cut_freq,
            peak_freq: self.peak_freq,
            peak_gain_db: self.peak_gain,
            peak_quality: self.peak_quality,
            low_cut_slope: Slope::from_index(self.low_cut_slope as usize),
            high_cut_slope: Slope::from_index(self.high_cut_slope as usize),
        }
    }

    /// Checks every value against its parameter range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for param in EqParam::ALL {
            let d = param.descriptor();
            let value = self.get(param);
            if !value.is_finite() {
                return Err(ConfigError::invalid_parameter(d.name, value, "not a finite number"));
            }
            if value < d.min || value > d.max {
                return Err(ConfigError::invalid_parameter(
                    d.name,
                    value,
                    format!("out of range [{}, {}]", d.min, d.max),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StateBlob {
    #[serde(default = "current_version")]
    version: u32,
    #[serde(default)]
    params: EqState,
}

fn current_version() -> u32 {
    STATE_VERSION
}

/// Encodes `state` as a state blob.
pub fn encode_state(state: &EqState) -> Result<Vec<u8>, ConfigError> {
    let blob = StateBlob {
        version: STATE_VERSION,
        params: *state,
    };
    Ok(serde_json::to_vec_pretty(&blob)?)
}

/// Decodes a state blob without applying it.
pub fn decode_state(bytes: &[u8]) -> Result<EqState, ConfigError> {
    let blob: StateBlob = serde_json::from_slice(bytes)?;
    if blob.version > STATE_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: blob.version,
            supported: STATE_VERSION,
        });
    }
    Ok(blob.params)
}

/// Serializes the store's full state into an opaque blob.
pub fn save_state(params: &ParamStore) -> Result<Vec<u8>, ConfigError> {
    encode_state(&EqState::capture(params))
}

/// Restores a blob into `params`.
///
/// The whole blob is decoded first; on error the store is left unchanged.
/// Returns the state that was applied.
pub fn restore_state(params: &ParamStore, bytes: &[u8]) -> Result<EqState, ConfigError> {
    let state = decode_state(bytes)?;
    state.apply(params);
    Ok(state)
}

/// Restores a blob into the engine's parameters and refreshes its filters,
/// so the next block already uses the restored settings.
pub fn restore_engine_state(
    engine: &mut EqualizerEngine,
    bytes: &[u8],
) -> Result<EqState, ConfigError> {
    let state = restore_state(engine.params(), bytes)?;
    engine.update_filters();
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_matches_store_defaults() {
        assert_eq!(EqState::default(), EqState::capture(&ParamStore::new()));
        assert!(EqState::default().validate().is_ok());
    }

    #[test]
    fn blob_round_trip_is_bit_exact() {
        let store = ParamStore::new();
        store.set(EqParam::LowCutFreq, 87.0);
        store.set(EqParam::HighCutFreq, 12345.5);
        store.set(EqParam::PeakQuality, 0.35);
        store.set(EqParam::PeakGain, -7.5);
        store.set(EqParam::HighCutSlope, 2.0);

        let blob = save_state(&store).unwrap();
        let fresh = ParamStore::new();
        restore_state(&fresh, &blob).unwrap();

        for param in EqParam::ALL {
            assert_eq!(
                fresh.get(param).to_bits(),
                store.get(param).to_bits(),
                "{}",
                param.name()
            );
        }
    }

    #[test]
    fn blob_uses_host_identifiers() {
        let blob = save_state(&ParamStore::new()).unwrap();
        let text = String::from_utf8(blob).unwrap();
        assert!(text.contains("\"version\": 1"));
        for param in EqParam::ALL {
            assert!(text.contains(param.name()), "missing {}", param.name());
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let store = ParamStore::new();
        store.set(EqParam::PeakFreq, 3000.0);
        store.set(EqParam::PeakGain, 9.0);

        let blob = br#"{ "version": 1, "params": { "Peak Gain": -3.0 } }"#;
        let state = restore_state(&store, blob).unwrap();

        assert_eq!(state.peak_gain, -3.0);
        assert_eq!(store.get(EqParam::PeakGain), -3.0);
        assert_eq!(store.get(EqParam::PeakFreq), 750.0);
    }

    #[test]
    fn corrupt_blob_leaves_store_unchanged() {
        let store = ParamStore::new();
        store.set(EqParam::LowCutFreq, 400.0);
        let before = store.values();

        for bad in [
            &b"not json"[..],
            &b"{\"version\": 1, \"params\": {\"Peak Gain\": \"loud\"}}"[..],
            &b""[..],
        ] {
            assert!(restore_state(&store, bad).is_err());
            assert_eq!(store.values(), before);
        }
    }

    #[test]
    fn newer_version_rejected() {
        let store = ParamStore::new();
        let err = restore_state(&store, br#"{ "version": 2, "params": {} }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedVersion {
                found: 2,
                supported: 1
            }
        ));
    }

    #[test]
    fn out_of_range_values_are_clamped_on_restore() {
        let store = ParamStore::new();
        let blob = br#"{ "params": { "Peak Gain": 99.0, "LowCut Slope": 7 } }"#;
        let state = restore_state(&store, blob).unwrap();
        assert!(state.validate().is_err());
        assert_eq!(store.get(EqParam::PeakGain), 24.0);
        assert_eq!(store.get(EqParam::LowCutSlope), 3.0);
    }

    #[test]
    fn settings_conversion_round_trip() {
        let mut state = EqState::default();
        state.set(EqParam::LowCutSlope, 2.0);
        state.set(EqParam::PeakFreq, 1500.0);
        let settings = state.to_settings();
        assert_eq!(settings.low_cut_slope, Slope::Db36);
        assert_eq!(EqState::from_settings(&settings), state);
    }

    #[test]
    fn restore_refreshes_engine_filters() {
        let params = std::sync::Arc::new(ParamStore::new());
        let mut engine = EqualizerEngine::new(std::sync::Arc::clone(&params));
        let mut state = EqState::default();
        state.low_cut_slope = 3;
        state.peak_gain = 6.0;
        let blob = encode_state(&state).unwrap();

        restore_engine_state(&mut engine, &blob).unwrap();
        assert_eq!(engine.left().low_cut().active_stages(), 4);
        assert_eq!(engine.settings().peak_gain_db, 6.0);
    }
}
