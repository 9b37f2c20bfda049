//! Parameter metadata and lock-free parameter storage.
//!
//! The equalizer exposes exactly seven parameters, addressed by the host
//! identifiers `"LowCut Freq"`, `"HighCut Freq"`, `"Peak Freq"`,
//! `"Peak Gain"`, `"Peak Quality"`, `"LowCut Slope"` and `"HighCut Slope"`.
//!
//! # Design
//!
//! - [`EqParam`] names each parameter and carries its fixed index.
//! - [`ParamDescriptor`] holds display and validation metadata: range,
//!   default, step, unit, normalization curve and host flags.
//! - [`ParamStore`] keeps the current values as `f32` bit patterns in
//!   [`AtomicU32`] slots. Writers (UI, automation, state restore) and the
//!   audio thread never block each other.
//!
//! Each slot is read independently. A reader taking all seven values may see
//! some from before and some from after a concurrent burst of writes; the
//! engine tolerates a parameter arriving one block late.
//!
//! # Example
//!
//! ```rust
//! use jeq_core::{EqParam, ParamStore};
//!
//! let store = ParamStore::new();
//! assert_eq!(store.get_parameter_value("Peak Freq"), Some(750.0));
//!
//! store.set(EqParam::PeakGain, 30.0);
//! assert_eq!(store.get(EqParam::PeakGain), 24.0); // clamped
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\] space.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values; used for the frequency controls.
    /// Requires `min > 0.0`.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` never changes for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// ```rust
/// use jeq_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter takes discrete values (choice lists).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit used when displaying a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Decibels.
    Decibels,
    /// Hertz.
    Hertz,
    /// Dimensionless (Q, choice index).
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use jeq_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}

/// Labels for the four cut-slope choices, indexed by slope index.
pub const SLOPE_CHOICES: [&str; 4] = ["12 dB/Oct", "24 dB/Oct", "36 dB/Oct", "48 dB/Oct"];

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Host identifier and display name (e.g. `"LowCut Freq"`).
    pub name: &'static str,
    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit for formatting.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value after construction or reset.
    pub default: f32,
    /// Grid that stored values snap to, measured from `min`.
    pub step: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Stable snake_case ID for presets and command-line flags.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Capability flags.
    pub flags: ParamFlags,
    /// Labels for choice parameters, empty for continuous ones.
    pub choices: &'static [&'static str],
}

impl ParamDescriptor {
    /// Audible-range frequency control (20 Hz to 20 kHz, logarithmic).
    pub fn frequency(name: &'static str, short_name: &'static str, default: f32, step: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min: 20.0,
            max: 20000.0,
            default,
            step,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Logarithmic,
            flags: ParamFlags::AUTOMATABLE,
            choices: &[],
        }
    }

    /// Boost/cut gain in dB.
    pub fn gain_db(name: &'static str, short_name: &'static str, min: f32, max: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default: 0.0,
            step: 0.5,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            choices: &[],
        }
    }

    /// Bandwidth control (0.1 to 10).
    pub fn quality(name: &'static str, short_name: &'static str) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.1,
            max: 10.0,
            default: 1.0,
            step: 0.05,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            choices: &[],
        }
    }

    /// Cut slope choice, stored as index 0..=3.
    pub fn slope(name: &'static str, short_name: &'static str) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: (SLOPE_CHOICES.len() - 1) as f32,
            default: 0.0,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            choices: &SLOPE_CHOICES,
        }
    }

    /// Sets the stable numeric and string IDs.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps `value` into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Clamps `value` and rounds it to the nearest step from `min`.
    ///
    /// NaN falls back to the default. Computed in `f64` so on-grid values
    /// snap to themselves.
    pub fn snap(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = self.clamp(value);
        if self.step <= 0.0 {
            return clamped;
        }
        let min = f64::from(self.min);
        let step = f64::from(self.step);
        let steps = libm::round((f64::from(clamped) - min) / step);
        self.clamp((min + steps * step) as f32)
    }

    /// Maps a plain value into `[0.0, 1.0]`.
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let value = self.clamp(value);
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Maps a normalized value back into the plain range.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }

    /// Label for a choice parameter's value, if any.
    pub fn choice_label(&self, value: f32) -> Option<&'static str> {
        if self.choices.is_empty() || value.is_nan() {
            return None;
        }
        let index = libm::roundf(self.clamp(value)) as usize;
        self.choices.get(index).copied()
    }
}

/// The seven equalizer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqParam {
    /// `"LowCut Freq"`: high-pass cutoff in Hz.
    LowCutFreq,
    /// `"HighCut Freq"`: low-pass cutoff in Hz.
    HighCutFreq,
    /// `"Peak Freq"`: bell centre in Hz.
    PeakFreq,
    /// `"Peak Gain"`: bell boost/cut in dB.
    PeakGain,
    /// `"Peak Quality"`: bell Q.
    PeakQuality,
    /// `"LowCut Slope"`: slope index 0..=3.
    LowCutSlope,
    /// `"HighCut Slope"`: slope index 0..=3.
    HighCutSlope,
}

impl EqParam {
    /// Number of parameters.
    pub const COUNT: usize = 7;

    /// Every parameter in storage order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::LowCutFreq,
        Self::HighCutFreq,
        Self::PeakFreq,
        Self::PeakGain,
        Self::PeakQuality,
        Self::LowCutSlope,
        Self::HighCutSlope,
    ];

    /// Storage index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parameter at storage index `index`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Host identifier.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LowCutFreq => "LowCut Freq",
            Self::HighCutFreq => "HighCut Freq",
            Self::PeakFreq => "Peak Freq",
            Self::PeakGain => "Peak Gain",
            Self::PeakQuality => "Peak Quality",
            Self::LowCutSlope => "LowCut Slope",
            Self::HighCutSlope => "HighCut Slope",
        }
    }

    /// Looks a parameter up by host identifier (exact match).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Looks a parameter up by its snake_case string ID.
    pub fn from_string_id(string_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.descriptor().string_id == string_id)
    }

    /// Full metadata for this parameter.
    pub fn descriptor(self) -> ParamDescriptor {
        match self {
            Self::LowCutFreq => ParamDescriptor::frequency("LowCut Freq", "LC Freq", 20.0, 1.0)
                .with_id(ParamId(100), "low_cut_freq"),
            Self::HighCutFreq => {
                ParamDescriptor::frequency("HighCut Freq", "HC Freq", 20000.0, 0.5)
                    .with_id(ParamId(101), "high_cut_freq")
            }
            Self::PeakFreq => ParamDescriptor::frequency("Peak Freq", "Pk Freq", 750.0, 1.0)
                .with_id(ParamId(102), "peak_freq"),
            Self::PeakGain => ParamDescriptor::gain_db("Peak Gain", "Pk Gain", -24.0, 24.0)
                .with_id(ParamId(103), "peak_gain"),
            Self::PeakQuality => ParamDescriptor::quality("Peak Quality", "Pk Q")
                .with_id(ParamId(104), "peak_quality"),
            Self::LowCutSlope => ParamDescriptor::slope("LowCut Slope", "LC Slope")
                .with_id(ParamId(105), "low_cut_slope"),
            Self::HighCutSlope => ParamDescriptor::slope("HighCut Slope", "HC Slope")
                .with_id(ParamId(106), "high_cut_slope"),
        }
    }
}

/// Lock-free store of the current parameter values.
///
/// Shared between the control side and the audio thread through an
/// `Arc<ParamStore>`. All methods take `&self`.
#[derive(Debug)]
pub struct ParamStore {
    values: [AtomicU32; EqParam::COUNT],
}

impl ParamStore {
    /// Creates a store holding every parameter's default.
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|i| {
                let default = EqParam::ALL[i].descriptor().default;
                AtomicU32::new(default.to_bits())
            }),
        }
    }

    /// Current value of `param` (wait-free).
    #[inline]
    pub fn get(&self, param: EqParam) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Relaxed))
    }

    /// Stores `value`, clamped and snapped to the parameter grid.
    ///
    /// Returns the value actually stored.
    pub fn set(&self, param: EqParam, value: f32) -> f32 {
        let stored = param.descriptor().snap(value);
        self.values[param.index()].store(stored.to_bits(), Ordering::Relaxed);
        stored
    }

    /// Current value by host identifier, `None` for unknown names.
    pub fn get_parameter_value(&self, name: &str) -> Option<f32> {
        EqParam::from_name(name).map(|p| self.get(p))
    }

    /// Sets a value by host identifier. Returns the stored value, or
    /// `None` if the name is unknown.
    pub fn set_parameter_value(&self, name: &str, value: f32) -> Option<f32> {
        EqParam::from_name(name).map(|p| self.set(p, value))
    }

    /// Current value of `param` mapped into `[0.0, 1.0]`.
    pub fn get_normalized(&self, param: EqParam) -> f32 {
        param.descriptor().normalize(self.get(param))
    }

    /// Sets `param` from a normalized `[0.0, 1.0]` value.
    pub fn set_normalized(&self, param: EqParam, normalized: f32) -> f32 {
        let value = param.descriptor().denormalize(normalized);
        self.set(param, value)
    }

    /// All seven values in storage order.
    pub fn values(&self) -> [f32; EqParam::COUNT] {
        EqParam::ALL.map(|p| self.get(p))
    }

    /// Restores every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for param in EqParam::ALL {
            let default = param.descriptor().default;
            self.values[param.index()].store(default.to_bits(), Ordering::Relaxed);
        }
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}
