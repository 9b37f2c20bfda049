//! Per-block settings snapshot.

use crate::{EqParam, ParamStore};

/// Cut filter steepness.
///
/// Each step adds one second-order Butterworth section (12 dB/oct).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slope {
    /// One section.
    #[default]
    Db12,
    /// Two sections.
    Db24,
    /// Three sections.
    Db36,
    /// Four sections.
    Db48,
}

impl Slope {
    /// Every slope, indexed by [`Slope::index`].
    pub const ALL: [Self; 4] = [Self::Db12, Self::Db24, Self::Db36, Self::Db48];

    /// Choice index (0..=3) as stored in the parameter.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Number of active biquad sections.
    #[inline]
    pub const fn sections(self) -> usize {
        self.index() + 1
    }

    /// Nominal attenuation rate.
    pub const fn db_per_octave(self) -> u32 {
        12 * self.sections() as u32
    }

    /// Slope for a choice index; indices past the end clamp to [`Slope::Db48`].
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Slope for a stored parameter value, rounding to the nearest index.
    pub fn from_param_value(value: f32) -> Self {
        if value.is_nan() || value <= 0.0 {
            return Self::Db12;
        }
        Self::from_index(libm::roundf(value) as usize)
    }

    /// Slope for a nominal dB/octave figure (12, 24, 36 or 48).
    pub fn from_db_per_octave(db: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.db_per_octave() == db)
    }
}

/// Read-only copy of every EQ parameter, taken once per processed block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSettings {
    /// High-pass cutoff in Hz.
    pub low_cut_freq: f32,
    /// Low-pass cutoff in Hz.
    pub high_cut_freq: f32,
    /// Bell centre in Hz.
    pub peak_freq: f32,
    /// Bell gain in dB.
    pub peak_gain_db: f32,
    /// Bell Q.
    pub peak_quality: f32,
    /// High-pass steepness.
    pub low_cut_slope: Slope,
    /// Low-pass steepness.
    pub high_cut_slope: Slope,
}

impl ChainSettings {
    /// Takes a snapshot of `params`.
    ///
    /// Each value is a separate atomic load; no cross-parameter consistency.
    pub fn from_params(params: &ParamStore) -> Self {
        Self {
            low_cut_freq: params.get(EqParam::LowCutFreq),
            high_cut_freq: params.get(EqParam::HighCutFreq),
            peak_freq: params.get(EqParam::PeakFreq),
            peak_gain_db: params.get(EqParam::PeakGain),
            peak_quality: params.get(EqParam::PeakQuality),
            low_cut_slope: Slope::from_param_value(params.get(EqParam::LowCutSlope)),
            high_cut_slope: Slope::from_param_value(params.get(EqParam::HighCutSlope)),
        }
    }

    /// Writes every field back into `params`.
    pub fn store(&self, params: &ParamStore) {
        params.set(EqParam::LowCutFreq, self.low_cut_freq);
        params.set(EqParam::HighCutFreq, self.high_cut_freq);
        params.set(EqParam::PeakFreq, self.peak_freq);
        params.set(EqParam::PeakGain, self.peak_gain_db);
        params.set(EqParam::PeakQuality, self.peak_quality);
        params.set(EqParam::LowCutSlope, self.low_cut_slope.index() as f32);
        params.set(EqParam::HighCutSlope, self.high_cut_slope.index() as f32);
    }
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            low_cut_freq: 20.0,
            high_cut_freq: 20000.0,
            peak_freq: 750.0,
            peak_gain_db: 0.0,
            peak_quality: 1.0,
            low_cut_slope: Slope::Db12,
            high_cut_slope: Slope::Db12,
        }
    }
}
