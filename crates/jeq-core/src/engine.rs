//! Stereo-linked equalizer engine.
//!
//! [`EqualizerEngine`] owns one [`ChannelChain`] per channel and a shared
//! handle to the [`ParamStore`]. Every processed block starts with a fresh
//! [`ChainSettings`] snapshot, so parameter edits made on another thread
//! reach the audio at the next block boundary.
//!
//! # Threading
//!
//! The control side only writes parameter values. Coefficients are designed
//! and swapped into the filters on the audio thread inside
//! [`process_block`](EqualizerEngine::process_block), so no filter state is
//! ever shared between threads.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use jeq_core::{EqParam, EqualizerEngine, ParamStore};
//!
//! let params = Arc::new(ParamStore::new());
//! let mut engine = EqualizerEngine::new(Arc::clone(&params));
//! engine.prepare(44100.0, 256).unwrap();
//!
//! params.set(EqParam::PeakGain, 6.0);
//!
//! let mut left = vec![0.0f32; 256];
//! let mut right = vec![0.0f32; 256];
//! engine.process_block(&mut left, &mut right);
//! assert!(left.iter().all(|&s| s == 0.0));
//! ```

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

use crate::{
    ChainSettings, ChannelChain, ParamStore, Processor, make_highpass_cascade,
    make_lowpass_cascade, make_peak_filter,
};

/// Sample rate assumed until [`EqualizerEngine::prepare`] is called.
pub const DEFAULT_SAMPLE_RATE: f32 = 48000.0;

/// Block size assumed until [`EqualizerEngine::prepare`] is called.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Setup failures reported by [`EqualizerEngine::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineError {
    /// Sample rate was zero, negative, NaN or infinite.
    InvalidSampleRate(f32),
    /// Maximum block size was zero.
    InvalidBlockSize(usize),
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate: {sr}"),
            Self::InvalidBlockSize(n) => write!(f, "invalid maximum block size: {n}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Three-band equalizer applied identically to a left and a right channel.
#[derive(Debug)]
pub struct EqualizerEngine {
    params: Arc<ParamStore>,
    left: ChannelChain,
    right: ChannelChain,
    sample_rate: f32,
    max_block_size: usize,
    settings: ChainSettings,
}

impl EqualizerEngine {
    /// Creates an engine reading from `params`, designed for
    /// [`DEFAULT_SAMPLE_RATE`].
    pub fn new(params: Arc<ParamStore>) -> Self {
        let mut engine = Self {
            params,
            left: ChannelChain::new(),
            right: ChannelChain::new(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_block_size: DEFAULT_BLOCK_SIZE,
            settings: ChainSettings::default(),
        };
        engine.update_filters();
        engine
    }

    /// Prepares for a new stream.
    ///
    /// Validates the stream format, clears both chains' history, records the
    /// sample rate and redesigns every filter for it. Must be called off the
    /// audio thread before the first block and whenever the rate changes.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<(), EngineError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(EngineError::InvalidBlockSize(max_block_size));
        }

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.left.reset();
        self.right.reset();
        self.update_filters();

        #[cfg(feature = "tracing")]
        tracing::info!(sample_rate, max_block_size, "equalizer prepared");

        Ok(())
    }

    /// Snapshots the parameter store and pushes fresh coefficients into both
    /// chains.
    ///
    /// Call after restoring external state so the next block reflects it.
    #[inline]
    pub fn update_filters(&mut self) {
        let settings = ChainSettings::from_params(&self.params);
        self.apply_settings(&settings);
    }

    /// Designs coefficients for `settings` once and loads the same sets into
    /// the left and right chains.
    pub fn apply_settings(&mut self, settings: &ChainSettings) {
        let sr = self.sample_rate;
        let low_cut =
            make_highpass_cascade(settings.low_cut_freq, sr, settings.low_cut_slope.sections());
        let peak = make_peak_filter(
            settings.peak_freq,
            settings.peak_quality,
            settings.peak_gain_db,
            sr,
        );
        let high_cut =
            make_lowpass_cascade(settings.high_cut_freq, sr, settings.high_cut_slope.sections());

        for chain in [&mut self.left, &mut self.right] {
            chain.low_cut_mut().set_coefficients(&low_cut);
            chain.peak_mut().set_coefficients(peak);
            chain.high_cut_mut().set_coefficients(&high_cut);
        }
        self.settings = *settings;
    }

    /// Processes one stereo block in place.
    ///
    /// Refreshes the filters from the parameter store first. Buffers longer
    /// than the prepared maximum are still processed in full; nothing here
    /// allocates or locks.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.update_filters();
        self.left.process(left);
        self.right.process(right);
    }

    /// Processes one mono block in place through the left chain.
    pub fn process_mono(&mut self, buffer: &mut [f32]) {
        self.update_filters();
        self.left.process(buffer);
    }

    /// Clears both chains' history, keeping the current coefficients.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!("equalizer history cleared");
    }

    /// Sample rate the filters are designed for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Maximum block size announced by the last [`prepare`](Self::prepare).
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Settings applied by the most recent update.
    pub fn settings(&self) -> ChainSettings {
        self.settings
    }

    /// Shared parameter store.
    pub fn params(&self) -> &Arc<ParamStore> {
        &self.params
    }

    /// Left channel chain.
    pub fn left(&self) -> &ChannelChain {
        &self.left
    }

    /// Right channel chain.
    pub fn right(&self) -> &ChannelChain {
        &self.right
    }

    /// Processing latency in samples (always 0 for this IIR topology).
    pub fn latency_samples(&self) -> usize {
        self.left.latency_samples()
    }

    /// Combined magnitude response at `frequency`, in dB.
    pub fn magnitude_db_at(&self, frequency: f32) -> f32 {
        self.left.magnitude_db_at(frequency, self.sample_rate)
    }
}
