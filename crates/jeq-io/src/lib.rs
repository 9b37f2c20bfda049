//! Audio I/O layer for the jeq equalizer.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`] for
//!   loading/saving audio files as [`StereoSamples`]
//! - **Offline rendering**: [`render_offline`] runs a whole file through an
//!   [`EqualizerEngine`](jeq_core::EqualizerEngine) block by block, the way a
//!   host would call it
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use jeq_core::{EqParam, EqualizerEngine, ParamStore};
//! use jeq_io::{read_wav_stereo, render_offline, write_wav_stereo};
//!
//! # fn main() -> jeq_io::Result<()> {
//! let (input, spec) = read_wav_stereo("input.wav")?;
//!
//! let params = Arc::new(ParamStore::new());
//! params.set(EqParam::LowCutFreq, 80.0);
//! let mut engine = EqualizerEngine::new(Arc::clone(&params));
//! engine.prepare(spec.sample_rate as f32, 512).unwrap();
//!
//! let output = render_offline(&mut engine, &input, 512)?;
//! write_wav_stereo("output.wav", &output, spec)?;
//! # Ok(())
//! # }
//! ```

mod render;
mod wav;

pub use render::{SignalStats, render_offline, render_offline_with_progress};
pub use wav::{StereoSamples, WavSpec, read_wav_stereo, write_wav_stereo};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Rendering was asked to use an empty block.
    #[error("Invalid block size: {0}")]
    InvalidBlockSize(usize),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
