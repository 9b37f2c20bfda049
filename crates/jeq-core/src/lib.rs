//! jeq Core - real-time three-band equalizer
//!
//! A low-cut filter, a peaking bell and a high-cut filter applied to each
//! channel of a stereo stream, with parameters that can be changed from
//! another thread while audio is running.
//!
//! # Core Abstractions
//!
//! ## Coefficient Design
//!
//! - [`make_peak_filter`] - RBJ peaking bell
//! - [`make_highpass_cascade`] / [`make_lowpass_cascade`] - Butterworth cut
//!   filters built from 1 to 4 second-order sections
//! - [`Coefficients`], [`CutCoefficients`] - normalized coefficient sets
//!
//! ## Processing
//!
//! - [`Processor`] - mono in-place processing trait
//! - [`FilterStage`] - Direct Form I biquad
//! - [`CutFilterBank`] - four stage slots with an active count
//! - [`ChannelChain`] - low-cut → peak → high-cut for one channel
//! - [`EqualizerEngine`] - two chains driven by the parameter store
//!
//! ## Parameters
//!
//! - [`ParamStore`] - lock-free storage for the seven parameters
//! - [`EqParam`], [`ParamDescriptor`] - identifiers and metadata
//! - [`ChainSettings`], [`Slope`] - per-block snapshot
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets. The
//! engine then needs only `alloc` for its shared `Arc<ParamStore>`:
//!
//! ```toml
//! [dependencies]
//! jeq-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use jeq_core::{EqParam, EqualizerEngine, ParamStore};
//!
//! let params = Arc::new(ParamStore::new());
//! let mut engine = EqualizerEngine::new(Arc::clone(&params));
//! engine.prepare(48000.0, 512).unwrap();
//!
//! params.set(EqParam::LowCutFreq, 80.0);
//! params.set(EqParam::LowCutSlope, 2.0); // 36 dB/oct
//!
//! let mut left = vec![0.1f32; 512];
//! let mut right = vec![0.1f32; 512];
//! engine.process_block(&mut left, &mut right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod chain;
pub mod coefficients;
pub mod cut_filter;
pub mod engine;
pub mod filter_stage;
pub mod math;
pub mod params;
pub mod processor;
pub mod settings;

pub use chain::{ChainPosition, ChannelChain};
pub use coefficients::{
    Coefficients, CutCoefficients, MAX_FREQUENCY_RATIO, MAX_GAIN_DB, MAX_SECTIONS,
    MIN_FREQUENCY_HZ, MIN_Q, butterworth_q, clamp_frequency, make_highpass_cascade,
    make_lowpass_cascade, make_peak_filter,
};
pub use cut_filter::CutFilterBank;
pub use engine::{DEFAULT_BLOCK_SIZE, DEFAULT_SAMPLE_RATE, EngineError, EqualizerEngine};
pub use filter_stage::FilterStage;
pub use math::{db_to_linear, flush_denormal, linear_to_db};
pub use params::{
    EqParam, ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamStore, ParamUnit,
    SLOPE_CHOICES,
};
pub use processor::Processor;
pub use settings::{ChainSettings, Slope};
