//! Core [`Processor`] trait shared by every stage of the filter chain.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: Single `f32` input/output. Stereo is built from two
//!   independently owned mono chains, never from one object branching on a
//!   channel index.
//!
//! - **No sample rate**: Stages do not know the sample rate. Coefficients are
//!   designed by the engine and pushed in, so a stage only filters.
//!
//! - **No allocations**: All methods are called on the audio thread.

/// A mono, in-place audio processing stage.
///
/// Implemented by [`FilterStage`](crate::FilterStage),
/// [`CutFilterBank`](crate::CutFilterBank) and
/// [`ChannelChain`](crate::ChannelChain).
///
/// # Example
///
/// ```rust
/// use jeq_core::Processor;
///
/// struct Gain(f32);
///
/// impl Processor for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.0
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut g = Gain(0.5);
/// let mut block = [1.0, 2.0];
/// g.process_block_inplace(&mut block);
/// assert_eq!(block, [0.5, 1.0]);
/// ```
pub trait Processor {
    /// Process a single sample, advancing internal state by one step.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples in place.
    ///
    /// Default implementation calls [`process`](Self::process) per sample.
    /// The block length is preserved; no samples are added or dropped.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear internal history without changing coefficients.
    ///
    /// Called when the stream (re)starts or the sample rate changes.
    fn reset(&mut self);

    /// Processing latency in samples.
    ///
    /// IIR stages have no look-ahead, so the default is 0.
    fn latency_samples(&self) -> usize {
        0
    }
}
