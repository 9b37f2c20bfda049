//! Offline rendering through the equalizer engine.

use jeq_core::{EqualizerEngine, linear_to_db};

use crate::{Error, Result, StereoSamples};

/// Renders `input` through `engine` in blocks of `block_size` frames.
///
/// Each block goes through [`EqualizerEngine::process_block`], so parameter
/// changes made between calls are picked up exactly as they would be by a
/// live host. The final block may be shorter than `block_size`.
pub fn render_offline(
    engine: &mut EqualizerEngine,
    input: &StereoSamples,
    block_size: usize,
) -> Result<StereoSamples> {
    render_offline_with_progress(engine, input, block_size, |_| {})
}

/// Like [`render_offline`], calling `on_block` with the number of frames
/// rendered after each block.
pub fn render_offline_with_progress<F>(
    engine: &mut EqualizerEngine,
    input: &StereoSamples,
    block_size: usize,
    mut on_block: F,
) -> Result<StereoSamples>
where
    F: FnMut(usize),
{
    if block_size == 0 {
        return Err(Error::InvalidBlockSize(block_size));
    }

    let len = input.len();
    let mut left = input.left[..len].to_vec();
    let mut right = input.right[..len].to_vec();

    for (l, r) in left
        .chunks_mut(block_size)
        .zip(right.chunks_mut(block_size))
    {
        engine.process_block(l, r);
        on_block(l.len());
    }

    tracing::debug!(frames = len, block_size, "offline render complete");
    Ok(StereoSamples::new(left, right))
}

/// Peak and RMS level of a stereo signal, taken across both channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalStats {
    /// Maximum absolute sample value.
    pub peak: f32,
    /// Root mean square level.
    pub rms: f32,
}

impl SignalStats {
    /// Measures `samples`. Empty input measures as silence.
    pub fn measure(samples: &StereoSamples) -> Self {
        let all = samples.left.iter().chain(&samples.right);
        let count = samples.left.len() + samples.right.len();
        if count == 0 {
            return Self::default();
        }

        let (peak, sum_sq) = all.fold((0.0f32, 0.0f64), |(peak, sum), &x| {
            (peak.max(x.abs()), sum + f64::from(x) * f64::from(x))
        });
        Self {
            peak,
            rms: (sum_sq / count as f64).sqrt() as f32,
        }
    }

    /// Peak level in dBFS, floored near -200 dB for silence.
    pub fn peak_db(&self) -> f32 {
        linear_to_db(self.peak)
    }

    /// RMS level in dBFS, floored near -200 dB for silence.
    pub fn rms_db(&self) -> f32 {
        linear_to_db(self.rms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jeq_core::{EqParam, ParamStore};
    use std::sync::Arc;

    fn engine() -> (Arc<ParamStore>, EqualizerEngine) {
        let params = Arc::new(ParamStore::new());
        let mut engine = EqualizerEngine::new(Arc::clone(&params));
        engine.prepare(48000.0, 64).unwrap();
        (params, engine)
    }

    fn noise(len: usize) -> StereoSamples {
        let mut state = 0x1234_5678u32;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32) * 2.0 - 1.0
        };
        let left: Vec<f32> = (0..len).map(|_| next()).collect();
        let right: Vec<f32> = (0..len).map(|_| next()).collect();
        StereoSamples::new(left, right)
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let (_, mut engine) = engine();
        let err = render_offline(&mut engine, &noise(16), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidBlockSize(0)));
    }

    #[test]
    fn test_block_size_does_not_change_output() {
        let input = noise(1000);
        let mut outputs = Vec::new();
        for block_size in [1, 64, 333, 4096] {
            let (params, mut engine) = engine();
            params.set(EqParam::PeakGain, 9.0);
            params.set(EqParam::LowCutSlope, 3.0);
            outputs.push(render_offline(&mut engine, &input, block_size).unwrap());
        }
        for output in &outputs[1..] {
            assert_eq!(output, &outputs[0]);
        }
    }

    #[test]
    fn test_progress_reports_every_frame() {
        let (_, mut engine) = engine();
        let mut blocks = Vec::new();
        let output =
            render_offline_with_progress(&mut engine, &noise(150), 64, |n| blocks.push(n))
                .unwrap();
        assert_eq!(blocks, [64, 64, 22]);
        assert_eq!(output.len(), 150);
    }

    #[test]
    fn test_empty_input() {
        let (_, mut engine) = engine();
        let output = render_offline(&mut engine, &StereoSamples::new(Vec::new(), Vec::new()), 64).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_signal_stats() {
        let samples = StereoSamples::new(vec![1.0, -1.0], vec![-0.5, 0.5]);
        let stats = SignalStats::measure(&samples);
        assert_eq!(stats.peak, 1.0);
        assert!((stats.rms - 0.625f32.sqrt()).abs() < 1e-6);
        assert!(stats.peak_db().abs() < 1e-6);

        let silent = SignalStats::measure(&StereoSamples::from_mono(vec![0.0; 8]));
        assert!((silent.rms_db() + 200.0).abs() < 0.01);
        assert!((silent.peak_db() + 200.0).abs() < 0.01);
    }
}
