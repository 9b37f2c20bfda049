//! Single biquad filter stage.
//!
//! Holds one active [`Coefficients`] set and the Direct Form I history.

use crate::{Coefficients, Processor, flush_denormal};

/// A second-order IIR stage.
///
/// Implements the Direct Form I biquad structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// Replacing coefficients keeps the history, so a parameter change takes
/// effect on the very next sample with no crossfade. Fast automation can
/// therefore produce short transients; smoothing is the caller's job.
#[derive(Debug, Clone)]
pub struct FilterStage {
    coefficients: Coefficients,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl FilterStage {
    /// Creates a stage with passthrough coefficients.
    pub fn new() -> Self {
        Self::with_coefficients(Coefficients::IDENTITY)
    }

    /// Creates a stage with the given coefficients and empty history.
    pub fn with_coefficients(coefficients: Coefficients) -> Self {
        Self {
            coefficients,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Replaces the active coefficient set.
    ///
    /// The whole set is swapped in one assignment; history is untouched.
    #[inline]
    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
    }

    /// The active coefficient set.
    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// Returns `true` if every history slot is zero.
    pub fn is_silent(&self) -> bool {
        self.x1 == 0.0 && self.x2 == 0.0 && self.y1 == 0.0 && self.y2 == 0.0
    }
}

impl Default for FilterStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for FilterStage {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let c = &self.coefficients;
        let output = flush_denormal(
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2,
        );

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_highpass_cascade, make_peak_filter};

    #[test]
    fn test_passthrough() {
        let mut stage = FilterStage::new();
        for i in 0..10 {
            let input = i as f32 * 0.1;
            assert_eq!(stage.process(input), input);
        }
    }

    #[test]
    fn test_reset_clears_history() {
        let mut stage = FilterStage::with_coefficients(make_peak_filter(1000.0, 1.0, 6.0, 48000.0));
        for _ in 0..10 {
            stage.process(1.0);
        }
        assert!(!stage.is_silent());

        stage.reset();
        assert!(stage.is_silent());
        assert_eq!(stage.coefficients(), make_peak_filter(1000.0, 1.0, 6.0, 48000.0));
    }

    #[test]
    fn test_set_coefficients_keeps_history() {
        let hp = make_highpass_cascade(100.0, 48000.0, 1);
        let mut stage = FilterStage::with_coefficients(hp.as_slice()[0]);
        for _ in 0..32 {
            stage.process(0.5);
        }
        let (x1, y1) = (stage.x1, stage.y1);

        stage.set_coefficients(Coefficients::IDENTITY);
        assert_eq!(stage.x1, x1);
        assert_eq!(stage.y1, y1);
        assert_eq!(stage.coefficients(), Coefficients::IDENTITY);
    }

    #[test]
    fn test_silence_decays_to_exact_zero() {
        let hp = make_highpass_cascade(20.0, 48000.0, 1);
        let mut stage = FilterStage::with_coefficients(hp.as_slice()[0]);
        stage.process(1.0);

        let mut last = 1.0;
        for _ in 0..2_000_000 {
            last = stage.process(0.0);
            if last == 0.0 {
                break;
            }
        }
        assert_eq!(last, 0.0, "impulse tail should flush to zero");
    }
}
