//! Fixed-capacity Butterworth cascade used for the low-cut and high-cut bands.

use crate::{Coefficients, CutCoefficients, FilterStage, MAX_SECTIONS, Processor, Slope};

/// Four biquad slots with an explicit active count.
///
/// Slots `0..active` filter in order; the rest are bypassed and neither
/// read nor write their history. The bank never allocates, so changing
/// the slope on the audio thread is just an index update.
#[derive(Debug, Clone)]
pub struct CutFilterBank {
    stages: [FilterStage; MAX_SECTIONS],
    active: usize,
}

impl CutFilterBank {
    /// Creates a bank with one identity section active (12 dB/oct slot count).
    pub fn new() -> Self {
        Self {
            stages: core::array::from_fn(|_| FilterStage::new()),
            active: 1,
        }
    }

    /// Loads a designed cascade.
    ///
    /// Sections `0..order` receive the new coefficients; slots beyond the
    /// order are marked bypassed with their history left as it was.
    pub fn set_coefficients(&mut self, cascade: &CutCoefficients) {
        for (stage, coefficients) in self.stages.iter_mut().zip(cascade.as_slice()) {
            stage.set_coefficients(*coefficients);
        }
        self.active = cascade.order();
    }

    /// Number of sections currently filtering (1..=4).
    pub fn active_stages(&self) -> usize {
        self.active
    }

    /// Slope implied by the active section count.
    pub fn slope(&self) -> Slope {
        Slope::from_index(self.active.saturating_sub(1))
    }

    /// Stage at slot `index`, active or not.
    pub fn stage(&self, index: usize) -> Option<&FilterStage> {
        self.stages.get(index)
    }

    /// Returns `true` if slot `index` is currently bypassed.
    pub fn is_bypassed(&self, index: usize) -> bool {
        index >= self.active
    }

    /// Coefficients of the active sections, in processing order.
    pub fn active_coefficients(&self) -> impl Iterator<Item = Coefficients> + '_ {
        self.stages[..self.active].iter().map(FilterStage::coefficients)
    }

    /// Linear magnitude of the active cascade at `frequency`.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        self.active_coefficients()
            .map(|c| c.magnitude_at(frequency, sample_rate))
            .product()
    }
}

impl Default for CutFilterBank {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for CutFilterBank {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.stages[..self.active]
            .iter_mut()
            .fold(input, |x, stage| stage.process(x))
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        // Stage-major: each section runs over the whole block before the next.
        for stage in &mut self.stages[..self.active] {
            stage.process_block_inplace(buffer);
        }
    }

    fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_highpass_cascade, make_lowpass_cascade};

    const SR: f32 = 48000.0;

    #[test]
    fn test_active_count_follows_order() {
        let mut bank = CutFilterBank::new();
        for order in 1..=4 {
            bank.set_coefficients(&make_highpass_cascade(100.0, SR, order));
            assert_eq!(bank.active_stages(), order);
            assert_eq!(bank.slope().sections(), order);
            for slot in 0..MAX_SECTIONS {
                assert_eq!(bank.is_bypassed(slot), slot >= order);
            }
        }
    }

    #[test]
    fn test_identity_sections_pass_through() {
        let mut bank = CutFilterBank::new();
        bank.set_coefficients(&CutCoefficients::identity(3));
        assert_eq!(bank.active_stages(), 3);

        let mut block: Vec<f32> = (0..64).map(|i| (i as f32 * 0.37).sin()).collect();
        let expected = block.clone();
        bank.process_block_inplace(&mut block);
        assert_eq!(block, expected);
    }

    #[test]
    fn test_bypassed_slots_keep_history() {
        let mut bank = CutFilterBank::new();
        bank.set_coefficients(&make_lowpass_cascade(1000.0, SR, 4));
        let mut block = [0.5f32; 32];
        bank.process_block_inplace(&mut block);
        let slot3 = bank.stage(3).map(FilterStage::is_silent);
        assert_eq!(slot3, Some(false));

        bank.set_coefficients(&make_lowpass_cascade(1000.0, SR, 1));
        let mut block = [0.0f32; 32];
        bank.process_block_inplace(&mut block);
        // Slot 3 was neither run nor cleared.
        assert_eq!(bank.stage(3).map(FilterStage::is_silent), Some(false));
    }

    #[test]
    fn test_block_and_sample_paths_agree() {
        let cascade = make_highpass_cascade(250.0, SR, 4);
        let mut a = CutFilterBank::new();
        let mut b = CutFilterBank::new();
        a.set_coefficients(&cascade);
        b.set_coefficients(&cascade);

        let input: Vec<f32> = (0..256).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut block = input.clone();
        a.process_block_inplace(&mut block);
        let per_sample: Vec<f32> = input.iter().map(|&x| b.process(x)).collect();

        for (x, y) in block.iter().zip(&per_sample) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_magnitude_is_product_of_sections() {
        let cascade = make_highpass_cascade(400.0, SR, 3);
        let mut bank = CutFilterBank::new();
        bank.set_coefficients(&cascade);
        let direct = cascade.magnitude_at(200.0, SR);
        assert!((bank.magnitude_at(200.0, SR) - direct).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_every_slot() {
        let mut bank = CutFilterBank::new();
        bank.set_coefficients(&make_lowpass_cascade(500.0, SR, 4));
        let mut block = [1.0f32; 16];
        bank.process_block_inplace(&mut block);
        bank.reset();
        for slot in 0..MAX_SECTIONS {
            assert_eq!(bank.stage(slot).map(FilterStage::is_silent), Some(true));
        }
    }
}
