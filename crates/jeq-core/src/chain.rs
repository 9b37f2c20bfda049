//! Per-channel filter pipeline.

use crate::{CutFilterBank, FilterStage, Processor, linear_to_db};

/// Slot in a [`ChannelChain`], in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainPosition {
    /// Butterworth high-pass cascade.
    LowCut,
    /// Peaking bell.
    Peak,
    /// Butterworth low-pass cascade.
    HighCut,
}

impl ChainPosition {
    /// All positions in the order samples visit them.
    pub const ALL: [Self; 3] = [Self::LowCut, Self::Peak, Self::HighCut];
}

/// Low-cut bank, peak stage and high-cut bank applied to one channel.
///
/// The topology is fixed; there is no way to reorder or drop a slot. Each
/// channel of the engine owns its own chain, so no filter history is ever
/// shared between channels.
#[derive(Debug, Clone, Default)]
pub struct ChannelChain {
    low_cut: CutFilterBank,
    peak: FilterStage,
    high_cut: CutFilterBank,
}

impl ChannelChain {
    /// Creates a chain with every slot passing audio through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `block` through low-cut, peak and high-cut, in place.
    pub fn process(&mut self, block: &mut [f32]) {
        self.low_cut.process_block_inplace(block);
        self.peak.process_block_inplace(block);
        self.high_cut.process_block_inplace(block);
    }

    /// The low-cut cascade.
    pub fn low_cut(&self) -> &CutFilterBank {
        &self.low_cut
    }

    /// Mutable access to the low-cut cascade.
    pub fn low_cut_mut(&mut self) -> &mut CutFilterBank {
        &mut self.low_cut
    }

    /// The peak stage.
    pub fn peak(&self) -> &FilterStage {
        &self.peak
    }

    /// Mutable access to the peak stage.
    pub fn peak_mut(&mut self) -> &mut FilterStage {
        &mut self.peak
    }

    /// The high-cut cascade.
    pub fn high_cut(&self) -> &CutFilterBank {
        &self.high_cut
    }

    /// Mutable access to the high-cut cascade.
    pub fn high_cut_mut(&mut self) -> &mut CutFilterBank {
        &mut self.high_cut
    }

    /// Linear magnitude of a single slot at `frequency`.
    pub fn position_magnitude_at(
        &self,
        position: ChainPosition,
        frequency: f32,
        sample_rate: f32,
    ) -> f32 {
        match position {
            ChainPosition::LowCut => self.low_cut.magnitude_at(frequency, sample_rate),
            ChainPosition::Peak => self.peak.coefficients().magnitude_at(frequency, sample_rate),
            ChainPosition::HighCut => self.high_cut.magnitude_at(frequency, sample_rate),
        }
    }

    /// Combined response of all three slots, in dB.
    pub fn magnitude_db_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        let linear: f32 = ChainPosition::ALL
            .iter()
            .map(|&p| self.position_magnitude_at(p, frequency, sample_rate))
            .product();
        linear_to_db(linear)
    }
}

impl Processor for ChannelChain {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let x = self.low_cut.process(input);
        let x = self.peak.process(x);
        self.high_cut.process(x)
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        ChannelChain::process(self, buffer);
    }

    fn reset(&mut self) {
        self.low_cut.reset();
        self.peak.reset();
        self.high_cut.reset();
    }
}
