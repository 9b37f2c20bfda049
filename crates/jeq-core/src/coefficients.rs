//! Biquad coefficient design.
//!
//! Turns human-facing filter settings (cutoff, Q, gain, slope order) into
//! normalized second-order IIR coefficients. Everything here is a pure
//! function of its inputs: no state, no allocation, and all transcendental
//! math happens once per design call, never per sample.
//!
//! Formulas follow the RBJ Audio EQ Cookbook. The cut filters realise a
//! Butterworth response of order `2 * sections` by cascading RBJ high/low-pass
//! sections whose Q values are the Butterworth pole-pair qualities:
//!
//! ```text
//! Q_k = 1 / (2 cos((2k + 1) π / (2N)))     k = 0 .. N/2 - 1,  N = 2 * sections
//! ```
//!
//! Design math runs in `f64` and is rounded to `f32` once at the end, so
//! low cutoffs at high sample rates keep their precision and identical
//! inputs always produce bit-identical coefficients.

use core::f64::consts::PI;
use libm::{cos, pow, sin, sqrt};

/// Maximum number of second-order sections in a cut filter cascade.
pub const MAX_SECTIONS: usize = 4;

/// Lowest frequency accepted by the designers. Lower requests are clamped.
pub const MIN_FREQUENCY_HZ: f32 = 1.0;

/// Highest design frequency as a fraction of the sample rate.
///
/// 95% of Nyquist. A 20 kHz cutoff at a low host sample rate would otherwise
/// land on or past Nyquist and produce unstable coefficients.
pub const MAX_FREQUENCY_RATIO: f32 = 0.475;

/// Smallest Q accepted by the designers.
pub const MIN_Q: f32 = 0.01;

/// Peak gain limit in dB (either direction).
pub const MAX_GAIN_DB: f32 = 24.0;

/// Normalized biquad coefficients (`a0 == 1`).
///
/// Implements the transfer function:
/// ```text
///         b0 + b1 z^-1 + b2 z^-2
/// H(z) = ------------------------
///          1 + a1 z^-1 + a2 z^-2
/// ```
///
/// Coefficient sets are small `Copy` values. A [`FilterStage`](crate::FilterStage)
/// swaps in a whole new set at once; sets are never edited field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward coefficient for x[n].
    pub b0: f32,
    /// Feedforward coefficient for x[n-1].
    pub b1: f32,
    /// Feedforward coefficient for x[n-2].
    pub b2: f32,
    /// Feedback coefficient for y[n-1].
    pub a1: f32,
    /// Feedback coefficient for y[n-2].
    pub a2: f32,
}

impl Coefficients {
    /// Passthrough coefficients: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Normalizes raw cookbook coefficients by `a0` and rounds to `f32`.
    fn from_raw(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: (b0 * a0_inv) as f32,
            b1: (b1 * a0_inv) as f32,
            b2: (b2 * a0_inv) as f32,
            a1: (a1 * a0_inv) as f32,
            a2: (a2 * a0_inv) as f32,
        }
    }

    /// Linear magnitude of the frequency response at `frequency` Hz.
    ///
    /// Evaluates `|H(e^{jω})|` in closed form. Not meant for the audio
    /// thread; used for response curves and verification.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        let w = 2.0 * PI * f64::from(frequency) / f64::from(sample_rate);
        let (c1, s1) = (cos(w), sin(w));
        let (c2, s2) = (cos(2.0 * w), sin(2.0 * w));

        let b0 = f64::from(self.b0);
        let b1 = f64::from(self.b1);
        let b2 = f64::from(self.b2);
        let a1 = f64::from(self.a1);
        let a2 = f64::from(self.a2);

        let num_re = b0 + b1 * c1 + b2 * c2;
        let num_im = -(b1 * s1 + b2 * s2);
        let den_re = 1.0 + a1 * c1 + a2 * c2;
        let den_im = -(a1 * s1 + a2 * s2);

        let num = num_re * num_re + num_im * num_im;
        let den = (den_re * den_re + den_im * den_im).max(1e-30);
        sqrt(num / den) as f32
    }

    /// Magnitude of the frequency response at `frequency` Hz, in dB.
    pub fn magnitude_db_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        crate::linear_to_db(self.magnitude_at(frequency, sample_rate))
    }

    /// Returns `true` if both poles lie strictly inside the unit circle.
    ///
    /// Stability triangle for `1 + a1 z^-1 + a2 z^-2`:
    /// `|a2| < 1` and `|a1| < 1 + a2`.
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Coefficient sets for a cut filter cascade.
///
/// Fixed capacity of [`MAX_SECTIONS`]; only the first [`order`](Self::order)
/// entries are meaningful. Kept as a plain array so designing a cascade on
/// the audio thread never touches the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutCoefficients {
    sections: [Coefficients; MAX_SECTIONS],
    order: usize,
}

impl CutCoefficients {
    /// A cascade of `order` passthrough sections.
    pub fn identity(order: usize) -> Self {
        Self {
            sections: [Coefficients::IDENTITY; MAX_SECTIONS],
            order: order.clamp(1, MAX_SECTIONS),
        }
    }

    /// Number of active second-order sections (1..=4).
    pub fn order(&self) -> usize {
        self.order
    }

    /// The active sections, in processing order.
    pub fn as_slice(&self) -> &[Coefficients] {
        &self.sections[..self.order]
    }

    /// Section `index`, or `None` past the active order.
    pub fn get(&self, index: usize) -> Option<&Coefficients> {
        self.as_slice().get(index)
    }

    /// Combined linear magnitude of all active sections at `frequency` Hz.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        self.as_slice()
            .iter()
            .map(|c| c.magnitude_at(frequency, sample_rate))
            .product()
    }
}

/// Clamps a design frequency into `[MIN_FREQUENCY_HZ, MAX_FREQUENCY_RATIO * fs]`.
///
/// The Nyquist cap always wins: at very low sample rates the floor drops
/// below it so the result stays strictly inside `(0, fs / 2)`. Non-finite
/// requests fall back to the lower bound. The real-time path cannot report
/// errors, so an out-of-range cutoff is corrected, not rejected.
#[inline]
pub fn clamp_frequency(frequency: f32, sample_rate: f32) -> f32 {
    let max = sample_rate * MAX_FREQUENCY_RATIO;
    let min = MIN_FREQUENCY_HZ.min(max * 0.5);
    if frequency.is_finite() {
        frequency.clamp(min, max)
    } else {
        min
    }
}

#[inline]
fn clamp_q(q: f32) -> f32 {
    if q.is_finite() { q.max(MIN_Q) } else { 1.0 }
}

#[inline]
fn clamp_gain_db(gain_db: f32) -> f32 {
    if gain_db.is_finite() {
        gain_db.clamp(-MAX_GAIN_DB, MAX_GAIN_DB)
    } else {
        0.0
    }
}

#[inline]
fn valid_sample_rate(sample_rate: f32) -> bool {
    sample_rate.is_finite() && sample_rate > 0.0
}

/// Designs a peak (bell) filter.
///
/// Boosts or cuts `gain_db` around `frequency`, bandwidth set by `q`.
/// Response is exactly unity at DC and at Nyquist, and exactly
/// `10^(gain_db/20)` at the center frequency.
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `q` - Quality factor (higher = narrower)
/// * `gain_db` - Boost (positive) or cut (negative) in dB, clamped to ±24
/// * `sample_rate` - Sample rate in Hz
///
/// An invalid sample rate yields [`Coefficients::IDENTITY`].
///
/// # Example
///
/// ```rust
/// use jeq_core::make_peak_filter;
///
/// let c = make_peak_filter(1000.0, 1.0, 6.0, 48000.0);
/// assert!((c.magnitude_db_at(1000.0, 48000.0) - 6.0).abs() < 0.01);
/// ```
pub fn make_peak_filter(frequency: f32, q: f32, gain_db: f32, sample_rate: f32) -> Coefficients {
    if !valid_sample_rate(sample_rate) {
        return Coefficients::IDENTITY;
    }
    let frequency = clamp_frequency(frequency, sample_rate);
    let q = f64::from(clamp_q(q));
    let gain_db = f64::from(clamp_gain_db(gain_db));

    let a = pow(10.0, gain_db / 40.0); // sqrt(10^(dB/20))
    let omega = 2.0 * PI * f64::from(frequency) / f64::from(sample_rate);
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);

    Coefficients::from_raw(
        1.0 + alpha * a,
        -2.0 * cos_omega,
        1.0 - alpha * a,
        1.0 + alpha / a,
        -2.0 * cos_omega,
        1.0 - alpha / a,
    )
}

#[derive(Clone, Copy)]
enum CutKind {
    Highpass,
    Lowpass,
}

fn cut_section(kind: CutKind, omega: f64, q: f64) -> Coefficients {
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    match kind {
        CutKind::Highpass => {
            let b = (1.0 + cos_omega) / 2.0;
            Coefficients::from_raw(b, -(1.0 + cos_omega), b, a0, a1, a2)
        }
        CutKind::Lowpass => {
            let b = (1.0 - cos_omega) / 2.0;
            Coefficients::from_raw(b, 1.0 - cos_omega, b, a0, a1, a2)
        }
    }
}

fn butterworth_q_f64(index: usize, sections: usize) -> f64 {
    let n = 2.0 * sections as f64;
    let angle = (2.0 * index as f64 + 1.0) * PI / (2.0 * n);
    1.0 / (2.0 * cos(angle))
}

/// Q of section `index` in a Butterworth cascade of `sections` biquads.
pub fn butterworth_q(index: usize, sections: usize) -> f32 {
    butterworth_q_f64(index, sections) as f32
}

fn design_cascade(kind: CutKind, frequency: f32, sample_rate: f32, order: usize) -> CutCoefficients {
    let mut out = CutCoefficients::identity(order);
    if !valid_sample_rate(sample_rate) {
        return out;
    }
    let frequency = clamp_frequency(frequency, sample_rate);
    let omega = 2.0 * PI * f64::from(frequency) / f64::from(sample_rate);
    let sections = out.order;

    for (k, slot) in out.sections[..sections].iter_mut().enumerate() {
        *slot = cut_section(kind, omega, butterworth_q_f64(k, sections));
    }
    out
}

/// Designs a Butterworth high-pass (low-cut) cascade.
///
/// Total filter order is `2 * order`, i.e. 12 dB/oct per section.
/// Returns exactly `order` coefficient sets; `order` is clamped to `1..=4`.
///
/// An invalid sample rate yields passthrough sections.
///
/// # Example
///
/// ```rust
/// use jeq_core::make_highpass_cascade;
///
/// let cascade = make_highpass_cascade(100.0, 48000.0, 3);
/// assert_eq!(cascade.as_slice().len(), 3);
/// ```
pub fn make_highpass_cascade(frequency: f32, sample_rate: f32, order: usize) -> CutCoefficients {
    design_cascade(CutKind::Highpass, frequency, sample_rate, order)
}

/// Designs a Butterworth low-pass (high-cut) cascade.
///
/// Mirror of [`make_highpass_cascade`].
pub fn make_lowpass_cascade(frequency: f32, sample_rate: f32, order: usize) -> CutCoefficients {
    design_cascade(CutKind::Lowpass, frequency, sample_rate, order)
}
