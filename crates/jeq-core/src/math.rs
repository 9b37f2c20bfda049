//! Mathematical utility functions for DSP.
//!
//! Level conversions and denormal handling used by the filter stages and
//! the response evaluation. All functions are allocation-free and `no_std`.

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use jeq_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are floored so silence maps to -200 dB
/// instead of negative infinity.
///
/// # Example
/// ```rust
/// use jeq_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Flush values in the subnormal neighbourhood to zero.
///
/// IIR feedback paths decay toward zero forever during silence; once the
/// history drops into the subnormal range every multiply becomes very slow
/// on x86. Values below `1e-20` are inaudible (~ -400 dBFS).
///
/// Reference: IEEE 754-2008, Section 3.4 (Subnormal numbers)
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_conversions() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
        assert!((db_to_linear(-24.0) - 0.0630957).abs() < 1e-5);

        for db in [-24.0, -12.0, -0.5, 0.0, 6.0, 24.0] {
            let rt = linear_to_db(db_to_linear(db));
            assert!((rt - db).abs() < 1e-3, "{db} dB round-tripped to {rt}");
        }
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!(linear_to_db(0.0).is_finite());
        assert!((linear_to_db(0.0) + 200.0).abs() < 0.01);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-10), 1e-10);

        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-21), 0.0);
        assert_eq!(flush_denormal(1e-38), 0.0);
        assert_eq!(flush_denormal(0.0), 0.0);
    }
}
