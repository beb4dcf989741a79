//! Electrical sizing calculators.
//!
//! Each calculator is a pure function of its inputs. Denominators that can
//! legitimately be zero on incomplete catalog data are guarded so that every
//! output stays finite.

/// Array string/parallel bounds and power matching.
pub mod array;
/// DC and AC cable derating and voltage drop.
pub mod cable;
/// Splitting the panel count into parallel strings.
pub mod layout;
/// Overcurrent and overvoltage protection ratings.
pub mod protection;
/// Temperature multipliers derived from panel coefficients.
pub mod thermal;

pub use array::{ArrayConfiguration, SizingRatios, compute_array_configuration};
pub use cable::{CableSizing, CorrectedAmpacity, compute_ac_cable_sizing, compute_dc_cable_sizing};
pub use layout::{StringLayout, compute_string_layout};
pub use protection::{
    AcProtectionSizing, ProtectionSizing, compute_ac_protection_sizing, compute_protection_sizing,
};
pub use thermal::ThermalDerating;

/// Rounds `value` to `places` decimal places, mapping non-finite values to 0.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

/// Returns `value`, or `fallback` when `value` is zero.
pub(crate) fn or_default(value: f64, fallback: f64) -> f64 {
    if value == 0.0 { fallback } else { value }
}

/// Divides `numerator` by `denominator` with the catalog guard rules.
///
/// A zero denominator yields a ratio of 1. Otherwise a zero numerator is
/// replaced by 1 before dividing.
pub(crate) fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 1.0;
    }
    or_default(numerator, 1.0) / denominator
}

/// Divides by `denominator`, substituting 1 when it is zero.
pub(crate) fn safe_div(numerator: f64, denominator: f64) -> f64 {
    numerator / or_default(denominator, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_two_and_four_places() {
        assert_eq!(round_to(9.144_375, 2), 9.14);
        assert_eq!(round_to(0.123_456, 4), 0.1235);
        assert_eq!(round_to(-1.005_1, 2), -1.01);
    }

    #[test]
    fn round_to_maps_non_finite_to_zero() {
        assert_eq!(round_to(f64::NAN, 2), 0.0);
        assert_eq!(round_to(f64::INFINITY, 2), 0.0);
    }

    #[test]
    fn guarded_ratio_zero_denominator_is_one() {
        assert_eq!(guarded_ratio(600.0, 0.0), 1.0);
        assert_eq!(guarded_ratio(0.0, 0.0), 1.0);
    }

    #[test]
    fn guarded_ratio_zero_numerator_becomes_one() {
        assert_eq!(guarded_ratio(0.0, 4.0), 0.25);
    }

    #[test]
    fn safe_div_substitutes_unit_denominator() {
        assert_eq!(safe_div(16.0, 0.0), 16.0);
        assert_eq!(safe_div(16.0, 4.0), 4.0);
    }
}
