use serde::Serialize;
use tracing::{debug, warn};

use super::thermal::ThermalDerating;
use super::{guarded_ratio, or_default, round_to};
use crate::constants::DesignConstants;
use crate::equipment::{Inverter, Panel};

/// Lower bound of the accepted array/inverter power ratio.
pub const POWER_RATIO_MIN: f64 = 0.9;
/// Upper bound of the accepted array/inverter power ratio.
pub const POWER_RATIO_MAX: f64 = 1.3;

/// Unrounded real-valued ratios behind the integer string counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizingRatios {
    pub max_series: f64,
    pub optimal_series: f64,
    pub min_series: f64,
    pub max_parallel: f64,
    pub optimal_parallel: f64,
}

/// String and parallel bounds for one panel/inverter pairing.
///
/// Voltages, currents, `power_ratio` and `array_power` are rounded to two
/// decimal places. Series maxima round down, the series minimum rounds up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayConfiguration {
    /// Open-circuit voltage at the cold extreme (V).
    pub voc_cold: f64,
    /// Maximum-power voltage at the cold extreme (V).
    pub vmp_cold: f64,
    /// Maximum-power voltage at the hot extreme (V).
    pub vmp_hot: f64,
    /// Short-circuit current at the hot extreme (A).
    pub isc_hot: f64,
    /// Maximum-power current at the hot extreme (A).
    pub imp_hot: f64,
    /// Hard ceiling on panels per string.
    pub max_series: u32,
    /// Panels per string sized on the maximum-power voltage.
    pub optimal_series: u32,
    /// Floor on panels per string to stay inside the MPPT window.
    pub min_series: u32,
    /// Ceiling on parallel strings from the inverter short-circuit rating.
    pub max_parallel: u32,
    /// Soft parallel-string count.
    pub optimal_parallel: u32,
    /// Real-valued ratios before rounding.
    pub ratios: SizingRatios,
    /// Array power over inverter nominal AC power.
    pub power_ratio: f64,
    /// Total array power (W).
    pub array_power: f64,
    /// Power compatibility flag.
    pub is_compatible: bool,
}

/// Derives string sizing bounds and power matching for an array of
/// `panel_count` panels feeding `inverter`.
///
/// Never fails: a zero denominator yields a ratio of 1, and a zero inverter
/// limit is replaced by 1 before dividing.
pub fn compute_array_configuration(
    panel: &Panel,
    inverter: &Inverter,
    panel_count: u32,
    constants: &DesignConstants,
) -> ArrayConfiguration {
    let thermal = ThermalDerating::new(panel, constants);
    debug!(beta = thermal.beta, alpha = thermal.alpha, "temperature coefficients");

    let voc_cold = thermal.voc_cold(panel);
    let vmp_cold = thermal.vmp_cold(panel);
    let vmp_hot = thermal.vmp_hot(panel);
    let isc_hot = thermal.isc_hot(panel);
    let imp_hot = thermal.imp_hot(panel);
    debug!(voc_cold, vmp_cold, vmp_hot, isc_hot, imp_hot, "derated panel ratings");

    let ratios = SizingRatios {
        max_series: guarded_ratio(inverter.max_input_voltage, voc_cold),
        optimal_series: guarded_ratio(inverter.max_input_voltage, vmp_cold),
        min_series: guarded_ratio(inverter.min_input_voltage, vmp_hot),
        max_parallel: guarded_ratio(inverter.max_short_circuit_current, isc_hot),
        optimal_parallel: guarded_ratio(inverter.min_input_current, imp_hot),
    };
    debug!(?ratios, "unrounded sizing ratios");

    if voc_cold == 0.0 || isc_hot == 0.0 {
        warn!("panel has zero Voc or Isc; string bounds fall back to unit ratios");
    }

    let array_power = f64::from(panel_count) * panel.power;
    let power_ratio = array_power / or_default(inverter.nominal_output_power, 1.0);
    let is_compatible = power_ratio >= POWER_RATIO_MIN || power_ratio <= POWER_RATIO_MAX;
    debug!(panel_count, array_power, power_ratio, is_compatible, "power matching");

    if !(POWER_RATIO_MIN..=POWER_RATIO_MAX).contains(&power_ratio) {
        warn!(
            power_ratio,
            "array/inverter power ratio outside {POWER_RATIO_MIN}..={POWER_RATIO_MAX}"
        );
    }

    ArrayConfiguration {
        voc_cold: round_to(voc_cold, 2),
        vmp_cold: round_to(vmp_cold, 2),
        vmp_hot: round_to(vmp_hot, 2),
        isc_hot: round_to(isc_hot, 2),
        imp_hot: round_to(imp_hot, 2),
        max_series: floor_count(ratios.max_series),
        optimal_series: floor_count(ratios.optimal_series),
        min_series: ceil_count(ratios.min_series),
        max_parallel: floor_count(ratios.max_parallel),
        optimal_parallel: floor_count(ratios.optimal_parallel),
        ratios,
        power_ratio: round_to(power_ratio, 2),
        array_power: round_to(array_power, 2),
        is_compatible,
    }
}

// `as` saturates: negatives and NaN map to 0.
fn floor_count(ratio: f64) -> u32 {
    ratio.floor().max(0.0) as u32
}

fn ceil_count(ratio: f64) -> u32 {
    ratio.ceil().max(0.0) as u32
}
