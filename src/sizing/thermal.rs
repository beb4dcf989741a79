use crate::constants::{DesignConstants, STC_TEMPERATURE_C};
use crate::equipment::Panel;

/// Linear temperature multipliers for one panel model.
///
/// Panel ratings are given at 25 °C. The cold multiplier (at `t_min`) raises
/// voltages and bounds the longest safe string; the hot multipliers (at
/// `t_max`) lower voltages and raise currents.
///
/// A zero coefficient yields a multiplier of exactly 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalDerating {
    /// Fractional voltage change per °C (`temp_coeff_voc / 100`).
    pub beta: f64,
    /// Fractional current change per °C (`temp_coeff_isc / 100`).
    pub alpha: f64,
    /// Voltage multiplier at the design minimum temperature.
    pub cold_voltage: f64,
    /// Voltage multiplier at the design maximum temperature.
    pub hot_voltage: f64,
    /// Current multiplier at the design maximum temperature.
    pub hot_current: f64,
}

impl ThermalDerating {
    /// Builds the multipliers for `panel` at the temperatures in `constants`.
    pub fn new(panel: &Panel, constants: &DesignConstants) -> Self {
        let beta = panel.temp_coeff_voc / 100.0;
        let alpha = panel.temp_coeff_isc / 100.0;
        let cold_delta = constants.t_min - STC_TEMPERATURE_C;
        let hot_delta = constants.t_max - STC_TEMPERATURE_C;

        Self {
            beta,
            alpha,
            cold_voltage: 1.0 + beta * cold_delta,
            hot_voltage: 1.0 + beta * hot_delta,
            hot_current: 1.0 + alpha * hot_delta,
        }
    }

    /// Open-circuit voltage at the cold extreme.
    pub fn voc_cold(&self, panel: &Panel) -> f64 {
        panel.open_circuit_voltage * self.cold_voltage
    }

    /// Maximum-power voltage at the cold extreme.
    pub fn vmp_cold(&self, panel: &Panel) -> f64 {
        panel.voltage_at_pmax * self.cold_voltage
    }

    /// Maximum-power voltage at the hot extreme.
    pub fn vmp_hot(&self, panel: &Panel) -> f64 {
        panel.voltage_at_pmax * self.hot_voltage
    }

    /// Short-circuit current at the hot extreme.
    pub fn isc_hot(&self, panel: &Panel) -> f64 {
        panel.short_circuit_current * self.hot_current
    }

    /// Maximum-power current at the hot extreme.
    pub fn imp_hot(&self, panel: &Panel) -> f64 {
        panel.current_at_pmax * self.hot_current
    }
}
