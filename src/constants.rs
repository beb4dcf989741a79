//! Physical constants and derating factors shared by the calculators.

use serde::{Deserialize, Serialize};

/// Reference cell temperature of the Standard Test Conditions (°C).
pub const STC_TEMPERATURE_C: f64 = 25.0;

/// Design constants passed explicitly into every calculator call.
///
/// All fields have defaults matching the usual low-voltage design practice.
/// Override individual fields with struct update syntax or from the
/// `[constants]` section of a project file.
///
/// # Examples
///
/// ```
/// use pv_sizing::constants::DesignConstants;
///
/// let hot_roof = DesignConstants {
///     k3: 0.71,
///     ..DesignConstants::default()
/// };
/// assert_eq!(hot_roof.k2, 0.94);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignConstants {
    /// Installation method factor.
    pub k1: f64,
    /// Circuit grouping factor.
    pub k2: f64,
    /// Ambient temperature factor.
    pub k3: f64,
    /// Cable tray exposed to sun (80 °C).
    pub k4_80c: f64,
    /// Cable tray shielded from sun (50 °C).
    pub k4_50c: f64,
    /// Buried cable (25 °C).
    pub k4_25c: f64,
    /// Copper resistivity (Ω·mm²/m).
    pub resistivity_cu: f64,
    /// Aluminium resistivity (Ω·mm²/m).
    pub resistivity_al: f64,
    /// Grid voltage used as the AC voltage-drop reference (V).
    pub grid_voltage: f64,
    /// Load power factor, reactive part.
    pub sin_phi: f64,
    /// Load power factor, resistive part.
    pub cos_phi: f64,
    /// Linear reactance factor of the AC conductor.
    pub lambda: f64,
    /// Design minimum ambient temperature (°C).
    pub t_min: f64,
    /// Design maximum cell temperature (°C).
    pub t_max: f64,
}

impl Default for DesignConstants {
    fn default() -> Self {
        Self {
            k1: 1.0,
            k2: 0.94,
            k3: 0.80,
            k4_80c: 0.41,
            k4_50c: 0.82,
            k4_25c: 1.04,
            resistivity_cu: 0.0168,
            resistivity_al: 0.0237,
            grid_voltage: 230.0,
            sin_phi: 0.6,
            cos_phi: 0.8,
            lambda: 0.8,
            t_min: -10.0,
            t_max: 85.0,
        }
    }
}

impl DesignConstants {
    /// Product of the fixed correction factors `K1 * K2 * K3`.
    pub fn base_correction(&self) -> f64 {
        self.k1 * self.k2 * self.k3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let c = DesignConstants::default();
        assert_eq!(c.t_min, -10.0);
        assert_eq!(c.t_max, 85.0);
        assert_eq!(c.grid_voltage, 230.0);
        assert_eq!(c.resistivity_cu, 0.0168);
        assert_eq!(c.resistivity_al, 0.0237);
    }

    #[test]
    fn base_correction_multiplies_fixed_factors() {
        let c = DesignConstants::default();
        assert!((c.base_correction() - 0.752).abs() < 1e-12);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c: DesignConstants = toml::from_str("k3 = 0.71").expect("should parse");
        assert_eq!(c.k3, 0.71);
        assert_eq!(c.k2, 0.94);
    }

    #[test]
    fn unknown_constant_rejected() {
        let result: Result<DesignConstants, _> = toml::from_str("k5 = 1.0");
        assert!(result.is_err());
    }
}
