use serde::Serialize;
use tracing::debug;

use super::{or_default, round_to};
use crate::constants::DesignConstants;
use crate::equipment::{Cable, Conductor, Inverter, Panel};

/// Base ampacity used when the cable record has none (A).
pub const DEFAULT_IZ: f64 = 43.0;
/// Cross-section used when the cable record has none (mm²).
pub const DEFAULT_SECTION: f64 = 4.0;
/// Run length used when the cable record has none (m).
pub const DEFAULT_LENGTH: f64 = 10.0;

/// Corrected ampacity under the three installation scenarios (A).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrectedAmpacity {
    /// Cable tray exposed to sun, 80 °C.
    pub exposed_80c: f64,
    /// Cable tray shielded from sun, 50 °C.
    pub shielded_50c: f64,
    /// Buried, 25 °C.
    pub buried_25c: f64,
}

/// Derated ampacity and voltage drop for one cable run.
///
/// Currents and sections carry two decimals, `voltage_drop` four, and
/// `voltage_drop_pct` two.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CableSizing {
    /// Base ampacity used for the calculation (A).
    pub iz: f64,
    /// Cross-section used for the calculation (mm²).
    pub section: f64,
    /// Run length used for the calculation (m).
    pub length: f64,
    /// Corrected ampacity `Iz * K1 * K2 * K3 * K4` per scenario.
    pub corrected: CorrectedAmpacity,
    /// Absolute voltage drop (V).
    pub voltage_drop: f64,
    /// Voltage drop relative to the reference voltage (%).
    pub voltage_drop_pct: f64,
}

/// Cable dimensions with catalog defaults substituted for missing values.
struct EffectiveCable {
    iz: f64,
    section: f64,
    length: f64,
    resistivity: f64,
}

impl EffectiveCable {
    fn new(cable: &Cable, constants: &DesignConstants) -> Self {
        let resistivity = match cable.conductor {
            Conductor::Copper => constants.resistivity_cu,
            Conductor::Aluminium => constants.resistivity_al,
        };
        Self {
            iz: or_default(cable.iz, DEFAULT_IZ),
            section: or_default(cable.section, DEFAULT_SECTION),
            length: or_default(cable.length, DEFAULT_LENGTH),
            resistivity,
        }
    }

    fn corrected(&self, constants: &DesignConstants) -> CorrectedAmpacity {
        let base = self.iz * constants.base_correction();
        CorrectedAmpacity {
            exposed_80c: round_to(base * constants.k4_80c, 2),
            shielded_50c: round_to(base * constants.k4_50c, 2),
            buried_25c: round_to(base * constants.k4_25c, 2),
        }
    }

    fn sizing(&self, constants: &DesignConstants, drop: f64, drop_pct: f64) -> CableSizing {
        CableSizing {
            iz: round_to(self.iz, 2),
            section: round_to(self.section, 2),
            length: round_to(self.length, 2),
            corrected: self.corrected(constants),
            voltage_drop: round_to(drop, 4),
            voltage_drop_pct: round_to(drop_pct, 2),
        }
    }
}

/// Sizes a DC string cable carrying the panel's maximum-power current.
///
/// The drop covers the outgoing and return conductors and is expressed
/// against the module Vmp; a zero Vmp reports 0 %.
pub fn compute_dc_cable_sizing(
    cable: &Cable,
    panel: &Panel,
    constants: &DesignConstants,
) -> CableSizing {
    let eff = EffectiveCable::new(cable, constants);
    let drop = 2.0 * eff.resistivity * (eff.length / eff.section) * panel.current_at_pmax;
    let drop_pct = if panel.voltage_at_pmax == 0.0 {
        0.0
    } else {
        100.0 * drop / panel.voltage_at_pmax
    };
    debug!(
        iz = eff.iz,
        section = eff.section,
        length = eff.length,
        drop,
        drop_pct,
        "dc cable"
    );
    eff.sizing(constants, drop, drop_pct)
}

/// Sizes a single-phase AC cable carrying the inverter's maximum output
/// current.
///
/// The drop combines the resistive and reactive parts of the loop and is
/// expressed against the grid voltage, 230 V when the constant is zero.
pub fn compute_ac_cable_sizing(
    cable: &Cable,
    inverter: &Inverter,
    constants: &DesignConstants,
) -> CableSizing {
    let eff = EffectiveCable::new(cable, constants);
    let resistive = eff.resistivity * (eff.length / eff.section) * constants.cos_phi;
    let reactive = constants.lambda * eff.length * constants.sin_phi;
    let drop = 2.0 * (resistive + reactive) * inverter.max_output_current;
    let grid_voltage = or_default(constants.grid_voltage, 230.0);
    let drop_pct = 100.0 * drop / grid_voltage;
    debug!(
        iz = eff.iz,
        section = eff.section,
        length = eff.length,
        drop,
        drop_pct,
        "ac cable"
    );
    eff.sizing(constants, drop, drop_pct)
}
