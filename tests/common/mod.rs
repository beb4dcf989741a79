//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use pv_sizing::constants::DesignConstants;
use pv_sizing::equipment::{Cable, Inverter, Panel};

/// Generic 40 V / 9.5 A module (-0.29 %/°C Voc, 0.05 %/°C Isc).
pub fn reference_panel() -> Panel {
    Panel {
        power: 300.0,
        open_circuit_voltage: 40.0,
        short_circuit_current: 9.5,
        voltage_at_pmax: 33.0,
        current_at_pmax: 9.0,
        temp_coeff_voc: -0.29,
        temp_coeff_isc: 0.05,
        max_series_fuse_rating: 15.0,
        ..Panel::default()
    }
}

/// 600 V / 150 V window, 20 A short-circuit limit, 3 kW nominal.
pub fn reference_inverter() -> Inverter {
    Inverter {
        max_input_voltage: 600.0,
        min_input_voltage: 150.0,
        max_input_current: 11.0,
        max_short_circuit_current: 20.0,
        min_input_current: 2.0,
        nominal_output_power: 3000.0,
        max_output_current: 14.3,
        ..Inverter::default()
    }
}

/// Copper DC cable rated 40 A.
pub fn dc_cable(section: f64, length: f64) -> Cable {
    Cable {
        iz: 40.0,
        section,
        length,
        ..Cable::default()
    }
}

/// Default design constants (K1=1, K2=0.94, K3=0.80, -10..85 °C).
pub fn constants() -> DesignConstants {
    DesignConstants::default()
}
