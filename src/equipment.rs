//! Equipment records supplied by the catalog: panels, inverters and cables.
//!
//! Numeric fields default to zero when absent so that partially filled
//! catalog entries still flow through the calculators.

use serde::{Deserialize, Serialize};

/// A solar panel model rated at Standard Test Conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Panel {
    /// Manufacturer name.
    pub maker: String,
    /// Model reference.
    pub model: String,
    /// Rated power (W).
    pub power: f64,
    /// Open-circuit voltage, Voc (V).
    pub open_circuit_voltage: f64,
    /// Short-circuit current, Isc (A).
    pub short_circuit_current: f64,
    /// Voltage at maximum power point, Vmp (V).
    pub voltage_at_pmax: f64,
    /// Current at maximum power point, Imp (A).
    pub current_at_pmax: f64,
    /// Voltage temperature coefficient (%/°C, typically negative).
    pub temp_coeff_voc: f64,
    /// Current temperature coefficient (%/°C).
    pub temp_coeff_isc: f64,
    /// Maximum series fuse rating, IRM (A).
    pub max_series_fuse_rating: f64,
}

/// A grid-tied string inverter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Inverter {
    /// Manufacturer name.
    pub maker: String,
    /// Model reference.
    pub model: String,
    /// Maximum DC input voltage (V).
    pub max_input_voltage: f64,
    /// Minimum DC input voltage, lower edge of the MPPT window (V).
    pub min_input_voltage: f64,
    /// Maximum DC input current (A).
    pub max_input_current: f64,
    /// Maximum DC short-circuit current (A).
    pub max_short_circuit_current: f64,
    /// Minimum DC input current (A).
    pub min_input_current: f64,
    /// Nominal AC output power (W).
    pub nominal_output_power: f64,
    /// Maximum AC output power (W).
    pub max_output_power: f64,
    /// Maximum AC output current (A).
    pub max_output_current: f64,
    /// Nominal AC output voltage (V).
    pub output_voltage: f64,
}

/// Conductor material of a cable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conductor {
    #[default]
    Copper,
    Aluminium,
}

/// A cable run between two points of the installation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Cable {
    /// Manufacturer name.
    pub maker: String,
    /// Base ampacity at reference conditions, Iz (A).
    pub iz: f64,
    /// Cross-sectional area (mm²).
    pub section: f64,
    /// Run length (m).
    pub length: f64,
    /// `true` for AC runs, `false` for DC runs.
    pub ac: bool,
    /// Conductor material.
    pub conductor: Conductor,
}
