use serde::Serialize;
use tracing::{debug, warn};

use super::array::ArrayConfiguration;
use super::{or_default, round_to, safe_div};
use crate::equipment::{Inverter, Panel};

/// Module mismatch factor applied to the fuse current.
pub const MISMATCH_FACTOR: f64 = 1.1;
/// Continuous-duty factor applied to short-circuit currents.
pub const CONTINUOUS_DUTY_FACTOR: f64 = 1.25;
/// Margin on the open-circuit voltage for device voltage ratings.
pub const VOC_SAFETY_FACTOR: f64 = 1.2;

/// DC protection device ratings for one panel model.
///
/// All values are rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectionSizing {
    /// Minimum fuse voltage rating, the array's cold open-circuit voltage (V).
    pub fuse_voltage_rating: f64,
    /// Minimum fuse current rating, `Isc * 1.1 * 1.25` (A).
    pub fuse_current_rating: f64,
    /// Minimum DC switch current rating, `Isc * 1.25` (A).
    pub switch_current_rating: f64,
    /// Surge protector continuous voltage floor, `Voc * 1.2` (V).
    pub voc_max: f64,
    /// Surge protector short-circuit withstand floor, `Isc * 1.25` (A).
    pub isc_max: f64,
    /// Parallel strings allowed without string overcurrent protection.
    pub max_strings_without_protection: f64,
    /// Parallel strings allowed per protection device.
    pub max_strings_with_protection: f64,
}

/// Derives protection device ratings from the panel nameplate and the array
/// configuration's cold open-circuit voltage.
pub fn compute_protection_sizing(panel: &Panel, array: &ArrayConfiguration) -> ProtectionSizing {
    let isc = panel.short_circuit_current;
    let irm = panel.max_series_fuse_rating;

    if isc == 0.0 || panel.current_at_pmax == 0.0 {
        warn!("panel has zero Isc or Imp; parallel string limits divide by 1");
    }

    let max_strings_without_protection = safe_div(1.0 + irm, isc);
    let max_strings_with_protection = 0.5 * (1.0 + safe_div(irm, panel.current_at_pmax));
    debug!(
        max_strings_without_protection,
        max_strings_with_protection, "parallel string limits"
    );

    ProtectionSizing {
        fuse_voltage_rating: array.voc_cold,
        fuse_current_rating: round_to(isc * MISMATCH_FACTOR * CONTINUOUS_DUTY_FACTOR, 2),
        switch_current_rating: round_to(isc * CONTINUOUS_DUTY_FACTOR, 2),
        voc_max: round_to(panel.open_circuit_voltage * VOC_SAFETY_FACTOR, 2),
        isc_max: round_to(isc * CONTINUOUS_DUTY_FACTOR, 2),
        max_strings_without_protection: round_to(max_strings_without_protection, 2),
        max_strings_with_protection: round_to(max_strings_with_protection, 2),
    }
}

/// AC main disconnect ratings for the inverters of a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcProtectionSizing {
    /// Inverters feeding the disconnect.
    pub inverter_count: u32,
    /// Minimum switch voltage rating, the inverter output voltage (V).
    pub switch_voltage_rating: f64,
    /// Minimum switch current rating, `inverter_count * max_output_current` (A).
    pub switch_current_rating: f64,
}

/// Sizes the AC main disconnect shared by `inverter_count` identical
/// inverters. A count of 0 is treated as a single inverter.
pub fn compute_ac_protection_sizing(
    inverter: &Inverter,
    inverter_count: u32,
) -> AcProtectionSizing {
    let count = or_default(f64::from(inverter_count), 1.0);
    AcProtectionSizing {
        inverter_count: inverter_count.max(1),
        switch_voltage_rating: round_to(inverter.output_voltage, 2),
        switch_current_rating: round_to(count * inverter.max_output_current, 2),
    }
}
