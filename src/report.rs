//! Full design report for one project: array bounds, protection ratings and
//! cable sizing computed together.

use std::fmt;

use serde::Serialize;

use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::sizing::{
    AcProtectionSizing, ArrayConfiguration, CableSizing, ProtectionSizing, StringLayout,
    compute_ac_cable_sizing, compute_ac_protection_sizing, compute_array_configuration,
    compute_dc_cable_sizing, compute_protection_sizing, compute_string_layout, round_to,
};

/// Every derived figure for a project, recomputed from scratch on each call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignReport {
    /// Project name from the configuration.
    pub project: String,
    /// Number of panels the array was sized for.
    pub panel_count: u32,
    /// String and parallel bounds.
    pub array: ArrayConfiguration,
    /// Split of the panels into parallel strings.
    pub layout: StringLayout,
    /// DC protection device ratings.
    pub protection: ProtectionSizing,
    /// AC main disconnect ratings.
    pub ac_protection: AcProtectionSizing,
    /// DC string cable.
    pub dc_cable: CableSizing,
    /// AC cable from the inverter to the AC box.
    pub ac_cable: CableSizing,
    /// AC cable from the AC box to the grid connection, when configured.
    pub ac_cable_secondary: Option<CableSizing>,
    /// Combined AC voltage drop over both runs (%).
    pub ac_total_voltage_drop_pct: f64,
}

impl DesignReport {
    /// Runs all calculators for `config`.
    ///
    /// No validation happens here; see [`DesignReport::from_validated`].
    pub fn from_config(config: &ProjectConfig) -> Self {
        let c = &config.constants;
        let panel_count = config.project.panel_count;

        let array = compute_array_configuration(&config.panel, &config.inverter, panel_count, c);
        let layout = compute_string_layout(panel_count, &array);
        let protection = compute_protection_sizing(&config.panel, &array);
        let ac_protection =
            compute_ac_protection_sizing(&config.inverter, config.project.inverter_count);
        let dc_cable = compute_dc_cable_sizing(&config.dc_cable, &config.panel, c);
        let ac_cable = compute_ac_cable_sizing(&config.ac_cable, &config.inverter, c);
        let ac_cable_secondary = config
            .ac_cable_secondary
            .as_ref()
            .map(|cable| compute_ac_cable_sizing(cable, &config.inverter, c));

        let secondary_pct = ac_cable_secondary
            .as_ref()
            .map_or(0.0, |s| s.voltage_drop_pct);
        let ac_total_voltage_drop_pct =
            round_to(ac_cable.voltage_drop_pct + secondary_pct, 2);

        Self {
            project: config.project.name.clone(),
            panel_count,
            array,
            layout,
            protection,
            ac_protection,
            dc_cable,
            ac_cable,
            ac_cable_secondary,
            ac_total_voltage_drop_pct,
        }
    }

    /// Validates `config` and runs all calculators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] with every failed constraint.
    pub fn from_validated(config: &ProjectConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(Error::Invalid(errors));
        }
        Ok(Self::from_config(config))
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn write_cable(f: &mut fmt::Formatter<'_>, label: &str, c: &CableSizing) -> fmt::Result {
    writeln!(
        f,
        "{label:<22} {:.2} mm², {:.2} m, Iz {:.2} A",
        c.section, c.length, c.iz
    )?;
    writeln!(
        f,
        "  Iz' 80/50/25 °C:     {:.2} / {:.2} / {:.2} A",
        c.corrected.exposed_80c, c.corrected.shielded_50c, c.corrected.buried_25c
    )?;
    writeln!(
        f,
        "  Voltage drop:        {:.4} V ({:.2}%)",
        c.voltage_drop, c.voltage_drop_pct
    )
}

impl fmt::Display for DesignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.array;
        let p = &self.protection;

        writeln!(f, "--- Design Report: {} ---", self.project)?;
        writeln!(f, "Panels:                {}", self.panel_count)?;
        writeln!(f, "Array power:           {:.2} W", a.array_power)?;
        writeln!(
            f,
            "Power ratio:           {:.2} (compatible: {})",
            a.power_ratio, a.is_compatible
        )?;
        writeln!(f, "Voc at Tmin:           {:.2} V", a.voc_cold)?;
        writeln!(f, "Vmp at Tmin:           {:.2} V", a.vmp_cold)?;
        writeln!(f, "Vmp at Tmax:           {:.2} V", a.vmp_hot)?;
        writeln!(f, "Isc at Tmax:           {:.2} A", a.isc_hot)?;
        writeln!(f, "Imp at Tmax:           {:.2} A", a.imp_hot)?;
        writeln!(
            f,
            "Series panels:         min {} / optimal {} / max {}",
            a.min_series, a.optimal_series, a.max_series
        )?;
        writeln!(
            f,
            "Parallel strings:      optimal {} / max {}",
            a.optimal_parallel, a.max_parallel
        )?;
        let l = &self.layout;
        writeln!(
            f,
            "String layout:         {} x {} = {} panels ({})",
            l.parallel_strings,
            l.series_per_string,
            l.wired_panels,
            if l.fits { "fits" } else { "does not fit" }
        )?;
        writeln!(f)?;
        writeln!(f, "Fuse voltage rating:   {:.2} V", p.fuse_voltage_rating)?;
        writeln!(f, "Fuse current rating:   {:.2} A", p.fuse_current_rating)?;
        writeln!(f, "Switch current rating: {:.2} A", p.switch_current_rating)?;
        writeln!(f, "Surge Voc max:         {:.2} V", p.voc_max)?;
        writeln!(f, "Surge Isc max:         {:.2} A", p.isc_max)?;
        writeln!(
            f,
            "Strings w/o protection: {:.2}",
            p.max_strings_without_protection
        )?;
        writeln!(
            f,
            "Strings per protection: {:.2}",
            p.max_strings_with_protection
        )?;
        let ac = &self.ac_protection;
        writeln!(
            f,
            "AC switch rating:      {:.2} A, {:.2} V ({} inverter(s))",
            ac.switch_current_rating, ac.switch_voltage_rating, ac.inverter_count
        )?;
        writeln!(f)?;
        write_cable(f, "DC cable:", &self.dc_cable)?;
        write_cable(f, "AC cable:", &self.ac_cable)?;
        if let Some(secondary) = &self.ac_cable_secondary {
            write_cable(f, "AC cable (grid side):", secondary)?;
        }
        write!(
            f,
            "AC total voltage drop: {:.2}%",
            self.ac_total_voltage_drop_pct
        )
    }
}
