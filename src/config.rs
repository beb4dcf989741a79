//! TOML-based project configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{DesignConstants, STC_TEMPERATURE_C};
use crate::equipment::{Cable, Inverter, Panel};

/// Top-level project configuration parsed from TOML.
///
/// All sections have defaults. Load from TOML with
/// [`ProjectConfig::from_toml_file`] or start from a preset with
/// [`ProjectConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project identification and array layout.
    #[serde(default)]
    pub project: ProjectSection,
    /// Selected panel model.
    #[serde(default)]
    pub panel: Panel,
    /// Selected inverter model.
    #[serde(default)]
    pub inverter: Inverter,
    /// String cable from the array to the inverter.
    #[serde(default)]
    pub dc_cable: Cable,
    /// AC cable from the inverter to the AC box.
    #[serde(default = "default_ac_cable")]
    pub ac_cable: Cable,
    /// Optional second AC run, from the AC box to the grid connection.
    #[serde(default)]
    pub ac_cable_secondary: Option<Cable>,
    /// Design constants overriding the defaults.
    #[serde(default)]
    pub constants: DesignConstants,
}

/// Project identification and array layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSection {
    /// Project or customer name.
    pub name: String,
    /// Total number of panels in the array.
    pub panel_count: u32,
    /// Identical inverters sharing the AC main disconnect.
    pub inverter_count: u32,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
            panel_count: 1,
            inverter_count: 1,
        }
    }
}

fn default_ac_cable() -> Cable {
    Cable {
        ac: true,
        ..Cable::default()
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"inverter.min_input_voltage"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ProjectConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["residential", "reference_string"];

    /// Returns the residential preset: twenty 370 W modules on a 7.6 kW
    /// single-phase inverter.
    pub fn residential() -> Self {
        Self {
            project: ProjectSection {
                name: "Sunnydale Residential".to_string(),
                panel_count: 20,
                inverter_count: 1,
            },
            panel: Panel {
                maker: "SunPower".to_string(),
                model: "SPR-X22-370".to_string(),
                power: 370.0,
                open_circuit_voltage: 69.5,
                short_circuit_current: 6.65,
                voltage_at_pmax: 61.8,
                current_at_pmax: 6.02,
                temp_coeff_voc: -0.25,
                temp_coeff_isc: 0.05,
                max_series_fuse_rating: 15.0,
            },
            inverter: Inverter {
                maker: "SolarEdge".to_string(),
                model: "SE7600H-US".to_string(),
                max_input_voltage: 480.0,
                min_input_voltage: 150.0,
                max_input_current: 20.0,
                max_short_circuit_current: 45.0,
                min_input_current: 1.0,
                nominal_output_power: 7600.0,
                max_output_power: 7600.0,
                max_output_current: 32.0,
                output_voltage: 240.0,
            },
            dc_cable: Cable {
                maker: "Southwire".to_string(),
                iz: 40.0,
                section: 5.26,
                length: 120.0,
                ..Cable::default()
            },
            ac_cable: Cable {
                maker: "General Cable".to_string(),
                iz: 55.0,
                section: 8.36,
                length: 30.0,
                ac: true,
                ..Cable::default()
            },
            ac_cable_secondary: None,
            constants: DesignConstants::default(),
        }
    }

    /// Returns the reference string preset: a generic 40 V module on a
    /// 600 V inverter, with a second AC run to the grid connection.
    pub fn reference_string() -> Self {
        Self {
            project: ProjectSection {
                name: "Reference string".to_string(),
                panel_count: 10,
                inverter_count: 1,
            },
            panel: Panel {
                power: 300.0,
                open_circuit_voltage: 40.0,
                short_circuit_current: 9.5,
                voltage_at_pmax: 33.0,
                current_at_pmax: 9.0,
                temp_coeff_voc: -0.29,
                temp_coeff_isc: 0.05,
                max_series_fuse_rating: 15.0,
                ..Panel::default()
            },
            inverter: Inverter {
                max_input_voltage: 600.0,
                min_input_voltage: 150.0,
                max_input_current: 11.0,
                max_short_circuit_current: 20.0,
                min_input_current: 2.0,
                nominal_output_power: 3000.0,
                max_output_power: 3300.0,
                max_output_current: 14.3,
                output_voltage: 230.0,
                ..Inverter::default()
            },
            dc_cable: Cable {
                iz: 40.0,
                section: 4.0,
                length: 25.0,
                ..Cable::default()
            },
            ac_cable: Cable {
                iz: 32.0,
                section: 6.0,
                length: 15.0,
                ac: true,
                ..Cable::default()
            },
            ac_cable_secondary: Some(Cable {
                iz: 32.0,
                section: 6.0,
                length: 20.0,
                ac: true,
                ..Cable::default()
            }),
            constants: DesignConstants::default(),
        }
    }

    /// Loads a project from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "residential" => Ok(Self::residential()),
            "reference_string" => Ok(Self::reference_string()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a project from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("project", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a project from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// The calculators accept anything; this is the catalog-side check for
    /// values that are physically meaningless rather than merely missing.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.project.inverter_count == 0 {
            errors.push(ConfigError::new("project.inverter_count", "must be >= 1"));
        }

        let p = &self.panel;
        for (field, value) in [
            ("panel.power", p.power),
            ("panel.open_circuit_voltage", p.open_circuit_voltage),
            ("panel.short_circuit_current", p.short_circuit_current),
            ("panel.voltage_at_pmax", p.voltage_at_pmax),
            ("panel.current_at_pmax", p.current_at_pmax),
            ("panel.max_series_fuse_rating", p.max_series_fuse_rating),
        ] {
            check_non_negative(&mut errors, field, value);
        }
        if p.voltage_at_pmax > p.open_circuit_voltage {
            errors.push(ConfigError::new(
                "panel.voltage_at_pmax",
                "must be <= panel.open_circuit_voltage",
            ));
        }

        let inv = &self.inverter;
        for (field, value) in [
            ("inverter.max_input_voltage", inv.max_input_voltage),
            ("inverter.min_input_voltage", inv.min_input_voltage),
            ("inverter.max_input_current", inv.max_input_current),
            ("inverter.max_short_circuit_current", inv.max_short_circuit_current),
            ("inverter.min_input_current", inv.min_input_current),
            ("inverter.nominal_output_power", inv.nominal_output_power),
            ("inverter.max_output_power", inv.max_output_power),
            ("inverter.max_output_current", inv.max_output_current),
            ("inverter.output_voltage", inv.output_voltage),
        ] {
            check_non_negative(&mut errors, field, value);
        }
        let window_missing = inv.min_input_voltage == 0.0 && inv.max_input_voltage == 0.0;
        if !window_missing && inv.min_input_voltage >= inv.max_input_voltage {
            errors.push(ConfigError::new(
                "inverter.min_input_voltage",
                "must be < inverter.max_input_voltage",
            ));
        }

        check_cable(&mut errors, "dc_cable", &self.dc_cable, false);
        check_cable(&mut errors, "ac_cable", &self.ac_cable, true);
        if let Some(secondary) = &self.ac_cable_secondary {
            check_cable(&mut errors, "ac_cable_secondary", secondary, true);
        }

        let c = &self.constants;
        for (field, value) in [
            ("constants.k1", c.k1),
            ("constants.k2", c.k2),
            ("constants.k3", c.k3),
            ("constants.k4_80c", c.k4_80c),
            ("constants.k4_50c", c.k4_50c),
            ("constants.k4_25c", c.k4_25c),
            ("constants.resistivity_cu", c.resistivity_cu),
            ("constants.resistivity_al", c.resistivity_al),
            ("constants.grid_voltage", c.grid_voltage),
        ] {
            if value <= 0.0 {
                errors.push(ConfigError::new(field, "must be > 0"));
            }
        }
        for (field, value) in [
            ("constants.sin_phi", c.sin_phi),
            ("constants.cos_phi", c.cos_phi),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigError::new(field, "must be in [0.0, 1.0]"));
            }
        }
        check_non_negative(&mut errors, "constants.lambda", c.lambda);
        if c.t_min >= STC_TEMPERATURE_C {
            errors.push(ConfigError::new("constants.t_min", "must be < 25"));
        }
        if c.t_max <= STC_TEMPERATURE_C {
            errors.push(ConfigError::new("constants.t_max", "must be > 25"));
        }

        errors
    }
}

fn check_non_negative(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if value < 0.0 || !value.is_finite() {
        errors.push(ConfigError::new(field, "must be a finite value >= 0"));
    }
}

fn check_cable(errors: &mut Vec<ConfigError>, prefix: &str, cable: &Cable, ac: bool) {
    check_non_negative(errors, &format!("{prefix}.iz"), cable.iz);
    check_non_negative(errors, &format!("{prefix}.length"), cable.length);
    check_non_negative(errors, &format!("{prefix}.section"), cable.section);
    if cable.ac != ac {
        let expected = if ac { "an AC" } else { "a DC" };
        errors.push(ConfigError::new(
            format!("{prefix}.ac"),
            format!("must describe {expected} cable"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residential_preset_valid() {
        let cfg = ProjectConfig::residential();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "residential should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = ProjectConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
        assert!(e.to_string().starts_with("config error: preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ProjectConfig::PRESETS {
            let cfg = ProjectConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[project]
name = "Roof A"
panel_count = 14

[panel]
maker = "Acme"
model = "AC-400"
power = 400.0
open_circuit_voltage = 49.2
short_circuit_current = 10.4
voltage_at_pmax = 41.0
current_at_pmax = 9.76
temp_coeff_voc = -0.27
temp_coeff_isc = 0.048
max_series_fuse_rating = 20.0

[inverter]
max_input_voltage = 1000.0
min_input_voltage = 200.0
max_short_circuit_current = 30.0
min_input_current = 1.5
nominal_output_power = 5000.0
max_output_current = 22.0

[dc_cable]
iz = 44.0
section = 6.0
length = 40.0

[ac_cable]
iz = 40.0
section = 6.0
length = 12.0
ac = true
conductor = "aluminium"

[constants]
k3 = 0.71
"#;
        let cfg = ProjectConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.project.panel_count), Some(14));
        assert_eq!(cfg.as_ref().map(|c| c.constants.k3), Some(0.71));
        assert_eq!(cfg.as_ref().map(|c| c.constants.k2), Some(0.94));
        assert!(cfg.as_ref().is_some_and(|c| c.ac_cable_secondary.is_none()));
        assert!(cfg.as_ref().is_some_and(|c| c.validate().is_empty()));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[project]
panel_count = 10
bogus_field = true
"#;
        assert!(ProjectConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ProjectConfig::from_toml_str("[project]\npanel_count = 8\n");
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.project.panel_count), Some(8));
        assert_eq!(cfg.as_ref().map(|c| c.project.name.as_str()), Some("untitled"));
        // AC cable section absent: still flagged as an AC run.
        assert_eq!(cfg.as_ref().map(|c| c.ac_cable.ac), Some(true));
    }

    #[test]
    fn partial_project_validates() {
        let cfg = ProjectConfig::from_toml_str("[project]\npanel_count = 8\n");
        assert!(cfg.is_ok());
        let errors = cfg.map(|c| c.validate()).unwrap_or_default();
        assert!(errors.is_empty(), "partial project should be valid: {errors:?}");
    }

    #[test]
    fn inverter_count_defaults_to_one() {
        let cfg = ProjectConfig::from_toml_str("[project]\ninverter_count = 3\n");
        assert_eq!(cfg.as_ref().map(|c| c.project.inverter_count).ok(), Some(3));
        let cfg = ProjectConfig::from_toml_str("[project]\nname = \"x\"\n");
        assert_eq!(cfg.as_ref().map(|c| c.project.inverter_count).ok(), Some(1));
    }

    #[test]
    fn validation_rejects_zero_inverter_count() {
        let mut cfg = ProjectConfig::residential();
        cfg.project.inverter_count = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "project.inverter_count"));
    }

    #[test]
    fn validation_catches_inverted_mppt_window() {
        let mut cfg = ProjectConfig::residential();
        cfg.inverter.min_input_voltage = 500.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "inverter.min_input_voltage"));
    }

    #[test]
    fn validation_catches_negative_length() {
        let mut cfg = ProjectConfig::residential();
        cfg.dc_cable.length = -3.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "dc_cable.length"));
    }

    #[test]
    fn validation_catches_swapped_cable_kind() {
        let mut cfg = ProjectConfig::residential();
        cfg.ac_cable.ac = false;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "ac_cable.ac"));
    }

    #[test]
    fn validation_catches_bad_power_factor() {
        let mut cfg = ProjectConfig::residential();
        cfg.constants.cos_phi = 1.2;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "constants.cos_phi"));
    }

    #[test]
    fn validation_catches_inverted_design_temperatures() {
        let mut cfg = ProjectConfig::residential();
        cfg.constants.t_min = 30.0;
        cfg.constants.t_max = 20.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "constants.t_min"));
        assert!(errors.iter().any(|e| e.field == "constants.t_max"));
    }

    #[test]
    fn validation_allows_incomplete_panel_record() {
        let mut cfg = ProjectConfig::residential();
        cfg.panel.temp_coeff_voc = 0.0;
        cfg.panel.max_series_fuse_rating = 0.0;
        assert!(cfg.validate().is_empty());
    }
}
