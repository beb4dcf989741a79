mod common;

use approx::assert_abs_diff_eq;
use pv_sizing::config::ProjectConfig;
use pv_sizing::equipment::{Cable, Inverter, Panel};
use pv_sizing::report::DesignReport;
use pv_sizing::sizing::{
    compute_ac_cable_sizing, compute_array_configuration, compute_dc_cable_sizing,
    compute_protection_sizing, compute_string_layout,
};

#[test]
fn standard_residential_string() {
    let array = compute_array_configuration(
        &common::reference_panel(),
        &common::reference_inverter(),
        10,
        &common::constants(),
    );

    assert_abs_diff_eq!(array.voc_cold, 44.06, epsilon = 1e-9);
    assert_eq!(array.max_series, 13);
    assert!(array.min_series <= array.optimal_series);
    assert!(array.optimal_series >= array.max_series);
}

#[test]
fn cable_derating_reports_all_three_installations() {
    let sizing = compute_dc_cable_sizing(
        &common::dc_cable(4.0, 25.0),
        &common::reference_panel(),
        &common::constants(),
    );

    assert_abs_diff_eq!(sizing.corrected.exposed_80c, 12.33, epsilon = 1e-9);
    assert_abs_diff_eq!(sizing.corrected.shielded_50c, 24.67, epsilon = 1e-9);
    assert_abs_diff_eq!(sizing.corrected.buried_25c, 31.28, epsilon = 1e-9);
    assert!(sizing.corrected.exposed_80c < sizing.corrected.shielded_50c);
    assert!(sizing.corrected.shielded_50c < sizing.corrected.buried_25c);
}

#[test]
fn protection_ratings_from_short_circuit_current() {
    let panel = Panel {
        short_circuit_current: 6.65,
        ..common::reference_panel()
    };
    let array = compute_array_configuration(
        &panel,
        &common::reference_inverter(),
        10,
        &common::constants(),
    );
    let protection = compute_protection_sizing(&panel, &array);

    assert_abs_diff_eq!(protection.fuse_current_rating, 9.14, epsilon = 1e-9);
    assert_abs_diff_eq!(protection.switch_current_rating, 8.31, epsilon = 1e-9);
    assert_eq!(protection.fuse_voltage_rating, array.voc_cold);
}

#[test]
fn degenerate_coefficients_and_zero_short_circuit_limit() {
    let panel = Panel {
        temp_coeff_voc: 0.0,
        temp_coeff_isc: 0.0,
        ..common::reference_panel()
    };
    let inverter = Inverter {
        max_short_circuit_current: 0.0,
        ..common::reference_inverter()
    };
    let array = compute_array_configuration(&panel, &inverter, 10, &common::constants());

    assert_eq!(array.max_parallel, 0);
    assert!(array.ratios.max_parallel.is_finite());
    assert_eq!(array.voc_cold, panel.open_circuit_voltage);
}

#[test]
fn empty_records_never_produce_nan_or_infinity() {
    let panel = Panel::default();
    let inverter = Inverter::default();
    let constants = common::constants();

    let array = compute_array_configuration(&panel, &inverter, 0, &constants);
    let protection = compute_protection_sizing(&panel, &array);
    let dc = compute_dc_cable_sizing(&Cable::default(), &panel, &constants);
    let ac = compute_ac_cable_sizing(&Cable::default(), &inverter, &constants);

    let values = [
        array.voc_cold,
        array.vmp_cold,
        array.vmp_hot,
        array.isc_hot,
        array.imp_hot,
        array.power_ratio,
        array.array_power,
        protection.fuse_current_rating,
        protection.max_strings_without_protection,
        protection.max_strings_with_protection,
        dc.voltage_drop,
        dc.voltage_drop_pct,
        ac.voltage_drop,
        ac.voltage_drop_pct,
    ];
    for v in values {
        assert!(v.is_finite(), "expected finite value, got {v}");
    }
}

#[test]
fn longer_cable_drops_more_voltage() {
    let panel = common::reference_panel();
    let constants = common::constants();
    let mut previous = 0.0;
    for length in [5.0, 10.0, 25.0, 50.0] {
        let sizing = compute_dc_cable_sizing(&common::dc_cable(4.0, length), &panel, &constants);
        assert!(sizing.voltage_drop > previous);
        previous = sizing.voltage_drop;
    }
}

#[test]
fn reports_are_idempotent() {
    for name in ProjectConfig::PRESETS {
        let cfg = ProjectConfig::from_preset(name).expect("preset should load");
        assert_eq!(DesignReport::from_config(&cfg), DesignReport::from_config(&cfg));
    }
}

#[test]
fn scenario_files_match_presets() {
    for name in ["residential", "reference_string"] {
        let path = format!("{}/scenarios/{name}.toml", env!("CARGO_MANIFEST_DIR"));
        let from_file = ProjectConfig::from_toml_file(std::path::Path::new(&path))
            .expect("scenario file should parse");
        let from_preset = ProjectConfig::from_preset(name).expect("preset should load");
        assert!(from_file.validate().is_empty());
        assert_eq!(
            DesignReport::from_config(&from_file),
            DesignReport::from_config(&from_preset),
            "scenarios/{name}.toml drifted from the preset"
        );
    }
}

#[test]
fn hot_roof_derates_harder() {
    let path = format!("{}/scenarios/hot_roof.toml", env!("CARGO_MANIFEST_DIR"));
    let hot = ProjectConfig::from_toml_file(std::path::Path::new(&path))
        .expect("scenario file should parse");
    assert!(hot.validate().is_empty());

    let hot = DesignReport::from_config(&hot);
    let reference = DesignReport::from_config(&ProjectConfig::reference_string());
    assert!(hot.dc_cable.corrected.exposed_80c < reference.dc_cable.corrected.exposed_80c);
    assert!(hot.array.vmp_hot < reference.array.vmp_hot);
    assert!(hot.array.min_series >= reference.array.min_series);
}

#[test]
fn string_layout_respects_array_bounds() {
    let panel = common::reference_panel();
    let inverter = common::reference_inverter();
    for panel_count in 0..40 {
        let array = compute_array_configuration(&panel, &inverter, panel_count, &common::constants());
        let layout = compute_string_layout(panel_count, &array);

        assert!(layout.wired_panels <= panel_count);
        assert_eq!(layout.wired_panels, layout.series_per_string * layout.parallel_strings);
        assert_eq!(layout.fits, panel_count > 0 && layout.wired_panels == panel_count);
        if layout.wired_panels > 0 {
            assert!((array.min_series..=array.max_series).contains(&layout.series_per_string));
            assert!(layout.parallel_strings <= array.max_parallel);
        }
    }
}
