//! Command-line options for the `pv-sizing` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ProjectConfig;
use crate::error::Result;

/// Preset used when neither `--project` nor `--preset` is given.
pub const DEFAULT_PRESET: &str = "residential";

/// Sizes a PV array, its protection devices and its cables.
#[derive(Parser, Debug)]
#[command(name = "pv-sizing", version)]
pub struct CliOptions {
    /// Load the project from a TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub project: Option<PathBuf>,
    /// Use a built-in preset (residential, reference_string)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,
    /// Override the project's panel count
    #[arg(long, value_name = "N")]
    pub panels: Option<u32>,
    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Also export the report as CSV
    #[arg(long, value_name = "PATH")]
    pub csv_out: Option<PathBuf>,
    /// Log intermediate quantities (same as RUST_LOG=pv_sizing=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format of the report on stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl CliOptions {
    /// Loads the selected project and applies command-line overrides.
    ///
    /// `--project` takes priority, then `--preset`, then the default preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the preset
    /// is unknown.
    pub fn load_project(&self) -> Result<ProjectConfig> {
        let mut project = match (&self.project, &self.preset) {
            (Some(path), _) => ProjectConfig::from_toml_file(path)?,
            (None, Some(name)) => ProjectConfig::from_preset(name)?,
            (None, None) => ProjectConfig::from_preset(DEFAULT_PRESET)?,
        };
        if let Some(panels) = self.panels {
            project.project.panel_count = panels;
        }
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<CliOptions, clap::Error> {
        CliOptions::try_parse_from(std::iter::once("pv-sizing").chain(args.iter().copied()))
    }

    #[test]
    fn supports_project_cli() {
        let opts = parse(&["--project", "roof.toml"]).expect("parse should succeed");
        assert_eq!(
            opts.project.as_deref().and_then(|p| p.to_str()),
            Some("roof.toml")
        );
        assert!(opts.preset.is_none());
        assert_eq!(opts.format, OutputFormat::Text);
    }

    #[test]
    fn supports_preset_and_overrides() {
        let opts = parse(&["--preset", "reference_string", "--panels", "12", "--format", "json"])
            .expect("parse should succeed");
        assert_eq!(opts.preset.as_deref(), Some("reference_string"));
        assert_eq!(opts.format, OutputFormat::Json);
        let project = opts.load_project().expect("preset should load");
        assert_eq!(project.project.panel_count, 12);
    }

    #[test]
    fn project_and_preset_are_mutually_exclusive() {
        assert!(parse(&["--project", "a.toml", "--preset", "residential"]).is_err());
    }

    #[test]
    fn defaults_to_residential_preset() {
        let opts = parse(&[]).expect("parse should succeed");
        let project = opts.load_project().expect("default preset should load");
        assert_eq!(project.project.panel_count, 20);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let opts = parse(&["--preset", "nope"]).expect("parse should succeed");
        assert!(opts.load_project().is_err());
    }

    #[test]
    fn rejects_unknown_argument() {
        assert!(parse(&["--bogus"]).is_err());
    }
}
