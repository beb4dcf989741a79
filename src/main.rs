//! pv-sizing entry point: CLI wiring, logging setup and report output.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pv_sizing::cli::{CliOptions, OutputFormat};
use pv_sizing::io::export::export_csv;
use pv_sizing::report::DesignReport;
use pv_sizing::{Error, Result};

fn init_tracing(verbose: bool) {
    let default = if verbose { "pv_sizing=debug" } else { "pv_sizing=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &CliOptions) -> Result<()> {
    let project = cli.load_project()?;
    info!(
        project = %project.project.name,
        panels = project.project.panel_count,
        "sizing project"
    );

    let report = DesignReport::from_validated(&project)?;
    match cli.format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(path) = &cli.csv_out {
        export_csv(&report, path)?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = CliOptions::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Invalid(errors)) => {
            for e in &errors {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
