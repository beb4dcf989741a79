//! Error type for the edges of the crate: loading projects and writing
//! results. The calculators themselves never fail.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while loading a project or exporting a report.
#[derive(Debug, Error)]
pub enum Error {
    /// The project could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The project parsed but failed validation.
    #[error("project has {} invalid field(s)", .0.len())]
    Invalid(Vec<ConfigError>),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, pv_sizing::Error>`.
pub type Result<T> = std::result::Result<T, Error>;
