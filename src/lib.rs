//! Electrical sizing for grid-tied photovoltaic arrays.
//!
//! Given a panel, an inverter, a panel count and cable selections, the crate
//! derives string/parallel bounds, protection device ratings and cable
//! ampacity/voltage-drop figures. The calculators in [`sizing`] are pure
//! functions; [`config`], [`report`] and [`io`] wrap them for file-driven use.

pub mod cli;
pub mod config;
pub mod constants;
pub mod equipment;
mod error;
pub mod io;
pub mod report;
/// Thermal, array, protection and cable calculators.
pub mod sizing;

pub use error::{Error, Result};
