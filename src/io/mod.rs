//! File output for design reports.

pub mod export;
