//! Data layer for the Contacta dashboard.
//!
//! Reads the semicolon-delimited contracts and interviews spreadsheets into
//! typed tables, filters contracts by area and computes the aggregates the
//! dashboard charts are drawn from.

pub mod aggregator;
pub mod filter;
pub mod interviews;
pub mod loader;

pub use contacta_core as core;
