//! Runtime layer for the Contacta dashboard.
//!
//! Holds the file-signature table cache and the dashboard session that turns
//! an area selection into chart-ready snapshots.

pub mod dashboard;
pub mod data_manager;

pub use contacta_core as core;
pub use contacta_data as data;
