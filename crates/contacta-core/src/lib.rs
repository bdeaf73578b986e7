//! Shared types for the Contacta dashboard.
//!
//! Record models, the fatal/non-fatal error taxonomy, the area code → label
//! mapping, day-first date parsing, CLI settings and number formatting.

pub mod area_labels;
pub mod dates;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
