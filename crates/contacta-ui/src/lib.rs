//! Terminal UI layer for the Contacta dashboard.
//!
//! Provides themes, the header, bar and picker components, the two dashboard
//! pages and the main application event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod interviews_view;
pub mod table_view;
pub mod themes;

pub use contacta_core as core;
