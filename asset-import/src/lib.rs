//! Spreadsheet bulk import for an asset register
//!
//! [`import`] holds the pipeline and its stages, [`api`] the HTTP asset
//! store, and [`config`] the settings plus the SQLite import history.

pub mod api;
pub mod cli;
pub mod config;
pub mod import;
