//! `freight-dash` library crate.
//!
//! The binary (`fdash`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the view model is reusable by other front-ends (web, TUI, exports)
//! - code stays easy to navigate as the project grows

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod data;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod routes;
