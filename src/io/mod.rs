//! Input/output helpers.
//!
//! - dashboard document normalization (`ingest`)
//! - dashboard view export (JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
