//! Data source access (local file or HTTP).

pub mod client;

pub use client::{DashboardClient, DataSource, SOURCE_ENV_VAR};
