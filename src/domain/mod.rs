//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - index families and chart kinds (`IndexFamily`, `ChartKind`)
//! - raw feed records (`RawSeriesPoint`, `SummaryRow`, `SummaryTable`)
//! - derived chart data (`AggregatedPoint`, `PlottedSeries`, `MonthlyDataset`)
//! - run configuration (`DashboardConfig`)

pub mod types;

pub use types::*;
