//! Chart dataset construction.
//!
//! Joins a family's summary rows against its raw series through the
//! route-key table. Each row either becomes one `PlottedSeries` or is skipped
//! with a recorded reason; skips never affect other rows.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    ExchangeRatePoint, IndexFamily, PlottedSeries, RawSeriesPoint, SeriesPoint, SummaryRow,
};
use crate::routes::{Resolution, RouteKeyTable};

mod color;
mod dates;
mod monthly;

pub use color::{ColorCursor, EXCHANGE_RATE_COLOR};
pub use dates::{format_header_date, format_raw_header_date, header_dates};
pub use monthly::build_monthly_datasets;

pub const EXCHANGE_RATE_LABEL: &str = "USD/KRW Exchange Rate";

/// Severity of a skip decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalLevel {
    Info,
    Warn,
}

/// Why a summary row produced no dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Route is mapped to null on purpose.
    Unchartable,
    /// Route is missing from the family's route map.
    Unmapped,
    /// `current_index` carries the empty-string sentinel.
    NoCurrentData,
    /// Route is mapped but the raw series has no values for the field.
    NoDataPoints { field: String },
}

impl SkipReason {
    pub fn level(&self) -> SignalLevel {
        match self {
            SkipReason::Unchartable => SignalLevel::Info,
            SkipReason::Unmapped | SkipReason::NoCurrentData | SkipReason::NoDataPoints { .. } => {
                SignalLevel::Warn
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SkipReason::Unchartable => "mapped to null (no chart expected)".to_string(),
            SkipReason::Unmapped => "no route mapping".to_string(),
            SkipReason::NoCurrentData => "current index is empty".to_string(),
            SkipReason::NoDataPoints { field } => format!("no data points for '{field}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRoute {
    /// Route name with the family prefix removed.
    pub route: String,
    pub reason: SkipReason,
}

/// Datasets for one family plus the rows that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetBuild {
    pub datasets: Vec<PlottedSeries>,
    pub skipped: Vec<SkippedRoute>,
}

/// Build one line series per summary row, in row order.
///
/// Rows are skipped when their route is mapped to null, unmapped, has an
/// empty `current_index`, or maps to a field with no values in `series`.
/// Duplicate labels are kept as-is.
pub fn build_datasets(
    family: IndexFamily,
    series: &[RawSeriesPoint],
    rows: &[SummaryRow],
    routes: &RouteKeyTable,
    colors: &mut ColorCursor,
) -> DatasetBuild {
    let mut build = DatasetBuild::default();

    for row in rows {
        let route = row.display_route();

        let field = match routes.resolve(family, &route) {
            Resolution::Unchartable => {
                info!(%family, route = %row.route, "route mapped to null; no chart dataset expected");
                build.skipped.push(SkippedRoute {
                    route,
                    reason: SkipReason::Unchartable,
                });
                continue;
            }
            Resolution::NotFound => {
                warn!(%family, route = %row.route, "no route mapping; skipping dataset");
                build.skipped.push(SkippedRoute {
                    route,
                    reason: SkipReason::Unmapped,
                });
                continue;
            }
            Resolution::Field(field) => field,
        };

        if !row.has_current_data() {
            warn!(%family, route = %row.route, "current index is empty; skipping dataset");
            build.skipped.push(SkippedRoute {
                route,
                reason: SkipReason::NoCurrentData,
            });
            continue;
        }

        let points: Vec<SeriesPoint> = series
            .iter()
            .filter_map(|p| p.value(field).map(|y| SeriesPoint { x: p.date, y }))
            .collect();

        if points.is_empty() {
            warn!(%family, route = %route, field, "no valid data points; skipping dataset");
            build.skipped.push(SkippedRoute {
                route,
                reason: SkipReason::NoDataPoints {
                    field: field.to_string(),
                },
            });
            continue;
        }

        debug!(%family, route = %route, field, points = points.len(), "built dataset");
        build.datasets.push(PlottedSeries {
            label: route,
            points,
            color: colors.next_color(),
        });
    }

    build
}

/// The exchange-rate history as a single line series.
pub fn exchange_rate_series(points: &[ExchangeRatePoint]) -> PlottedSeries {
    PlottedSeries {
        label: EXCHANGE_RATE_LABEL.to_string(),
        points: points
            .iter()
            .filter(|p| p.rate.is_finite())
            .map(|p| SeriesPoint {
                x: p.date,
                y: p.rate,
            })
            .collect(),
        color: EXCHANGE_RATE_COLOR,
    }
}

/// Rate of the last usable entry. Entries without a parseable date or a
/// finite rate are dropped at ingest, so a malformed final entry falls back
/// to the one before it.
pub fn current_exchange_rate(points: &[ExchangeRatePoint]) -> Option<f64> {
    points.last().map(|p| p.rate).filter(|r| r.is_finite())
}
