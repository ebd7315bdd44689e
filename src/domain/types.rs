//! Shared domain types.
//!
//! Everything here is a read-only projection of one fetched document. Values are
//! rebuilt wholesale on every load and never mutated in place afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Default trailing window (calendar months) for monthly aggregation.
pub const DEFAULT_WINDOW_MONTHS: usize = 12;

/// Largest window accepted on the command line (100 years).
pub const MAX_WINDOW_MONTHS: u64 = 1200;

/// Data source used when nothing else is configured.
pub const DATA_JSON_URL: &str = "data/crawling_data.json";

/// One freight/shipping index series group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum IndexFamily {
    #[serde(rename = "KCCI")]
    Kcci,
    #[serde(rename = "SCFI")]
    Scfi,
    #[serde(rename = "WCI")]
    Wci,
    #[serde(rename = "IACI")]
    Iaci,
    #[serde(rename = "BLANK_SAILING")]
    #[value(alias = "blank_sailing")]
    BlankSailing,
    #[serde(rename = "FBX")]
    Fbx,
    #[serde(rename = "XSI")]
    Xsi,
    #[serde(rename = "MBCI")]
    Mbci,
}

impl IndexFamily {
    /// Display order used by the dashboard.
    pub const ALL: [IndexFamily; 8] = [
        IndexFamily::Kcci,
        IndexFamily::Scfi,
        IndexFamily::Wci,
        IndexFamily::Iaci,
        IndexFamily::BlankSailing,
        IndexFamily::Fbx,
        IndexFamily::Xsi,
        IndexFamily::Mbci,
    ];

    /// Section key used in `chart_data` / `table_data`.
    pub fn key(self) -> &'static str {
        match self {
            IndexFamily::Kcci => "KCCI",
            IndexFamily::Scfi => "SCFI",
            IndexFamily::Wci => "WCI",
            IndexFamily::Iaci => "IACI",
            IndexFamily::BlankSailing => "BLANK_SAILING",
            IndexFamily::Fbx => "FBX",
            IndexFamily::Xsi => "XSI",
            IndexFamily::Mbci => "MBCI",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key.trim())
    }

    pub fn display_name(self) -> &'static str {
        match self {
            IndexFamily::Kcci => "KCCI",
            IndexFamily::Scfi => "SCFI",
            IndexFamily::Wci => "WCI",
            IndexFamily::Iaci => "IACI",
            IndexFamily::BlankSailing => "Blank Sailing",
            IndexFamily::Fbx => "FBX",
            IndexFamily::Xsi => "XSI",
            IndexFamily::Mbci => "MBCI",
        }
    }

    pub fn chart_kind(self) -> ChartKind {
        match self {
            IndexFamily::BlankSailing => ChartKind::StackedMonthly,
            _ => ChartKind::Line,
        }
    }
}

impl fmt::Display for IndexFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a family is charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// One time-series line per route.
    Line,
    /// Monthly buckets, one stacked bar segment per route.
    StackedMonthly,
}

/// One time-stamped observation from a family's raw series.
///
/// A field present with `None` was null (or non-numeric) in the feed; it still
/// counts as an observed field name for aggregation purposes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeriesPoint {
    pub date: NaiveDate,
    pub fields: BTreeMap<String, Option<f64>>,
}

impl RawSeriesPoint {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: Option<f64>) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    /// Finite numeric value for `field`, if any.
    pub fn value(&self, field: &str) -> Option<f64> {
        self.fields
            .get(field)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }
}

/// A scalar table cell as it appears in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty_text(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Week-over-week change attached to a summary row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyChange {
    #[serde(default, deserialize_with = "lenient_cell")]
    pub value: Option<CellValue>,
    #[serde(default, deserialize_with = "lenient_cell")]
    pub percentage: Option<CellValue>,
    #[serde(default, deserialize_with = "lenient_cell")]
    pub color_class: Option<String>,
}

/// Latest two-point snapshot for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// `<familyPrefix>_<HumanReadableRouteName>`.
    pub route: String,
    /// An empty string here means the row has no data to chart.
    #[serde(default, deserialize_with = "lenient_cell")]
    pub current_index: Option<CellValue>,
    #[serde(default, deserialize_with = "lenient_cell")]
    pub previous_index: Option<CellValue>,
    #[serde(default, deserialize_with = "lenient_cell")]
    pub weekly_change: Option<WeeklyChange>,
    /// Any further columns, addressed by normalized header name.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Decode an optional table cell; a cell of the wrong shape becomes `None`
/// so only the row's `route` decides whether the row survives.
fn lenient_cell<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(cell = %value, error = %e, "ignoring malformed table cell");
            Ok(None)
        }
    }
}

impl SummaryRow {
    pub fn new(route: impl Into<String>, current_index: Option<CellValue>) -> Self {
        Self {
            route: route.into(),
            current_index,
            previous_index: None,
            weekly_change: None,
            extra: BTreeMap::new(),
        }
    }

    /// Route name with the family prefix removed.
    pub fn display_route(&self) -> String {
        crate::routes::route_display_name(&self.route)
    }

    /// False only for the empty-string sentinel.
    pub fn has_current_data(&self) -> bool {
        !self
            .current_index
            .as_ref()
            .is_some_and(CellValue::is_empty_text)
    }
}

/// A family's summary table: column headers plus rows in feed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    pub headers: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

/// One calendar month's synthesized observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPoint {
    /// First day of the month.
    pub date: NaiveDate,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<f64>>,
}

impl AggregatedPoint {
    pub fn value(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied().flatten()
    }
}

/// Output of monthly aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAggregation {
    pub aggregated_data: Vec<AggregatedPoint>,
    pub monthly_labels: Vec<NaiveDate>,
}

impl MonthlyAggregation {
    pub fn is_empty(&self) -> bool {
        self.aggregated_data.is_empty()
    }
}

/// Fill/border pair assigned to one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesColor {
    pub fill: &'static str,
    pub border: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: NaiveDate,
    pub y: f64,
}

/// One route's chart-ready line series (nulls already removed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlottedSeries {
    pub label: String,
    pub points: Vec<SeriesPoint>,
    pub color: SeriesColor,
}

/// One route's segment series for a stacked monthly chart.
///
/// `values` is aligned index-for-index with the aggregation's `monthly_labels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyDataset {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub color: SeriesColor,
}

/// Dates shown in the `Current Index` / `Previous Index` headers (`MM-DD-YYYY`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderDates {
    pub current_index_date: String,
    pub previous_index_date: String,
}

/// How a missing `previous_index` is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingValueDisplay {
    /// Render a `-` placeholder.
    #[default]
    Dash,
    /// Render nothing.
    Omit,
}

impl MissingValueDisplay {
    pub fn placeholder(self) -> &'static str {
        match self {
            MissingValueDisplay::Dash => "-",
            MissingValueDisplay::Omit => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRatePoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Current Los Angeles conditions as published in `weather_data.current`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(rename = "LA_Temperature", default)]
    pub temperature: Option<CellValue>,
    #[serde(rename = "LA_WeatherStatus", default)]
    pub status: Option<String>,
    #[serde(rename = "LA_Humidity", default)]
    pub humidity: Option<CellValue>,
    #[serde(rename = "LA_WindSpeed", default)]
    pub wind_speed: Option<CellValue>,
    #[serde(rename = "LA_Pressure", default)]
    pub pressure: Option<CellValue>,
    #[serde(rename = "LA_Visibility", default)]
    pub visibility: Option<CellValue>,
    #[serde(rename = "LA_Sunrise", default)]
    pub sunrise: Option<String>,
    #[serde(rename = "LA_Sunset", default)]
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub min_temp: Option<CellValue>,
    #[serde(default)]
    pub max_temp: Option<CellValue>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSection {
    #[serde(default)]
    pub current: CurrentWeather,
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
}

/// A run's configuration as understood by the pipeline.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// URL (`http://`, `https://`) or local file path of the document.
    pub source: String,
    /// Versioned route-key table; the built-in table is used when absent.
    pub route_map: Option<PathBuf>,
    pub window_months: usize,
    pub missing_previous: MissingValueDisplay,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DATA_JSON_URL.to_string(),
            route_map: None,
            window_months: DEFAULT_WINDOW_MONTHS,
            missing_previous: MissingValueDisplay::Dash,
        }
    }
}
