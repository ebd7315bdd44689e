//! Dashboard document ingest and normalization.
//!
//! This module turns the fetched JSON document into a `DashboardDataModel`.
//!
//! Design goals:
//! - **Lenient shape**: every top-level section and every family defaults to
//!   empty when absent or malformed; a broken family never aborts the load
//! - **One canonical shape**: both the flat and the nested revisions of
//!   `chart_data` / `table_data` are normalized here and nowhere else
//! - **Row-level validation**: unusable points/rows are dropped and logged
//! - **Deterministic behavior**: series are sorted by date (stable)

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{
    ExchangeRatePoint, IndexFamily, RawSeriesPoint, SummaryRow, SummaryTable, WeatherSection,
};

/// One family's raw series and summary table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyData {
    /// Sorted by date ascending.
    pub series: Vec<RawSeriesPoint>,
    pub table: SummaryTable,
}

impl FamilyData {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.table.is_empty()
    }
}

/// The parsed document. Every family is always present (possibly empty).
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardDataModel {
    families: BTreeMap<IndexFamily, FamilyData>,
    pub weather: WeatherSection,
    pub exchange_rate: Vec<ExchangeRatePoint>,
    /// False when `chart_data` was absent or had no sections at all.
    pub has_chart_data: bool,
}

/// `chart_data[family]` in either revision.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChartSection {
    Flat(Vec<Value>),
    Nested { chart_data: Vec<Value> },
}

impl ChartSection {
    fn into_points(self) -> Vec<Value> {
        match self {
            ChartSection::Flat(points) | ChartSection::Nested { chart_data: points } => points,
        }
    }
}

/// `table_data[family]`; rows live under `rows` or `table_rows`.
#[derive(Debug, Default, Deserialize)]
struct TableSection {
    #[serde(default)]
    headers: Vec<String>,
    #[serde(default)]
    rows: Option<Vec<Value>>,
    #[serde(default)]
    table_rows: Option<Vec<Value>>,
}

impl TableSection {
    /// `rows` wins when both keys are present.
    fn into_parts(self) -> (Vec<String>, Vec<Value>) {
        let rows = self.rows.or(self.table_rows).unwrap_or_default();
        (self.headers, rows)
    }
}

#[derive(Debug, Deserialize)]
struct RawExchangeRate {
    date: String,
    rate: Value,
}

impl DashboardDataModel {
    /// Normalize a parsed document. Never fails; missing parts become empty.
    pub fn load(document: &Value) -> Self {
        let empty = Map::new();
        let root = document.as_object().unwrap_or_else(|| {
            warn!("dashboard document is not a JSON object; treating as empty");
            &empty
        });

        let chart_data = section_object(root, "chart_data", &empty);
        let table_data = section_object(root, "table_data", &empty);

        for key in chart_data.keys().chain(table_data.keys()) {
            if IndexFamily::from_key(key).is_none() {
                debug!(section = %key, "ignoring unknown family section");
            }
        }

        let families = IndexFamily::ALL
            .into_iter()
            .map(|family| {
                let series = chart_data
                    .get(family.key())
                    .map(|v| parse_series(family, v))
                    .unwrap_or_default();
                let table = table_data
                    .get(family.key())
                    .map(|v| parse_table(family, v))
                    .unwrap_or_default();
                (family, FamilyData { series, table })
            })
            .collect();

        let weather = match root.get("weather_data") {
            Some(Value::Null) | None => WeatherSection::default(),
            Some(v) => WeatherSection::deserialize(v).unwrap_or_else(|e| {
                warn!(error = %e, "malformed weather_data; treating as empty");
                WeatherSection::default()
            }),
        };

        let exchange_rate = match root.get("exchange_rate") {
            Some(Value::Array(items)) => parse_exchange_rates(items),
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                warn!("exchange_rate is not an array; treating as empty");
                Vec::new()
            }
        };

        Self {
            families,
            weather,
            exchange_rate,
            has_chart_data: !chart_data.is_empty(),
        }
    }

    /// Parse and normalize a JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let document: Value = serde_json::from_str(text)?;
        Ok(Self::load(&document))
    }

    pub fn family(&self, family: IndexFamily) -> &FamilyData {
        // Every family is inserted by `load`.
        static EMPTY: FamilyData = FamilyData {
            series: Vec::new(),
            table: SummaryTable {
                headers: Vec::new(),
                rows: Vec::new(),
            },
        };
        self.families.get(&family).unwrap_or(&EMPTY)
    }

    pub fn families(&self) -> impl Iterator<Item = (IndexFamily, &FamilyData)> {
        self.families.iter().map(|(f, data)| (*f, data))
    }
}

fn section_object<'a>(
    root: &'a Map<String, Value>,
    name: &str,
    empty: &'a Map<String, Value>,
) -> &'a Map<String, Value> {
    match root.get(name) {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => empty,
        Some(_) => {
            warn!(section = name, "section is not an object; treating as empty");
            empty
        }
    }
}

fn parse_series(family: IndexFamily, value: &Value) -> Vec<RawSeriesPoint> {
    let points = match ChartSection::deserialize(value) {
        Ok(section) => section.into_points(),
        Err(_) => {
            warn!(%family, "chart section has an unrecognized shape; treating as empty");
            return Vec::new();
        }
    };

    let mut series = Vec::with_capacity(points.len());
    let mut dropped = 0usize;
    for point in &points {
        match parse_point(point) {
            Some(p) => series.push(p),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(%family, dropped, "dropped chart points without a valid date");
    }

    series.sort_by_key(|p| p.date);
    series
}

fn parse_point(value: &Value) -> Option<RawSeriesPoint> {
    let obj = value.as_object()?;
    let date = obj.get("date")?.as_str().and_then(parse_feed_date)?;
    let fields = obj
        .iter()
        .filter(|(key, _)| key.as_str() != "date")
        .map(|(key, v)| (key.clone(), numeric_value(v)))
        .collect();
    Some(RawSeriesPoint { date, fields })
}

fn parse_table(family: IndexFamily, value: &Value) -> SummaryTable {
    let (headers, raw_rows) = match TableSection::deserialize(value) {
        Ok(section) => section.into_parts(),
        Err(e) => {
            warn!(%family, error = %e, "table section has an unrecognized shape; treating as empty");
            return SummaryTable::default();
        }
    };

    let mut rows = Vec::with_capacity(raw_rows.len());
    for (idx, row) in raw_rows.iter().enumerate() {
        match SummaryRow::deserialize(row) {
            Ok(r) => rows.push(r),
            Err(e) => warn!(%family, row = idx, error = %e, "skipping malformed table row"),
        }
    }

    SummaryTable { headers, rows }
}

fn parse_exchange_rates(items: &[Value]) -> Vec<ExchangeRatePoint> {
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let parsed = RawExchangeRate::deserialize(item).ok().and_then(|raw| {
            Some(ExchangeRatePoint {
                date: parse_feed_date(&raw.date)?,
                rate: numeric_value(&raw.rate)?,
            })
        });
        match parsed {
            Some(p) => out.push(p),
            None => warn!(entry = idx, "skipping malformed exchange rate entry"),
        }
    }
    out
}

/// Interpret a feed value as a finite number.
///
/// JSON numbers and numeric strings qualify; null, booleans, other strings,
/// arrays and objects do not.
pub fn numeric_value(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if v.is_finite() { Some(v) } else { None }
}

/// Parse a feed date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, and timestamps whose first ten
/// characters are one of those (`2024-01-15T00:00:00Z`).
pub fn parse_feed_date(raw: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

    let s = raw.trim();
    let date_part = match s.get(10..11) {
        Some("T") | Some(" ") => s.get(..10)?,
        _ => s,
    };
    FMTS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::CellValue;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_flat_document() {
        let doc = json!({
            "chart_data": {
                "KCCI": [
                    { "date": "2024-02-15", "KCCI_Composite_Index": 1100 },
                    { "date": "2024-01-15", "KCCI_Composite_Index": 1000, "KCCI_Europe": null }
                ]
            },
            "table_data": {
                "KCCI": {
                    "headers": ["항로", "Current Index", "Previous Index", "Weekly Change"],
                    "rows": [{ "route": "KCCI_종합지수", "current_index": 1100, "previous_index": 1000 }]
                }
            },
            "weather_data": { "current": { "LA_Temperature": "72", "LA_WeatherStatus": "Clear" }, "forecast": [] },
            "exchange_rate": [{ "date": "2024-02-15", "rate": 1335.2 }]
        });

        let model = DashboardDataModel::load(&doc);
        assert!(model.has_chart_data);

        let kcci = model.family(IndexFamily::Kcci);
        assert_eq!(kcci.series.len(), 2);
        assert_eq!(kcci.series[0].date, d(2024, 1, 15));
        assert_eq!(kcci.series[0].value("KCCI_Composite_Index"), Some(1000.0));
        assert!(kcci.series[0].fields.contains_key("KCCI_Europe"));
        assert_eq!(kcci.table.rows.len(), 1);
        assert_eq!(kcci.table.rows[0].current_index, Some(CellValue::Number(1100.0)));

        assert_eq!(model.weather.current.status.as_deref(), Some("Clear"));
        assert_eq!(model.exchange_rate.len(), 1);
    }

    #[test]
    fn parses_nested_revision() {
        let doc = json!({
            "chart_data": {
                "SCFI": { "chart_data": [{ "date": "2024-03-01", "SCFI_Composite_Index": "1800.5" }] }
            },
            "table_data": {
                "SCFI": { "headers": ["route"], "table_rows": [{ "route": "SCFI_종합지수", "current_index": "" }] }
            }
        });

        let model = DashboardDataModel::load(&doc);
        let scfi = model.family(IndexFamily::Scfi);
        assert_eq!(scfi.series[0].value("SCFI_Composite_Index"), Some(1800.5));
        assert_eq!(scfi.table.rows.len(), 1);
        assert!(!scfi.table.rows[0].has_current_data());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let model = DashboardDataModel::load(&json!({}));
        assert!(!model.has_chart_data);
        assert!(model.exchange_rate.is_empty());
        assert_eq!(model.weather, WeatherSection::default());
        for family in IndexFamily::ALL {
            assert!(model.family(family).is_empty());
        }
    }

    #[test]
    fn non_object_document_is_empty() {
        let model = DashboardDataModel::load(&json!([1, 2, 3]));
        assert!(!model.has_chart_data);
    }

    #[test]
    fn broken_family_does_not_affect_others() {
        let doc = json!({
            "chart_data": {
                "WCI": "garbage",
                "IACI": [{ "date": "2024-05-01", "IACI_Composite_Index": 700 }]
            },
            "table_data": { "WCI": { "headers": 3 } }
        });
        let model = DashboardDataModel::load(&doc);
        assert!(model.family(IndexFamily::Wci).is_empty());
        assert_eq!(model.family(IndexFamily::Iaci).series.len(), 1);
    }

    #[test]
    fn drops_points_with_bad_dates_and_rows_without_route() {
        let doc = json!({
            "chart_data": {
                "XSI": [
                    { "date": "not a date", "XSI_East_Asia_North_Europe": 1 },
                    { "XSI_East_Asia_North_Europe": 2 },
                    { "date": "2024-06-03", "XSI_East_Asia_North_Europe": 3 }
                ]
            },
            "table_data": {
                "XSI": { "headers": ["route"], "rows": [{ "current_index": 1 }, { "route": "XSI_동아시아 → 북유럽" }] }
            }
        });
        let model = DashboardDataModel::load(&doc);
        let xsi = model.family(IndexFamily::Xsi);
        assert_eq!(xsi.series.len(), 1);
        assert_eq!(xsi.table.rows.len(), 1);
    }

    #[test]
    fn malformed_weekly_change_keeps_the_row() {
        let doc = json!({
            "chart_data": {
                "KCCI": [{ "date": "2024-01-15", "KCCI_Composite_Index": 1000 }]
            },
            "table_data": {
                "KCCI": {
                    "headers": ["항로", "Weekly Change"],
                    "rows": [{ "route": "KCCI_종합지수", "current_index": 1000, "weekly_change": "-" }]
                }
            }
        });
        let model = DashboardDataModel::load(&doc);
        let kcci = model.family(IndexFamily::Kcci);
        assert_eq!(kcci.table.rows.len(), 1);
        assert_eq!(kcci.table.rows[0].weekly_change, None);
        assert_eq!(
            kcci.table.rows[0].current_index,
            Some(CellValue::Number(1000.0))
        );

        let build = crate::dataset::build_datasets(
            IndexFamily::Kcci,
            &kcci.series,
            &kcci.table.rows,
            &crate::routes::RouteKeyTable::builtin(),
            &mut crate::dataset::ColorCursor::new(),
        );
        assert_eq!(build.datasets.len(), 1);
        assert_eq!(build.datasets[0].label, "종합지수");
    }

    #[test]
    fn rows_key_wins_over_table_rows() {
        let doc = json!({
            "table_data": {
                "FBX": {
                    "headers": ["route"],
                    "rows": [{ "route": "FBX_글로벌 컨테이너 운임 지수" }],
                    "table_rows": [{ "route": "FBX_a" }, { "route": "FBX_b" }]
                },
                "WCI": {
                    "headers": ["route"],
                    "table_rows": [{ "route": "WCI_종합지수" }]
                }
            }
        });
        let model = DashboardDataModel::load(&doc);

        let fbx = &model.family(IndexFamily::Fbx).table.rows;
        assert_eq!(fbx.len(), 1);
        assert_eq!(fbx[0].route, "FBX_글로벌 컨테이너 운임 지수");
        assert_eq!(model.family(IndexFamily::Wci).table.rows.len(), 1);
    }

    #[test]
    fn numeric_value_rules() {
        assert_eq!(numeric_value(&json!(12)), Some(12.0));
        assert_eq!(numeric_value(&json!(" 3.5 ")), Some(3.5));
        assert_eq!(numeric_value(&json!("abc")), None);
        assert_eq!(numeric_value(&json!("")), None);
        assert_eq!(numeric_value(&json!(true)), None);
        assert_eq!(numeric_value(&json!(null)), None);
        assert_eq!(numeric_value(&json!("NaN")), None);
    }

    #[test]
    fn feed_date_formats() {
        assert_eq!(parse_feed_date("2024-01-15"), Some(d(2024, 1, 15)));
        assert_eq!(parse_feed_date("2024/01/15"), Some(d(2024, 1, 15)));
        assert_eq!(parse_feed_date("2024-01-15T09:30:00Z"), Some(d(2024, 1, 15)));
        assert_eq!(parse_feed_date("2024-01-15 09:30"), Some(d(2024, 1, 15)));
        assert_eq!(parse_feed_date("15/01/2024"), None);
        assert_eq!(parse_feed_date(""), None);
    }

    #[test]
    fn from_json_str_rejects_invalid_json() {
        assert!(DashboardDataModel::from_json_str("{ nope").is_err());
    }
}
