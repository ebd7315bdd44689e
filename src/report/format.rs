//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays presentation-free and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::{DashboardView, ExchangeRateView, FamilyChart, FamilyView};
use crate::domain::{CellValue, IndexFamily, MonthlyAggregation, MonthlyDataset, WeatherSection};
use crate::report::{HeaderCell, NO_TABLE_DATA, RouteDrift, TableView};

pub const NO_CHART_DATA: &str = "No chart data available.";

const MONTH_FMT: &str = "%Y-%m";

/// Format the full dashboard: every family, then exchange rate and weather.
pub fn format_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    out.push_str("=== fdash - Freight Index Dashboard ===\n");
    out.push_str(&format!("Source: {}\n", view.source));
    out.push_str(&format!("Route map: {}\n", view.route_map_version));
    out.push('\n');

    for family in &view.families {
        out.push_str(&format_family(family));
        out.push('\n');
    }

    out.push_str(&format_exchange_rate(&view.exchange_rate));
    out.push('\n');
    out.push_str(&format_weather(&view.weather));

    out
}

/// Section for one family: table plus chart summary.
pub fn format_family(view: &FamilyView) -> String {
    let mut out = String::new();
    out.push_str(&format!("--- {} ---\n", view.title));
    out.push_str(&format_table(&view.table));
    out.push_str(&format_chart_summary(&view.chart));
    out
}

/// Plain-text table with one space-padded column per header.
pub fn format_table(table: &TableView) -> String {
    if table.is_empty() {
        return format!("{NO_TABLE_DATA}\n");
    }

    let headers: Vec<String> = table.headers.iter().map(header_text).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.text.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().map(String::as_str), &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);

    for row in &table.rows {
        push_row(&mut out, row.iter().map(|c| c.text.as_str()), &widths);
    }

    out
}

fn header_text(cell: &HeaderCell) -> String {
    match &cell.date {
        Some(date) => format!("{} ({date})", cell.text),
        None => cell.text.clone(),
    }
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(text, &w)| format!("{text:<w$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Dataset counts and skipped routes for one family's chart.
pub fn format_chart_summary(chart: &FamilyChart) -> String {
    let mut out = String::new();
    match chart {
        FamilyChart::Line { datasets, skipped } => {
            if datasets.is_empty() {
                out.push_str(&format!("Chart: {NO_CHART_DATA}\n"));
            } else {
                out.push_str(&format!("Chart: {} line dataset(s)\n", datasets.len()));
            }
            for ds in datasets {
                let last = ds.points.last();
                out.push_str(&format!(
                    "  {:<24} points={:<4} last={}\n",
                    ds.label,
                    ds.points.len(),
                    last.map(|p| format!("{:.2} @ {}", p.y, p.x)).unwrap_or_default(),
                ));
            }
            for s in skipped {
                out.push_str(&format!("  (skipped {}) {}\n", s.route, s.reason.describe()));
            }
        }
        FamilyChart::StackedMonthly { datasets, .. } if datasets.is_empty() => {
            out.push_str(&format!("Chart: {NO_CHART_DATA}\n"));
        }
        FamilyChart::StackedMonthly {
            aggregation,
            datasets,
        } => {
            out.push_str(&format!(
                "Chart: {} stacked dataset(s) over {} month(s)\n",
                datasets.len(),
                aggregation.monthly_labels.len()
            ));
        }
    }
    out
}

/// Month-by-route table for a stacked family.
pub fn format_monthly_datasets(aggregation: &MonthlyAggregation, datasets: &[MonthlyDataset]) -> String {
    if datasets.is_empty() {
        return format!("{NO_CHART_DATA}\n");
    }

    let columns: Vec<(&str, Vec<Option<f64>>)> = datasets
        .iter()
        .map(|ds| (ds.label.as_str(), ds.values.clone()))
        .collect();
    format_month_columns(aggregation, &columns)
}

/// Every aggregated field of `family`, one row per month.
pub fn format_aggregation(family: IndexFamily, aggregation: &MonthlyAggregation) -> String {
    let mut out = format!("=== {} monthly averages ===\n", family.display_name());
    if aggregation.is_empty() {
        out.push_str(&format!("{NO_CHART_DATA}\n"));
        return out;
    }

    let fields: Vec<&str> = aggregation
        .aggregated_data
        .first()
        .map(|p| p.fields.keys().map(String::as_str).collect())
        .unwrap_or_default();
    let columns: Vec<(&str, Vec<Option<f64>>)> = fields
        .iter()
        .map(|f| {
            let values: Vec<Option<f64>> =
                aggregation.aggregated_data.iter().map(|p| p.value(f)).collect();
            (*f, values)
        })
        .collect();

    out.push_str(&format_month_columns(aggregation, &columns));
    out
}

fn format_month_columns(aggregation: &MonthlyAggregation, columns: &[(&str, Vec<Option<f64>>)]) -> String {
    let mut headers = vec!["month".to_string()];
    headers.extend(columns.iter().map(|(label, _)| label.to_string()));

    let rows: Vec<Vec<String>> = aggregation
        .monthly_labels
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let mut row = vec![month.format(MONTH_FMT).to_string()];
            row.extend(
                columns
                    .iter()
                    .map(|(_, values)| fmt_opt(values.get(i).copied().flatten())),
            );
            row
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().map(String::as_str), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

pub fn format_exchange_rate(view: &ExchangeRateView) -> String {
    let mut out = format!("--- {} ---\n", view.series.label);
    match view.current_rate {
        Some(rate) => out.push_str(&format!("Current: {rate:.2}\n")),
        None => out.push_str("Current: -\n"),
    }
    if let (Some(first), Some(last)) = (view.series.points.first(), view.series.points.last()) {
        out.push_str(&format!(
            "History: {} point(s) from {} to {}\n",
            view.series.points.len(),
            first.x,
            last.x
        ));
    }
    out
}

pub fn format_weather(weather: &WeatherSection) -> String {
    let c = &weather.current;
    let mut out = String::from("--- Los Angeles weather ---\n");
    out.push_str(&format!(
        "Now: {} {}\n",
        fmt_cell(&c.temperature),
        c.status.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!(
        "Humidity: {} | Wind: {} | Pressure: {} | Visibility: {}\n",
        fmt_cell(&c.humidity),
        fmt_cell(&c.wind_speed),
        fmt_cell(&c.pressure),
        fmt_cell(&c.visibility)
    ));
    out.push_str(&format!(
        "Sunrise: {} | Sunset: {}\n",
        c.sunrise.as_deref().unwrap_or("-"),
        c.sunset.as_deref().unwrap_or("-")
    ));
    for day in &weather.forecast {
        out.push_str(&format!(
            "  {:<12} {} / {}  {}\n",
            day.date.as_deref().unwrap_or("-"),
            fmt_cell(&day.min_temp),
            fmt_cell(&day.max_temp),
            day.status.as_deref().unwrap_or("-")
        ));
    }
    out
}

/// Routes in the tables that the route map cannot chart.
pub fn format_route_drift(drift: &[RouteDrift], version: &str) -> String {
    let mut out = format!("Route map: {version}\n");
    if drift.is_empty() {
        out.push_str("All table routes resolve to a series field.\n");
        return out;
    }

    for d in drift {
        let status = if d.unchartable { "no chart (null)" } else { "NOT FOUND" };
        out.push_str(&format!("{:<14} {:<24} {status}\n", d.family.key(), d.route));
    }
    out
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "-".to_string())
}

fn fmt_cell(v: &Option<CellValue>) -> String {
    v.as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::dataset::{ColorCursor, SkipReason, SkippedRoute};
    use crate::domain::{AggregatedPoint, CurrentWeather, ForecastDay, PlottedSeries, SeriesPoint};
    use crate::report::TableCell;

    fn cell(text: &str) -> TableCell {
        TableCell {
            text: text.to_string(),
            color_class: None,
        }
    }

    #[test]
    fn table_pads_columns_and_dates_headers() {
        let table = TableView {
            headers: vec![
                HeaderCell { text: "route".to_string(), date: None },
                HeaderCell {
                    text: "Current Index".to_string(),
                    date: Some("02-15-2024".to_string()),
                },
            ],
            rows: vec![vec![cell("Composite"), cell("1100")]],
        };

        let expected = concat!(
            "route      Current Index (02-15-2024)\n",
            "---------  --------------------------\n",
            "Composite  1100\n",
        );
        assert_eq!(format_table(&table), expected);
    }

    #[test]
    fn empty_table_has_placeholder() {
        assert_eq!(format_table(&TableView::default()), format!("{NO_TABLE_DATA}\n"));
    }

    #[test]
    fn monthly_table_shows_gaps_as_dash() {
        let d = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
        let aggregation = MonthlyAggregation {
            aggregated_data: vec![
                AggregatedPoint { date: d(5), fields: [("T".to_string(), Some(8.0))].into() },
                AggregatedPoint { date: d(6), fields: [("T".to_string(), None)].into() },
            ],
            monthly_labels: vec![d(5), d(6)],
        };
        let datasets = vec![MonthlyDataset {
            label: "Total".to_string(),
            values: vec![Some(8.0), None],
            color: ColorCursor::new().next_color(),
        }];

        let expected = concat!(
            "month    Total\n",
            "2024-05  8.00\n",
            "2024-06  -\n",
        );
        assert_eq!(format_monthly_datasets(&aggregation, &datasets), expected);

        let all_fields = format_aggregation(IndexFamily::BlankSailing, &aggregation);
        assert!(all_fields.starts_with("=== Blank Sailing monthly averages ===\n"));
        assert!(all_fields.contains("2024-05  8.00"));
    }

    #[test]
    fn weather_lists_forecast_days() {
        let weather = WeatherSection {
            current: CurrentWeather {
                temperature: Some(CellValue::Number(21.5)),
                status: Some("Clear".to_string()),
                ..CurrentWeather::default()
            },
            forecast: vec![ForecastDay {
                date: Some("Mon".to_string()),
                min_temp: Some(CellValue::Number(15.0)),
                max_temp: Some(CellValue::Number(24.0)),
                status: Some("Sunny".to_string()),
            }],
        };
        let txt = format_weather(&weather);
        assert!(txt.contains("Now: 21.5 Clear\n"));
        assert!(txt.contains("Mon          15 / 24  Sunny"));
    }

    #[test]
    fn family_without_datasets_reports_no_chart_data() {
        let empty = FamilyChart::Line {
            datasets: Vec::new(),
            skipped: vec![SkippedRoute {
                route: "유럽".to_string(),
                reason: SkipReason::Unmapped,
            }],
        };
        let txt = format_chart_summary(&empty);
        assert!(txt.starts_with(&format!("Chart: {NO_CHART_DATA}\n")));
        assert!(txt.contains("(skipped 유럽) no route mapping"));

        let stacked = FamilyChart::StackedMonthly {
            aggregation: MonthlyAggregation::default(),
            datasets: Vec::new(),
        };
        assert_eq!(format_chart_summary(&stacked), format!("Chart: {NO_CHART_DATA}\n"));
    }

    #[test]
    fn line_family_reports_dataset_count() {
        let chart = FamilyChart::Line {
            datasets: vec![PlottedSeries {
                label: "종합지수".to_string(),
                points: vec![SeriesPoint {
                    x: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
                    y: 1100.0,
                }],
                color: ColorCursor::new().next_color(),
            }],
            skipped: Vec::new(),
        };
        let txt = format_chart_summary(&chart);
        assert!(txt.starts_with("Chart: 1 line dataset(s)\n"));
        assert!(txt.contains("last=1100.00 @ 2024-02-15"));
    }

    #[test]
    fn drift_report_names_each_route() {
        let drift = vec![RouteDrift {
            family: IndexFamily::Scfi,
            route: "Moon".to_string(),
            unchartable: false,
        }];
        let txt = format_route_drift(&drift, "builtin");
        assert!(txt.starts_with("Route map: builtin\n"));
        assert!(txt.contains("SCFI"));
        assert!(txt.contains("NOT FOUND"));
    }
}
