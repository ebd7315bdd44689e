//! Reporting utilities: table views, route drift, and formatted terminal output.
//!
//! `TableView` applies the per-column display rules to a family's summary
//! table. Text formatting for the CLI lives in `format`.

use serde::Serialize;

use crate::domain::{HeaderDates, IndexFamily, MissingValueDisplay, SummaryRow, SummaryTable};
use crate::io::ingest::DashboardDataModel;
use crate::routes::{Resolution, RouteKeyTable};

pub mod format;

pub use format::*;

pub const NO_TABLE_DATA: &str = "No data available for this table.";

const PLACEHOLDER: &str = "-";

/// One rendered header cell. `date` is set for the index columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub text: String,
    /// Carried over from `weekly_change.color_class`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_class: Option<String>,
}

impl TableCell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color_class: None,
        }
    }
}

/// A summary table with every display rule applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<TableCell>>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

/// Render `table` for display. Empty tables produce an empty view.
pub fn build_table_view(
    table: &SummaryTable,
    dates: &HeaderDates,
    missing_previous: MissingValueDisplay,
) -> TableView {
    if table.is_empty() {
        return TableView::default();
    }

    let headers = table
        .headers
        .iter()
        .map(|h| header_cell(h, dates))
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .map(|h| row_cell(h, row, missing_previous))
                .collect()
        })
        .collect();

    TableView { headers, rows }
}

fn header_cell(header: &str, dates: &HeaderDates) -> HeaderCell {
    let dated = |text: &str, date: &str| HeaderCell {
        text: text.to_string(),
        date: Some(date.to_string()),
    };

    if header.contains("Current Index") && !dates.current_index_date.is_empty() {
        dated("Current Index", &dates.current_index_date)
    } else if header.contains("Previous Index") && !dates.previous_index_date.is_empty() {
        dated("Previous Index", &dates.previous_index_date)
    } else {
        HeaderCell {
            text: header.to_string(),
            date: None,
        }
    }
}

fn row_cell(header: &str, row: &SummaryRow, missing_previous: MissingValueDisplay) -> TableCell {
    if header.contains("Weekly Change") {
        let change = row.weekly_change.as_ref();
        let text = match change.map(|c| (&c.value, &c.percentage)) {
            Some((Some(value), Some(pct))) => format!("{value} ({pct})"),
            _ => PLACEHOLDER.to_string(),
        };
        TableCell {
            text,
            color_class: change
                .and_then(|c| c.color_class.clone())
                .filter(|c| !c.is_empty()),
        }
    } else if header.contains("Current Index") {
        TableCell::plain(
            row.current_index
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        )
    } else if header.contains("Previous Index") {
        TableCell::plain(
            row.previous_index
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| missing_previous.placeholder().to_string()),
        )
    } else if header.contains("항로") || header.contains("route") {
        if row.route.is_empty() {
            TableCell::plain(PLACEHOLDER)
        } else {
            TableCell::plain(row.display_route())
        }
    } else {
        TableCell::plain(extra_text(row, &column_key(header)))
    }
}

/// `"Unit Price"` -> `"unit_price"`.
fn column_key(header: &str) -> String {
    header
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

fn extra_text(row: &SummaryRow, key: &str) -> String {
    match row.extra.get(key) {
        None | Some(serde_json::Value::Null) => PLACEHOLDER.to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// A table row whose route has no chartable mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDrift {
    pub family: IndexFamily,
    pub route: String,
    /// True when the route is mapped to null on purpose.
    pub unchartable: bool,
}

/// Rows in every family table whose route is unmapped or mapped to null.
pub fn route_drift(model: &DashboardDataModel, routes: &RouteKeyTable) -> Vec<RouteDrift> {
    let mut out = Vec::new();
    for family in IndexFamily::ALL {
        for row in &model.family(family).table.rows {
            let route = row.display_route();
            let unchartable = match routes.resolve(family, &route) {
                Resolution::Field(_) => continue,
                Resolution::Unchartable => true,
                Resolution::NotFound => false,
            };
            out.push(RouteDrift {
                family,
                route,
                unchartable,
            });
        }
    }
    out
}
