//! Shared "dashboard pipeline" logic used by every CLI subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> normalize -> per-family datasets + tables -> exchange/weather
//!
//! The subcommands can then focus on presentation (tables, plots, export).

use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::aggregate_by_month;
use crate::data::{DashboardClient, DataSource};
use crate::dataset::{
    ColorCursor, SkippedRoute, build_datasets, build_monthly_datasets, current_exchange_rate,
    exchange_rate_series, header_dates,
};
use crate::domain::{
    ChartKind, DashboardConfig, HeaderDates, IndexFamily, MonthlyAggregation, MonthlyDataset,
    PlottedSeries, WeatherSection,
};
use crate::error::AppError;
use crate::io::ingest::{DashboardDataModel, FamilyData};
use crate::report::{TableView, build_table_view};
use crate::routes::RouteKeyTable;

/// Forecast days carried into the view.
pub const MAX_FORECAST_DAYS: usize = 7;

/// Chart payload of one family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FamilyChart {
    Line {
        datasets: Vec<PlottedSeries>,
        skipped: Vec<SkippedRoute>,
    },
    StackedMonthly {
        aggregation: MonthlyAggregation,
        datasets: Vec<MonthlyDataset>,
    },
}

impl FamilyChart {
    pub fn kind(&self) -> ChartKind {
        match self {
            FamilyChart::Line { .. } => ChartKind::Line,
            FamilyChart::StackedMonthly { .. } => ChartKind::StackedMonthly,
        }
    }

    pub fn dataset_count(&self) -> usize {
        match self {
            FamilyChart::Line { datasets, .. } => datasets.len(),
            FamilyChart::StackedMonthly { datasets, .. } => datasets.len(),
        }
    }
}

/// Everything the dashboard shows for one family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyView {
    pub family: IndexFamily,
    pub title: &'static str,
    pub chart: FamilyChart,
    pub header_dates: HeaderDates,
    pub table: TableView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRateView {
    pub series: PlottedSeries,
    pub current_rate: Option<f64>,
}

/// The render-ready projection of one loaded document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub source: String,
    pub route_map_version: String,
    pub has_chart_data: bool,
    pub families: Vec<FamilyView>,
    pub exchange_rate: ExchangeRateView,
    pub weather: WeatherSection,
}

impl DashboardView {
    pub fn family(&self, family: IndexFamily) -> Option<&FamilyView> {
        self.families.iter().find(|v| v.family == family)
    }
}

/// All outputs of a single load cycle.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub model: DashboardDataModel,
    pub routes: RouteKeyTable,
    pub view: DashboardView,
}

/// Load the route table, fetch the document, and build the view.
pub fn run_dashboard(config: &DashboardConfig) -> Result<RunOutput, AppError> {
    let routes = load_route_table(config)?;
    let source = DataSource::parse(&config.source);
    let model = DashboardClient::new().fetch_model(&source)?;

    Ok(run_dashboard_with_model(config, model, routes))
}

/// Build the view from an already loaded model. Never fails.
pub fn run_dashboard_with_model(
    config: &DashboardConfig,
    model: DashboardDataModel,
    routes: RouteKeyTable,
) -> RunOutput {
    let view = build_view(&model, &routes, config);
    RunOutput {
        model,
        routes,
        view,
    }
}

/// The configured route table, or the built-in one.
pub fn load_route_table(config: &DashboardConfig) -> Result<RouteKeyTable, AppError> {
    match &config.route_map {
        Some(path) => Ok(RouteKeyTable::from_path(path)?),
        None => Ok(RouteKeyTable::builtin()),
    }
}

pub fn build_view(
    model: &DashboardDataModel,
    routes: &RouteKeyTable,
    config: &DashboardConfig,
) -> DashboardView {
    if !model.has_chart_data {
        warn!("document has no chart data");
    }

    let families = IndexFamily::ALL
        .into_iter()
        .map(|family| build_family_view(family, model.family(family), routes, config))
        .collect();

    let mut weather = model.weather.clone();
    weather.forecast.truncate(MAX_FORECAST_DAYS);

    DashboardView {
        source: config.source.clone(),
        route_map_version: routes.version.clone(),
        has_chart_data: model.has_chart_data,
        families,
        exchange_rate: ExchangeRateView {
            series: exchange_rate_series(&model.exchange_rate),
            current_rate: current_exchange_rate(&model.exchange_rate),
        },
        weather,
    }
}

/// Build one family's view. Each family starts its own color sequence.
pub fn build_family_view(
    family: IndexFamily,
    data: &FamilyData,
    routes: &RouteKeyTable,
    config: &DashboardConfig,
) -> FamilyView {
    let mut colors = ColorCursor::new();

    let chart = match family.chart_kind() {
        ChartKind::Line => {
            let build = build_datasets(family, &data.series, &data.table.rows, routes, &mut colors);
            FamilyChart::Line {
                datasets: build.datasets,
                skipped: build.skipped,
            }
        }
        ChartKind::StackedMonthly => {
            let aggregation = aggregate_by_month(&data.series, config.window_months);
            let datasets = build_monthly_datasets(family, &aggregation, routes, &mut colors);
            FamilyChart::StackedMonthly {
                aggregation,
                datasets,
            }
        }
    };
    debug!(%family, datasets = chart.dataset_count(), "built family view");

    let header_dates = header_dates(&data.series);
    let table = build_table_view(&data.table, &header_dates, config.missing_previous);

    FamilyView {
        family,
        title: family.display_name(),
        chart,
        header_dates,
        table,
    }
}
