//! Stacked monthly datasets.

use tracing::debug;

use crate::dataset::ColorCursor;
use crate::domain::{IndexFamily, MonthlyAggregation, MonthlyDataset};
use crate::routes::RouteKeyTable;

/// One segment series per mapped route of `family`, in route-table order.
///
/// Every mapped route consumes a color, so a route keeps its color whether or
/// not its neighbours had data. Routes whose monthly values are all null are
/// dropped.
pub fn build_monthly_datasets(
    family: IndexFamily,
    aggregation: &MonthlyAggregation,
    routes: &RouteKeyTable,
    colors: &mut ColorCursor,
) -> Vec<MonthlyDataset> {
    let Some(map) = routes.family_map(family) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for (label, field) in map {
        let Some(field) = field else { continue };
        let color = colors.next_color();

        let values: Vec<Option<f64>> = aggregation
            .aggregated_data
            .iter()
            .map(|p| p.value(field))
            .collect();

        if values.iter().any(Option::is_some) {
            out.push(MonthlyDataset {
                label: label.clone(),
                values,
                color,
            });
        } else {
            debug!(%family, route = %label, field = %field, "no monthly values; dropping segment");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::aggregate::aggregate_by_month;
    use crate::domain::RawSeriesPoint;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn builds_aligned_segments_and_drops_empty_ones() {
        let series = vec![
            RawSeriesPoint::new(d(2024, 4, 2))
                .with("BLANK_SAILING_MSC", Some(4.0))
                .with("BLANK_SAILING_Total", Some(10.0)),
            RawSeriesPoint::new(d(2024, 6, 2))
                .with("BLANK_SAILING_MSC", Some(2.0))
                .with("BLANK_SAILING_Total", Some(6.0)),
        ];
        let aggregation = aggregate_by_month(&series, 12);
        let table = RouteKeyTable::builtin();

        let datasets = build_monthly_datasets(
            IndexFamily::BlankSailing,
            &aggregation,
            &table,
            &mut ColorCursor::new(),
        );

        let labels: Vec<_> = datasets.iter().map(|ds| ds.label.as_str()).collect();
        assert_eq!(labels, vec!["MSC", "Total"]);

        let msc = &datasets[0];
        assert_eq!(msc.values.len(), aggregation.monthly_labels.len());
        assert_eq!(msc.values[9], Some(4.0));
        assert_eq!(msc.values[10], None);
        assert_eq!(msc.values[11], Some(2.0));
    }

    #[test]
    fn colors_follow_route_table_position() {
        let series = vec![RawSeriesPoint::new(d(2024, 6, 2)).with("BLANK_SAILING_Total", Some(6.0))];
        let aggregation = aggregate_by_month(&series, 1);
        let table = RouteKeyTable::builtin();

        let datasets = build_monthly_datasets(
            IndexFamily::BlankSailing,
            &aggregation,
            &table,
            &mut ColorCursor::new(),
        );

        let mut expected = ColorCursor::new();
        for _ in 0..5 {
            expected.next_color();
        }
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].color, expected.next_color());
    }
}
