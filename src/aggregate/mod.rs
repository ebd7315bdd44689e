//! Monthly bucketing of a raw family series.
//!
//! The output always covers every calendar month of the trailing window, even
//! months without a single observation. Gaps in the feed show up as all-null
//! points instead of shrinking the month sequence.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::domain::{AggregatedPoint, MonthlyAggregation, RawSeriesPoint};

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Average every field of `series` per calendar month over the trailing
/// `window_months` months ending at the latest observation.
///
/// A field is averaged over its finite values only; null or missing values
/// count toward neither sum nor count. A month with no usable value for a
/// field reports `None` for it.
pub fn aggregate_by_month(series: &[RawSeriesPoint], window_months: usize) -> MonthlyAggregation {
    if series.is_empty() || window_months == 0 {
        return MonthlyAggregation::default();
    }

    let mut sorted: Vec<&RawSeriesPoint> = series.iter().collect();
    sorted.sort_by_key(|p| p.date);

    let Some(latest) = sorted.last().map(|p| p.date) else {
        return MonthlyAggregation::default();
    };
    let months = month_sequence(latest, window_months);

    let field_names: BTreeSet<&str> = sorted
        .iter()
        .flat_map(|p| p.fields.keys().map(String::as_str))
        .collect();

    let mut buckets: HashMap<NaiveDate, HashMap<&str, Accumulator>> = HashMap::new();
    for point in &sorted {
        let bucket = buckets.entry(month_start(point.date)).or_default();
        for (name, value) in &point.fields {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                bucket.entry(name.as_str()).or_default().push(v);
            }
        }
    }

    let aggregated_data = months
        .iter()
        .map(|&month| {
            let bucket = buckets.get(&month);
            let fields = field_names
                .iter()
                .map(|&name| {
                    let mean = bucket
                        .and_then(|b| b.get(name))
                        .and_then(|acc| acc.mean());
                    (name.to_string(), mean)
                })
                .collect();
            AggregatedPoint { date: month, fields }
        })
        .collect();

    MonthlyAggregation {
        aggregated_data,
        monthly_labels: months,
    }
}

/// First day of every month from `window_months - 1` months before `latest`
/// up to and including `latest`'s month.
pub fn month_sequence(latest: NaiveDate, window_months: usize) -> Vec<NaiveDate> {
    if window_months == 0 {
        return Vec::new();
    }

    // Windows reaching past the earliest representable month start there.
    let back = u32::try_from(window_months - 1).unwrap_or(u32::MAX);
    let start = month_start(latest)
        .checked_sub_months(Months::new(back))
        .unwrap_or_else(|| month_start(NaiveDate::MIN));

    let mut months = Vec::new();
    let mut current = start;
    while current <= latest {
        months.push(current);
        match current.checked_add_months(Months::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }
    months
}

/// First day of `date`'s month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}
