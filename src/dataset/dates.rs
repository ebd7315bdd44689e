//! Table header dates.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::{HeaderDates, RawSeriesPoint};
use crate::io::ingest::parse_feed_date;

const HEADER_DATE_FMT: &str = "%m-%d-%Y";

/// Dates of the two most recent distinct observations in `series`.
pub fn header_dates(series: &[RawSeriesPoint]) -> HeaderDates {
    let distinct: BTreeSet<NaiveDate> = series.iter().map(|p| p.date).collect();
    let mut newest_first = distinct.into_iter().rev();

    HeaderDates {
        current_index_date: format_header_date(newest_first.next()),
        previous_index_date: format_header_date(newest_first.next()),
    }
}

/// `MM-DD-YYYY`, or an empty string when there is no date.
pub fn format_header_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(HEADER_DATE_FMT).to_string())
        .unwrap_or_default()
}

/// Format a raw feed date; anything unparseable becomes an empty string.
pub fn format_raw_header_date(raw: &str) -> String {
    format_header_date(parse_feed_date(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn picks_two_latest_dates() {
        let series = vec![
            RawSeriesPoint::new(d(2024, 1, 15)),
            RawSeriesPoint::new(d(2024, 2, 15)),
        ];
        let dates = header_dates(&series);
        assert_eq!(dates.current_index_date, "02-15-2024");
        assert_eq!(dates.previous_index_date, "01-15-2024");
    }

    #[test]
    fn duplicate_dates_count_once() {
        let series = vec![
            RawSeriesPoint::new(d(2024, 2, 15)),
            RawSeriesPoint::new(d(2024, 1, 8)),
            RawSeriesPoint::new(d(2024, 2, 15)),
        ];
        let dates = header_dates(&series);
        assert_eq!(dates.current_index_date, "02-15-2024");
        assert_eq!(dates.previous_index_date, "01-08-2024");
    }

    #[test]
    fn short_series_leaves_blanks() {
        assert_eq!(header_dates(&[]), HeaderDates::default());

        let dates = header_dates(&[RawSeriesPoint::new(d(2024, 7, 1))]);
        assert_eq!(dates.current_index_date, "07-01-2024");
        assert_eq!(dates.previous_index_date, "");
    }

    #[test]
    fn malformed_raw_date_formats_as_empty() {
        assert_eq!(format_raw_header_date("not-a-date"), "");
        assert_eq!(format_raw_header_date(""), "");
        assert_eq!(format_raw_header_date("2024-12-03"), "12-03-2024");
    }
}
