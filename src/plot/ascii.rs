//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Every series is drawn as a line in its own marker character; a legend maps
//! markers back to route labels.

use chrono::{Datelike, NaiveDate};

use crate::domain::PlottedSeries;

const MARKERS: [char; 8] = ['*', 'o', '+', 'x', '#', '@', '%', '&'];

/// Render line series over a shared date axis.
pub fn render_series_plot(series: &[PlottedSeries], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((d_min, d_max)) = date_range(series) else {
        return "Plot: no data points\n".to_string();
    };
    let (x_min, x_max) = day_range(d_min, d_max);
    let (y_min, y_max) = y_range(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for (idx, s) in series.iter().enumerate() {
        let ch = marker(idx);
        let cells: Vec<(usize, usize)> = s
            .points
            .iter()
            .map(|p| {
                (
                    map_x(day_number(p.x), x_min, x_max, width),
                    map_y(p.y, y_min, y_max, height),
                )
            })
            .collect();

        for pair in cells.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            draw_line(&mut grid, x0, y0, x1, y1, ch);
        }
        for &(x, y) in &cells {
            grid[y][x] = ch;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: date=[{d_min}, {d_max}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (idx, s) in series.iter().enumerate() {
        out.push_str(&format!("  {} {}\n", marker(idx), s.label));
    }

    out
}

fn marker(idx: usize) -> char {
    MARKERS[idx % MARKERS.len()]
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn date_range(series: &[PlottedSeries]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = series.iter().flat_map(|s| s.points.iter().map(|p| p.x));
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

/// A single date still gets a non-empty axis.
fn day_range(d_min: NaiveDate, d_max: NaiveDate) -> (f64, f64) {
    let (lo, hi) = (day_number(d_min), day_number(d_max));
    if hi > lo { (lo, hi) } else { (lo - 1.0, lo + 1.0) }
}

fn y_range(series: &[PlottedSeries]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in series.iter().flat_map(|s| s.points.iter()) {
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        None
    } else if max_y > min_y {
        Some((min_y, max_y))
    } else {
        Some((min_y - 1.0, max_y + 1.0))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ColorCursor;
    use crate::domain::SeriesPoint;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(label: &str, points: &[(NaiveDate, f64)]) -> PlottedSeries {
        PlottedSeries {
            label: label.to_string(),
            points: points.iter().map(|&(x, y)| SeriesPoint { x, y }).collect(),
            color: ColorCursor::new().next_color(),
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let flat = series("종합지수", &[(d(2024, 1, 1), 100.0), (d(2024, 1, 11), 100.0)]);
        let single = series("유럽", &[(d(2024, 1, 11), 110.0)]);

        let txt = render_series_plot(&[flat, single], 10, 5);
        let expected = concat!(
            "Plot: date=[2024-01-01, 2024-01-11] | y=[99.50, 110.50]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "**********\n",
            "  * 종합지수\n",
            "  o 유럽\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_input_has_placeholder() {
        assert_eq!(render_series_plot(&[], 20, 5), "Plot: no data points\n");
    }

    #[test]
    fn single_point_is_plotted() {
        let one = series("MBCI", &[(d(2024, 4, 1), 1500.0)]);
        let txt = render_series_plot(&[one], 11, 5);
        let grid: String = txt.lines().skip(1).take(5).collect();
        assert_eq!(grid.matches('*').count(), 1);
    }
}
