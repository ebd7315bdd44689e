//! Dataset color assignment.

use crate::domain::SeriesColor;

const FILL_COLORS: [&str; 16] = [
    "rgba(0, 101, 126, 0.8)",
    "rgba(0, 58, 82, 0.8)",
    "rgba(40, 167, 69, 0.8)",
    "rgba(253, 126, 20, 0.8)",
    "rgba(111, 66, 193, 0.8)",
    "rgba(220, 53, 69, 0.8)",
    "rgba(23, 162, 184, 0.8)",
    "rgba(108, 117, 125, 0.8)",
    "rgba(255, 193, 7, 0.8)",
    "rgba(52, 58, 64, 0.8)",
    "rgba(200, 100, 0, 0.8)",
    "rgba(0, 200, 200, 0.8)",
    "rgba(150, 50, 100, 0.8)",
    "rgba(50, 150, 50, 0.8)",
    "rgba(250, 100, 150, 0.8)",
    "rgba(100, 100, 200, 0.8)",
];

const BORDER_COLORS: [&str; 16] = [
    "#00657e", "#003A52", "#218838", "#e68a00", "#5a32b2", "#c82333", "#138496", "#6c757d",
    "#ffc107", "#343a40", "#c86400", "#00c8c8", "#963264", "#329632", "#fa6496", "#6464c8",
];

/// Color used for the exchange-rate line.
pub const EXCHANGE_RATE_COLOR: SeriesColor = SeriesColor {
    fill: "rgba(253, 126, 20, 0.5)",
    border: "transparent",
};

/// Hands out palette colors in order, wrapping around.
///
/// Create one per family so color assignment depends only on that family's
/// datasets, never on what was built before.
#[derive(Debug, Clone, Default)]
pub struct ColorCursor {
    next: usize,
}

impl ColorCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_color(&mut self) -> SeriesColor {
        let idx = self.next % FILL_COLORS.len();
        self.next += 1;
        SeriesColor {
            fill: FILL_COLORS[idx],
            border: BORDER_COLORS[idx],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_palette() {
        let mut cursor = ColorCursor::new();
        let first = cursor.next_color();
        for _ in 1..FILL_COLORS.len() {
            cursor.next_color();
        }
        assert_eq!(cursor.next_color(), first);
        assert_eq!(first.border, "#00657e");
    }

    #[test]
    fn fresh_cursors_agree() {
        let mut a = ColorCursor::new();
        let mut b = ColorCursor::new();
        a.next_color();
        assert_eq!(ColorCursor::new().next_color(), b.next_color());
    }
}
