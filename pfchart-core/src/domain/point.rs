//! Chart points emitted by the Point-and-Figure engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a column, and the symbol drawn for each of its boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Price climbing: drawn as `X`.
    Rising,
    /// Price falling: drawn as `O`.
    Falling,
}

impl Mark {
    pub fn symbol(self) -> char {
        match self {
            Mark::Rising => 'X',
            Mark::Falling => 'O',
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Mark::Rising => Mark::Falling,
            Mark::Falling => Mark::Rising,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One box on the chart.
///
/// `row` is the box-count distance between the column's high and low
/// boundary at the moment of emission; `column` counts reversals from 0.
/// Both are logical indices, not screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartPoint {
    pub row: i64,
    pub column: usize,
    pub mark: Mark,
}

impl ChartPoint {
    pub fn new(row: i64, column: usize, mark: Mark) -> Self {
        Self { row, column, mark }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_symbols() {
        assert_eq!(Mark::Rising.symbol(), 'X');
        assert_eq!(Mark::Falling.symbol(), 'O');
        assert_eq!(Mark::Falling.to_string(), "O");
    }

    #[test]
    fn opposite_flips() {
        assert_eq!(Mark::Rising.opposite(), Mark::Falling);
        assert_eq!(Mark::Falling.opposite().opposite(), Mark::Falling);
    }

    #[test]
    fn point_serializes_mark_by_name() {
        let json = serde_json::to_string(&ChartPoint::new(3, 1, Mark::Falling)).unwrap();
        assert_eq!(json, r#"{"row":3,"column":1,"mark":"Falling"}"#);
    }
}
