//! Column summaries over an emitted point sequence.
//!
//! Consumers that draw the chart usually want columns rather than loose
//! points: which mark a run uses and which rows it spans.

use crate::domain::{ChartPoint, Mark};
use serde::Serialize;

/// One column of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub index: usize,
    /// Mark of the first box in the column.
    pub mark: Mark,
    pub low_row: i64,
    pub high_row: i64,
    /// Number of boxes emitted into this column.
    pub boxes: usize,
}

/// Overall size of a chart, for sizing a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChartExtent {
    /// Highest column index + 1.
    pub columns: usize,
    pub max_row: i64,
}

/// Group consecutive points by column index.
///
/// Column indices skipped by the engine (a reversal whose catch-up emitted
/// no boxes) have no entry.
pub fn columns(points: &[ChartPoint]) -> Vec<Column> {
    let mut out: Vec<Column> = Vec::new();
    for point in points {
        match out.last_mut() {
            Some(col) if col.index == point.column => {
                col.low_row = col.low_row.min(point.row);
                col.high_row = col.high_row.max(point.row);
                col.boxes += 1;
            }
            _ => out.push(Column {
                index: point.column,
                mark: point.mark,
                low_row: point.row,
                high_row: point.row,
                boxes: 1,
            }),
        }
    }
    out
}

pub fn extent(points: &[ChartPoint]) -> ChartExtent {
    points.iter().fold(ChartExtent::default(), |acc, p| ChartExtent {
        columns: acc.columns.max(p.column + 1),
        max_row: acc.max_row.max(p.row),
    })
}
