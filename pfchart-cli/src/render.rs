//! Text and JSON rendering of charted series.

use pfchart_core::{columns, extent, ChartPoint, EngineConfig};
use serde::Serialize;
use std::fmt::Write;

/// One series after the transform, ready to print.
#[derive(Debug, Clone, Serialize)]
pub struct ChartedSeries {
    pub series: String,
    pub observations: usize,
    pub box_size: f64,
    pub reversal: u32,
    pub points: Vec<ChartPoint>,
}

impl ChartedSeries {
    pub fn new(
        series: String,
        observations: usize,
        config: &EngineConfig,
        points: Vec<ChartPoint>,
    ) -> Self {
        Self {
            series,
            observations,
            box_size: config.box_size,
            reversal: config.reversal_boxes,
            points,
        }
    }
}

/// Grid rendering: one cell per (row, column), highest row on top.
pub fn render_text(chart: &ChartedSeries) -> String {
    let size = extent(&chart.points);
    let column_count = columns(&chart.points).len();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} observations, box {} x {} reversal, {} columns, {} boxes",
        chart.series,
        chart.observations,
        chart.box_size,
        chart.reversal,
        column_count,
        chart.points.len()
    );

    if chart.points.is_empty() {
        out.push_str("  (no boxes)\n");
        return out;
    }

    let height = size.max_row.max(0) as usize;
    let mut grid = vec![vec![' '; size.columns]; height + 1];
    for point in &chart.points {
        if point.row >= 0 {
            grid[point.row as usize][point.column] = point.mark.symbol();
        }
    }

    let label_width = size.max_row.to_string().len();
    for row in (1..=height).rev() {
        let cells: String = grid[row].iter().collect();
        let _ = writeln!(out, "{row:>label_width$} | {}", cells.trim_end());
    }
    out
}

pub fn render_json(charts: &[ChartedSeries]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(charts)
}
