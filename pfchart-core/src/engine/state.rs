//! Column state machine threaded through the transform.

use crate::domain::{ChartPoint, Mark};
use crate::engine::config::EngineConfig;

/// Mutable state for one transform call. Never outlives the call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EngineState {
    pub direction: Mark,
    /// Box-aligned upper boundary of the current column.
    pub column_high: f64,
    /// Box-aligned lower boundary of the current column.
    pub column_low: f64,
    pub column: usize,
}

impl EngineState {
    pub fn new(first_close: f64, direction: Mark) -> Self {
        Self {
            direction,
            column_high: first_close,
            column_low: first_close,
            column: 0,
        }
    }

    /// Apply one close. Extension and reversal are mutually exclusive per call.
    ///
    /// Callers pass finite prices only; each loop iteration moves a boundary
    /// one box closer to `price`, and a loop stops as soon as a box no longer
    /// moves the boundary at all.
    pub fn step(&mut self, price: f64, config: &EngineConfig, out: &mut Vec<ChartPoint>) {
        let box_size = config.box_size;
        let reversal = config.reversal_distance();

        match self.direction {
            Mark::Rising => {
                if price >= self.column_high + box_size {
                    self.extend_up(price, box_size, out);
                } else if price <= self.column_high - reversal {
                    self.direction = Mark::Falling;
                    self.column_low = self.column_high - reversal;
                    self.column += 1;
                    log::trace!(
                        "column {} opened falling at {} (close {price})",
                        self.column,
                        self.column_low
                    );
                    self.extend_down(price, box_size, out);
                }
            }
            Mark::Falling => {
                if price <= self.column_low - box_size {
                    self.extend_down(price, box_size, out);
                } else if price >= self.column_low + reversal {
                    self.direction = Mark::Rising;
                    self.column_high = self.column_low + reversal;
                    self.column += 1;
                    log::trace!(
                        "column {} opened rising at {} (close {price})",
                        self.column,
                        self.column_high
                    );
                    self.extend_up(price, box_size, out);
                }
            }
        }
    }

    fn extend_up(&mut self, price: f64, box_size: f64, out: &mut Vec<ChartPoint>) {
        while price >= self.column_high + box_size {
            let next = self.column_high + box_size;
            // Box below the float spacing of the boundary: no progress possible.
            if next == self.column_high {
                break;
            }
            self.column_high = next;
            out.push(self.point(box_size));
        }
    }

    fn extend_down(&mut self, price: f64, box_size: f64, out: &mut Vec<ChartPoint>) {
        while price <= self.column_low - box_size {
            let next = self.column_low - box_size;
            if next == self.column_low {
                break;
            }
            self.column_low = next;
            out.push(self.point(box_size));
        }
    }

    fn point(&self, box_size: f64) -> ChartPoint {
        // Rounded so accumulated float drift never yields a fractional box.
        let row = ((self.column_high - self.column_low) / box_size).round() as i64;
        ChartPoint::new(row, self.column, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &mut EngineState, prices: &[f64], config: &EngineConfig) -> Vec<ChartPoint> {
        let mut out = Vec::new();
        for &p in prices {
            state.step(p, config, &mut out);
        }
        out
    }

    #[test]
    fn noise_inside_box_is_ignored() {
        let config = EngineConfig::new(1.0, 3);
        let mut state = EngineState::new(100.0, Mark::Rising);
        let out = run(&mut state, &[100.4, 99.1, 100.9, 97.5], &config);
        assert!(out.is_empty());
        assert_eq!(state, EngineState::new(100.0, Mark::Rising));
    }

    #[test]
    fn multi_box_jump_emits_each_box() {
        let config = EngineConfig::new(1.0, 3);
        let mut state = EngineState::new(100.0, Mark::Rising);
        let out = run(&mut state, &[103.2], &config);
        let rows: Vec<i64> = out.iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![1, 2, 3]);
        assert!(out.iter().all(|p| p.mark == Mark::Rising && p.column == 0));
        assert_eq!(state.column_high, 103.0);
    }

    #[test]
    fn reversal_from_partial_state() {
        let config = EngineConfig::new(1.0, 3);
        let mut state = EngineState {
            direction: Mark::Rising,
            column_high: 110.0,
            column_low: 100.0,
            column: 2,
        };
        let out = run(&mut state, &[105.5], &config);

        assert_eq!(state.direction, Mark::Falling);
        assert_eq!(state.column, 3);
        assert_eq!(state.column_high, 110.0);
        assert_eq!(state.column_low, 106.0);
        assert_eq!(out, vec![ChartPoint::new(4, 3, Mark::Falling)]);
    }

    #[test]
    fn falling_column_extends_one_box() {
        let config = EngineConfig::new(1.0, 1);
        let mut state = EngineState {
            direction: Mark::Falling,
            column_high: 110.0,
            column_low: 105.0,
            column: 1,
        };
        let out = run(&mut state, &[104.0], &config);
        assert_eq!(state.direction, Mark::Falling);
        assert_eq!(out, vec![ChartPoint::new(6, 1, Mark::Falling)]);
    }

    #[test]
    fn falling_reversal_catches_up_in_new_column() {
        let config = EngineConfig::new(1.0, 3);
        let mut state = EngineState {
            direction: Mark::Falling,
            column_high: 110.0,
            column_low: 100.0,
            column: 1,
        };
        let out = run(&mut state, &[105.0], &config);

        assert_eq!(state.direction, Mark::Rising);
        assert_eq!(state.column_high, 105.0);
        assert_eq!(
            out,
            vec![
                ChartPoint::new(4, 2, Mark::Rising),
                ChartPoint::new(5, 2, Mark::Rising),
            ]
        );
    }

    #[test]
    fn fractional_box_rows_stay_integral() {
        let config = EngineConfig::new(0.1, 3);
        let mut state = EngineState::new(10.0, Mark::Rising);
        let out = run(&mut state, &[11.05], &config);
        assert_eq!(out.len(), 10);
        for (i, p) in out.iter().enumerate() {
            assert_eq!(p.row, i as i64 + 1);
        }
    }

    #[test]
    fn box_below_float_spacing_stops_rising_loop() {
        let config = EngineConfig::new(1e-20, 3);
        let mut state = EngineState::new(100.0, Mark::Rising);
        let out = run(&mut state, &[101.0], &config);
        assert!(out.is_empty());
        assert_eq!(state.column_high, 100.0);
    }

    #[test]
    fn box_below_float_spacing_stops_falling_loop() {
        let config = EngineConfig::new(1e-20, 3);
        let mut state = EngineState::new(100.0, Mark::Falling);
        let out = run(&mut state, &[99.0], &config);
        assert!(out.is_empty());
        assert_eq!(state.column_low, 100.0);
    }

    #[test]
    fn unit_box_at_huge_price_stops() {
        // Float spacing near 1e17 is 16, so adding 1.0 never moves the boundary.
        let config = EngineConfig::new(1.0, 3);
        let mut state = EngineState::new(1e17, Mark::Rising);
        let out = run(&mut state, &[1e17 + 64.0], &config);
        assert!(out.is_empty());
        assert_eq!(state.column_high, 1e17);
    }
}
