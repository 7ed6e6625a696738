//! Point-and-Figure engine — folds a close series into chart points.
//!
//! The engine walks the series once, in input order:
//!
//! 1. Seed `column_high = column_low = first close`, column 0.
//! 2. Per close, either extend the current column box by box, or (only when
//!    no extension happened) reverse into a new column and catch up.
//! 3. Anything inside the current box or reversal band is noise.
//!
//! Each call owns its state, so calls on different series may run on
//! different threads without coordination.

pub mod config;
mod state;

pub use config::{EngineConfig, EngineError, InitialDirection};

use crate::domain::{ChartPoint, Mark, PriceObservation};
use state::EngineState;

/// Most boxes one column may need to span the full price range of a series.
pub const MAX_COLUMN_BOXES: f64 = 10_000_000.0;

/// Transform an ascending series of observations into chart points.
///
/// The configuration is validated before anything else; an empty series
/// yields an empty chart. Non-finite closes are skipped. A box too fine for
/// the series (below float spacing at its prices, or more than
/// [`MAX_COLUMN_BOXES`] across its range) is an invalid configuration.
pub fn transform(
    series: &[PriceObservation],
    config: &EngineConfig,
) -> Result<Vec<ChartPoint>, EngineError> {
    let closes: Vec<f64> = series.iter().map(|obs| obs.close).collect();
    transform_closes(&closes, config)
}

/// Same as [`transform`], over bare closing prices.
pub fn transform_closes(
    closes: &[f64],
    config: &EngineConfig,
) -> Result<Vec<ChartPoint>, EngineError> {
    config.validate()?;
    check_resolution(closes, config)?;

    let Some(first) = closes.iter().copied().find(|c| c.is_finite()) else {
        return Ok(Vec::new());
    };

    let direction = initial_direction(closes, first, config);
    let mut state = EngineState::new(first, direction);
    let mut points = Vec::new();

    for &close in closes.iter().filter(|c| c.is_finite()) {
        state.step(close, config, &mut points);
    }

    log::debug!(
        "transformed {} closes into {} points across {} columns (box {}, reversal {})",
        closes.len(),
        points.len(),
        points.last().map_or(0, |p| p.column + 1),
        config.box_size,
        config.reversal_boxes
    );

    Ok(points)
}

/// Reject boxes that cannot move a column boundary, or that would need an
/// unbounded number of boxes to cover the series.
fn check_resolution(closes: &[f64], config: &EngineConfig) -> Result<(), EngineError> {
    let (min, max) = closes
        .iter()
        .copied()
        .filter(|c| c.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c), hi.max(c))
        });
    if min > max {
        return Ok(());
    }

    // Boundaries never stray further than one reversal plus a box from the closes.
    let edge = min.abs().max(max.abs()) + config.reversal_distance() + config.box_size;
    if edge + config.box_size == edge {
        return Err(EngineError::InvalidConfiguration(format!(
            "box size {} is below the price resolution near {edge}",
            config.box_size
        )));
    }

    let span = (max - min) / config.box_size;
    if span > MAX_COLUMN_BOXES {
        return Err(EngineError::InvalidConfiguration(format!(
            "box size {} needs {span:.0} boxes to cover prices {min}..{max} (limit {MAX_COLUMN_BOXES:.0})",
            config.box_size
        )));
    }
    Ok(())
}

fn initial_direction(closes: &[f64], first: f64, config: &EngineConfig) -> Mark {
    match config.initial_direction {
        InitialDirection::Rising => Mark::Rising,
        InitialDirection::Inferred => closes
            .iter()
            .copied()
            .filter(|c| c.is_finite())
            .find(|c| (c - first).abs() >= config.box_size)
            .map_or(Mark::Rising, |c| {
                if c < first {
                    Mark::Falling
                } else {
                    Mark::Rising
                }
            }),
    }
}
