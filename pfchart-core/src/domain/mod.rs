//! Domain types: input observations and emitted chart points.

pub mod observation;
pub mod point;

pub use observation::PriceObservation;
pub use point::{ChartPoint, Mark};
