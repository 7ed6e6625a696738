//! pfchart core — Point-and-Figure charting of daily price series.
//!
//! This crate contains:
//! - Domain types (price observations, chart points, marks)
//! - The Point-and-Figure engine: a pure fold from closes to X/O boxes
//! - Column grouping helpers for renderers
//! - Input suppliers: a validating CSV reader and a seeded synthetic walk
//! - BLAKE3 seed derivation and TOML settings

pub mod chart;
pub mod data;
pub mod domain;
pub mod engine;
pub mod rng;
pub mod settings;

pub use chart::{columns, extent, ChartExtent, Column};
pub use domain::{ChartPoint, Mark, PriceObservation};
pub use engine::{transform, transform_closes, EngineConfig, EngineError, InitialDirection};
