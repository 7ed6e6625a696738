//! Synthetic daily random walk for demos and tests.
//!
//! The random source is injected, so a seeded `StdRng` reproduces the same
//! series on every run.

use crate::data::DataError;
use crate::domain::PriceObservation;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Shape of the generated walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticParams {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (exclusive).
    pub end: NaiveDate,
    pub initial_price: f64,
    /// Added to every daily change.
    pub drift: f64,
    /// Scale of the normal daily change.
    pub volatility: f64,
    /// Scale of the high/low excursion beyond the open-close body.
    pub range_scale: f64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2005, 1, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            initial_price: 100.0,
            drift: 0.001,
            volatility: 2.0,
            range_scale: 5.0,
        }
    }
}

impl SyntheticParams {
    pub fn validate(&self) -> Result<(), DataError> {
        if self.end <= self.start {
            return Err(DataError::InvalidParams(format!(
                "end {} must come after start {}",
                self.end, self.start
            )));
        }
        let non_negative = [
            ("initial_price", self.initial_price),
            ("volatility", self.volatility),
            ("range_scale", self.range_scale),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DataError::InvalidParams(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.drift.is_finite() {
            return Err(DataError::InvalidParams("drift must be finite".into()));
        }
        Ok(())
    }

    /// Number of observations the walk will contain.
    pub fn days(&self) -> usize {
        (self.end - self.start).num_days().max(0) as usize
    }
}

/// Generate one observation per calendar day in `[start, end)`.
///
/// Each open is the previous close. Prices never go below zero.
pub fn generate<R: Rng>(
    params: &SyntheticParams,
    rng: &mut R,
) -> Result<Vec<PriceObservation>, DataError> {
    params.validate()?;

    let mut observations = Vec::with_capacity(params.days());
    let mut price = params.initial_price;
    let mut current = params.start;

    while current < params.end {
        let change = params.drift + standard_normal(rng) * params.volatility;
        let open = price;
        let close = (open + change).max(0.0);
        let high = open.max(close) + standard_normal(rng).abs() * params.range_scale;
        let low = (open.min(close) - standard_normal(rng).abs() * params.range_scale).max(0.0);

        observations.push(PriceObservation {
            date: current,
            open,
            high,
            low,
            close,
        });

        price = close;
        current += chrono::Duration::days(1);
    }

    Ok(observations)
}

/// [`generate`] driven by a `StdRng` seeded from `seed`.
pub fn generate_seeded(
    params: &SyntheticParams,
    seed: u64,
) -> Result<Vec<PriceObservation>, DataError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(params, &mut rng)
}

/// Box-Muller transform for a standard normal deviate.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps u1 away from zero so ln() stays finite.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_params() -> SyntheticParams {
        SyntheticParams {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            ..SyntheticParams::default()
        }
    }

    #[test]
    fn default_range_is_twenty_years_of_days() {
        let params = SyntheticParams::default();
        assert_eq!(params.days(), 7305);
    }

    #[test]
    fn one_observation_per_calendar_day() {
        let params = short_params();
        let obs = generate_seeded(&params, 7).unwrap();
        assert_eq!(obs.len(), 91);
        assert_eq!(obs[0].date, params.start);
        for pair in obs.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, chrono::Duration::days(1));
            assert_eq!(pair[1].open, pair[0].close);
        }
    }

    #[test]
    fn same_seed_same_series() {
        let params = short_params();
        assert_eq!(
            generate_seeded(&params, 42).unwrap(),
            generate_seeded(&params, 42).unwrap()
        );
    }

    #[test]
    fn different_seeds_differ() {
        let params = short_params();
        assert_ne!(
            generate_seeded(&params, 1).unwrap(),
            generate_seeded(&params, 2).unwrap()
        );
    }

    #[test]
    fn observations_are_sane() {
        let obs = generate_seeded(&short_params(), 3).unwrap();
        assert_eq!(obs[0].open, 100.0);
        assert!(obs.iter().all(PriceObservation::is_sane));
    }

    #[test]
    fn zero_volatility_is_pure_drift() {
        let params = SyntheticParams {
            volatility: 0.0,
            range_scale: 0.0,
            drift: 0.5,
            ..short_params()
        };
        let obs = generate_seeded(&params, 9).unwrap();
        assert_eq!(obs[0].close, 100.5);
        assert_eq!(obs[3].close, 102.0);
    }

    #[test]
    fn prices_never_go_negative() {
        let params = SyntheticParams {
            initial_price: 1.0,
            drift: -0.5,
            ..short_params()
        };
        let obs = generate_seeded(&params, 11).unwrap();
        assert!(obs.iter().all(|o| o.close >= 0.0 && o.low >= 0.0));
    }

    #[test]
    fn rejects_inverted_range() {
        let params = SyntheticParams {
            end: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            ..short_params()
        };
        assert!(matches!(
            generate_seeded(&params, 0),
            Err(DataError::InvalidParams(_))
        ));
    }

    #[test]
    fn rejects_negative_volatility() {
        let params = SyntheticParams {
            volatility: -1.0,
            ..short_params()
        };
        assert!(params.validate().is_err());
    }
}
