// src/forecast/croston.rs

//! Croston-style estimator for intermittent demand.
//!
//! Demand is split into two parts: how much is used when usage happens
//! (`q_hat`, the mean non-zero quantity) and how often it happens (`p_hat`,
//! the mean number of days between usage days). The daily rate is
//! `q_hat / p_hat`.

use crate::forecast::traits::{BaseEstimate, DemandEstimator};

/// Guard on the inter-arrival denominator.
pub const INTERVAL_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct CrostonEstimator {
    epsilon: f64,
}

impl CrostonEstimator {
    pub fn new() -> Self {
        Self {
            epsilon: INTERVAL_EPSILON,
        }
    }
}

impl Default for CrostonEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl DemandEstimator for CrostonEstimator {
    fn estimate(&self, quantities: &[f64]) -> BaseEstimate {
        let demand_days: Vec<usize> = quantities
            .iter()
            .enumerate()
            .filter(|(_, qty)| **qty > 0.0)
            .map(|(idx, _)| idx)
            .collect();

        if demand_days.is_empty() {
            return BaseEstimate::default();
        }

        let sizes: Vec<f64> = demand_days.iter().map(|&idx| quantities[idx]).collect();
        let q_hat = mean(&sizes);
        let p_hat = mean_interval(&demand_days, quantities.len());

        BaseEstimate {
            avg_daily: q_hat / p_hat.max(self.epsilon),
            sigma_daily: sample_std_dev(&sizes) / p_hat.max(1.0),
        }
    }
}

/// Mean number of elapsed days between demand days.
///
/// The first interval is the number of days elapsed from day 0 to the first
/// demand day, so usage on day 0 contributes an interval of 0. With a single
/// demand day there is no interval to average and the series length divided
/// by the demand count is used instead.
fn mean_interval(demand_days: &[usize], total_days: usize) -> f64 {
    let count = demand_days.len() as f64;

    if demand_days.len() == 1 {
        return (total_days as f64 / count).max(1.0);
    }

    let mut previous: Option<usize> = None;
    let mut total = 0.0;
    for &day in demand_days {
        total += match previous {
            Some(prev) => (day - prev) as f64,
            None => day as f64,
        };
        previous = Some(day);
    }

    total / count
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation with Bessel's correction; zero below 2 samples.
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}
