// src/forecast/traits.rs

use std::fmt::Debug;

/// Daily demand rate and spread before any seasonality or lead-time scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaseEstimate {
    pub avg_daily: f64,
    pub sigma_daily: f64,
}

/// Turns a contiguous daily usage series into a baseline daily rate.
///
/// `Send + Sync` so a single estimator can be shared by the worker pool that
/// fans items out.
pub trait DemandEstimator: Debug + Send + Sync {
    /// Estimates the daily rate from `quantities`, one entry per day with
    /// missing days already filled with zero.
    ///
    /// Must be total: an empty or all-zero series yields a zero estimate.
    fn estimate(&self, quantities: &[f64]) -> BaseEstimate;
}
