// src/forecast/lead_time.rs

use crate::forecast::traits::BaseEstimate;
use crate::model::recommendation::ForecastResult;

/// Scales a daily estimate to demand over `lead_time_days`.
///
/// Daily demand is treated as i.i.d., so the mean grows linearly with the
/// lead time and the standard deviation with its square root.
pub fn project(daily: BaseEstimate, lead_time_days: u32) -> ForecastResult {
    let days = lead_time_days as f64;

    ForecastResult {
        avg_daily: daily.avg_daily,
        sigma_daily: daily.sigma_daily,
        mu_lead: daily.avg_daily * days,
        sigma_lead: daily.sigma_daily * days.sqrt(),
        lead_time_days,
    }
}
