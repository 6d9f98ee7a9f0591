// src/forecast/mod.rs

//! Demand estimation and lead-time projection.

pub mod croston;
pub mod lead_time;
pub mod seasonality;
pub mod traits;

use tracing::trace;

use crate::forecast::croston::CrostonEstimator;
use crate::forecast::seasonality::WeekdayProfile;
use crate::forecast::traits::{BaseEstimate, DemandEstimator};
use crate::model::history::DemandHistory;
use crate::model::recommendation::ForecastResult;

/// Lower bound for the daily standard deviation in a forecast.
pub const SIGMA_FLOOR: f64 = 1e-9;

/// Runs an estimator over a history, applies the weekday multiplier and
/// projects the result over the lead time.
#[derive(Debug, Clone, Default)]
pub struct Forecaster<E: DemandEstimator = CrostonEstimator> {
    estimator: E,
}

impl<E: DemandEstimator> Forecaster<E> {
    pub fn new(estimator: E) -> Self {
        Self { estimator }
    }

    pub fn forecast(&self, history: &DemandHistory, lead_time_days: u32) -> ForecastResult {
        let series = history.daily_series();
        let base = self.estimator.estimate(series.quantities());
        let seasonality = WeekdayProfile::from_series(&series).multiplier();

        trace!(
            days = series.len(),
            avg_daily = base.avg_daily,
            sigma_daily = base.sigma_daily,
            seasonality,
            "estimated daily demand"
        );

        let daily = BaseEstimate {
            avg_daily: base.avg_daily * seasonality,
            sigma_daily: base.sigma_daily.max(SIGMA_FLOOR),
        };

        lead_time::project(daily, lead_time_days)
    }
}

/// Forecast with the default Croston estimator.
pub fn forecast_item(history: &DemandHistory, lead_time_days: u32) -> ForecastResult {
    Forecaster::<CrostonEstimator>::default().forecast(history, lead_time_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::history::DemandObservation;
    use chrono::{Duration, NaiveDate};

    /// Returns a fixed estimate regardless of input.
    #[derive(Debug)]
    struct Fixed(BaseEstimate);

    impl DemandEstimator for Fixed {
        fn estimate(&self, _quantities: &[f64]) -> BaseEstimate {
            self.0
        }
    }

    fn history(quantities: &[f64]) -> DemandHistory {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let obs = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| DemandObservation::new(start + Duration::days(i as i64), *q))
            .collect();
        DemandHistory::new(obs).unwrap()
    }

    #[test]
    fn zero_history_forecasts_zero_demand() {
        let fc = forecast_item(&history(&[0.0; 21]), 7);
        assert_eq!(fc.avg_daily, 0.0);
        assert_eq!(fc.mu_lead, 0.0);
        assert!(fc.sigma_daily <= SIGMA_FLOOR);
    }

    #[test]
    fn doubling_lead_time_scales_mean_and_spread() {
        let forecaster = Forecaster::new(Fixed(BaseEstimate {
            avg_daily: 1.5,
            sigma_daily: 0.75,
        }));
        let h = history(&[1.0; 14]);

        let short = forecaster.forecast(&h, 5);
        let long = forecaster.forecast(&h, 10);

        assert!((long.mu_lead - 2.0 * short.mu_lead).abs() < 1e-12);
        assert!((long.sigma_lead - 2f64.sqrt() * short.sigma_lead).abs() < 1e-12);
    }

    #[test]
    fn seasonality_scales_rate_but_not_spread() {
        // Whole weeks with a flat profile keep the multiplier at 1.
        let forecaster = Forecaster::new(Fixed(BaseEstimate {
            avg_daily: 2.0,
            sigma_daily: 0.5,
        }));
        let fc = forecaster.forecast(&history(&[3.0; 14]), 1);
        assert!((fc.avg_daily - 2.0).abs() < 1e-12);
        assert_eq!(fc.sigma_daily, 0.5);

        // Usage only on the first Monday of ten days: multiplier 5/7.
        let mut q = [0.0; 10];
        q[0] = 7.0;
        let fc = forecaster.forecast(&history(&q), 1);
        assert!((fc.avg_daily - 2.0 * 5.0 / 7.0).abs() < 1e-12);
        assert_eq!(fc.sigma_daily, 0.5);
    }
}
