// src/forecast/seasonality.rs

use crate::model::history::DailySeries;

const WEEKDAYS: usize = 7;

/// Ratio of each weekday's mean usage to the overall mean (Monday first).
///
/// Only [`WeekdayProfile::multiplier`] feeds the forecast: the seven ratios are
/// averaged into one scalar rather than applied per projected day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekdayProfile {
    ratios: [f64; WEEKDAYS],
}

impl WeekdayProfile {
    pub fn from_series(series: &DailySeries) -> Self {
        let mut sums = [0.0; WEEKDAYS];
        let mut counts = [0usize; WEEKDAYS];

        for (offset, qty) in series.quantities().iter().enumerate() {
            let wd = series.weekday_index(offset);
            sums[wd] += qty;
            counts[wd] += 1;
        }

        let overall = if series.is_empty() {
            0.0
        } else {
            series.quantities().iter().sum::<f64>() / series.len() as f64
        };
        let divisor = if overall == 0.0 { 1.0 } else { overall };

        let mut ratios = [1.0; WEEKDAYS];
        for wd in 0..WEEKDAYS {
            if counts[wd] > 0 {
                ratios[wd] = (sums[wd] / counts[wd] as f64) / divisor;
            }
        }

        Self { ratios }
    }

    pub fn ratios(&self) -> &[f64; WEEKDAYS] {
        &self.ratios
    }

    /// Average of the seven weekday ratios.
    pub fn multiplier(&self) -> f64 {
        self.ratios.iter().sum::<f64>() / WEEKDAYS as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn flat_series_is_neutral() {
        let series = DailySeries::new(monday(), vec![5.0; 28]);
        let profile = WeekdayProfile::from_series(&series);
        assert!(profile.ratios().iter().all(|r| (r - 1.0).abs() < 1e-12));
        assert!((profile.multiplier() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_weekdays_default_to_one() {
        // Monday..Wednesday only, usage only on Monday.
        let series = DailySeries::new(monday(), vec![3.0, 0.0, 0.0]);
        let profile = WeekdayProfile::from_series(&series);

        let r = profile.ratios();
        assert!((r[0] - 3.0).abs() < 1e-12);
        assert_eq!(r[1], 0.0);
        assert_eq!(r[2], 0.0);
        assert!(r[3..].iter().all(|x| *x == 1.0));
        assert!((profile.multiplier() - 7.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn zero_series_uses_unit_divisor() {
        let series = DailySeries::new(monday(), vec![0.0; 14]);
        let profile = WeekdayProfile::from_series(&series);
        assert_eq!(profile.multiplier(), 0.0);
    }

    #[test]
    fn partial_weeks_shift_the_multiplier() {
        // Ten days from Monday: Mon, Tue, Wed appear twice.
        let mut q = vec![0.0; 10];
        q[0] = 7.0;
        let series = DailySeries::new(monday(), q);
        let profile = WeekdayProfile::from_series(&series);

        // overall mean 0.7, Monday mean 3.5 -> ratio 5; the rest are 0.
        assert!((profile.ratios()[0] - 5.0).abs() < 1e-12);
        assert!((profile.multiplier() - 5.0 / 7.0).abs() < 1e-12);
    }
}
