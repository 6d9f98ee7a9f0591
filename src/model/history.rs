// src/model/history.rs

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::HistoryError;

/// Roughly ten years of days.
const SUSPICIOUS_SPAN_DAYS: usize = 3660;

/// A span this long with so few rows usually means a mistyped year.
fn is_suspicious_span(span_days: usize, rows: usize) -> bool {
    span_days > SUSPICIOUS_SPAN_DAYS && span_days > rows.saturating_mul(50)
}

/// Usage recorded for one item on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandObservation {
    pub day: NaiveDate,
    pub quantity: f64,
}

impl DemandObservation {
    pub fn new(day: NaiveDate, quantity: f64) -> Self {
        Self { day, quantity }
    }
}

/// Day-ordered usage history of one item at one site.
///
/// Construction sorts the observations, merges rows that share a day by
/// summing them, and rejects empty input as well as negative or non-finite
/// quantities. Days that are absent mean zero usage.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandHistory {
    observations: Vec<DemandObservation>,
}

impl DemandHistory {
    pub fn new(mut observations: Vec<DemandObservation>) -> Result<Self, HistoryError> {
        if observations.is_empty() {
            return Err(HistoryError::Empty);
        }

        for obs in &observations {
            if !obs.quantity.is_finite() {
                return Err(HistoryError::NonFiniteQuantity { day: obs.day });
            }
            if obs.quantity < 0.0 {
                return Err(HistoryError::NegativeQuantity {
                    day: obs.day,
                    quantity: obs.quantity,
                });
            }
        }

        observations.sort_by_key(|obs| obs.day);

        let mut merged: Vec<DemandObservation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match merged.last_mut() {
                Some(last) if last.day == obs.day => last.quantity += obs.quantity,
                _ => merged.push(obs),
            }
        }

        Ok(Self {
            observations: merged,
        })
    }

    pub fn observations(&self) -> &[DemandObservation] {
        &self.observations
    }

    pub fn first_day(&self) -> NaiveDate {
        // Non-empty by construction.
        self.observations[0].day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.observations[self.observations.len() - 1].day
    }

    /// Expands the history into a contiguous daily series from the first to
    /// the last observed day, filling missing days with zero.
    pub fn daily_series(&self) -> DailySeries {
        let start = self.first_day();
        let span = (self.last_day() - start).num_days() as usize + 1;

        if is_suspicious_span(span, self.observations.len()) {
            warn!(
                first_day = %start,
                last_day = %self.last_day(),
                span_days = span,
                rows = self.observations.len(),
                "usage history spans far more days than it has rows"
            );
        }

        let mut quantities = vec![0.0; span];
        for obs in &self.observations {
            let offset = (obs.day - start).num_days() as usize;
            quantities[offset] = obs.quantity;
        }

        DailySeries { start, quantities }
    }
}

/// A gap-free run of daily quantities starting at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    quantities: Vec<f64>,
}

impl DailySeries {
    pub fn new(start: NaiveDate, quantities: Vec<f64>) -> Self {
        Self { start, quantities }
    }

    pub fn quantities(&self) -> &[f64] {
        &self.quantities
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Weekday index (Monday = 0 .. Sunday = 6) of the day at `offset`.
    pub fn weekday_index(&self, offset: usize) -> usize {
        let day = self.start + Duration::days(offset as i64);
        day.weekday().num_days_from_monday() as usize
    }
}
