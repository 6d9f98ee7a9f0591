// src/io/demand.rs

//! Synthetic daily usage, for trying the pipeline without real data.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Normal};

use crate::error::GeneratorError;
use crate::io::tables::{Dataset, ItemRecord, SiteItemRecord, UsageRecord};
use crate::model::history::DemandObservation;

/// Generates a usage series where every day has the exact same quantity.
pub fn generate_constant_usage(days: usize, value: f64) -> Vec<f64> {
    vec![value; days]
}

/// Generates a "Step" pattern: `before` until `step_day`, `after` from then on.
pub fn generate_step_usage(days: usize, step_day: usize, before: f64, after: f64) -> Vec<f64> {
    (0..days)
        .map(|d| if d < step_day { before } else { after })
        .collect()
}

/// Generates intermittent usage: on each day usage happens with probability
/// `occurrence`, and its size is drawn from a Normal distribution.
///
/// # Arguments
/// * `days` - Length of the series.
/// * `occurrence` - Chance of any usage on a given day (e.g., 0.3).
/// * `mean_size` - Average quantity on a usage day (e.g., 4.0).
/// * `std_dev` - Spread of the quantity on a usage day (e.g., 1.5).
pub fn generate_intermittent_usage<R: Rng + ?Sized>(
    rng: &mut R,
    days: usize,
    occurrence: f64,
    mean_size: f64,
    std_dev: f64,
) -> Result<Vec<f64>, GeneratorError> {
    let happens = Bernoulli::new(occurrence)?;
    let size = Normal::new(mean_size, std_dev)?;

    let mut series = Vec::with_capacity(days);
    for _ in 0..days {
        if !happens.sample(rng) {
            series.push(0.0);
            continue;
        }

        // Whole units, at least one: a usage day always records something.
        let qty: f64 = size.sample(rng).round();
        series.push(qty.max(1.0));
    }

    Ok(series)
}

/// Turns a series starting at `start` into observations, dropping zero days
/// the way usage logs only record days with activity.
pub fn to_observations(start: NaiveDate, series: &[f64]) -> Vec<DemandObservation> {
    series
        .iter()
        .enumerate()
        .filter(|(_, qty)| **qty > 0.0)
        .map(|(offset, qty)| DemandObservation::new(start + Duration::days(offset as i64), *qty))
        .collect()
}

/// Usage shape drawn for every item of a sample dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsagePattern {
    /// Random usage days with Normal sizes.
    Intermittent,
    /// The same whole quantity every day.
    Constant,
    /// Usage doubles halfway through the history.
    Step,
}

/// Shape of a generated sample dataset.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub site_id: String,
    pub items: usize,
    pub days: usize,
    pub start: NaiveDate,
    pub pattern: UsagePattern,
}

/// Builds a complete dataset for one site: an item master, site items with
/// assorted policies and usage of the requested pattern for each item.
pub fn generate_sample_dataset<R: Rng + ?Sized>(
    rng: &mut R,
    spec: &SampleSpec,
) -> Result<Dataset, GeneratorError> {
    let mut dataset = Dataset::default();

    for n in 0..spec.items {
        let item_id = format!("ITEM-{:03}", n + 1);

        let occurrence = rng.gen_range(0.05..0.9);
        let mean_size = rng.gen_range(1.0..12.0);
        let series = match spec.pattern {
            UsagePattern::Intermittent => {
                generate_intermittent_usage(rng, spec.days, occurrence, mean_size, mean_size / 3.0)?
            }
            UsagePattern::Constant => generate_constant_usage(spec.days, mean_size.round()),
            UsagePattern::Step => generate_step_usage(
                spec.days,
                spec.days / 2,
                mean_size.round(),
                (mean_size * 2.0).round(),
            ),
        };

        dataset.items.push(ItemRecord {
            item_id: item_id.clone(),
            unit_cost: (rng.gen_range(0.5..80.0_f64) * 100.0).round() / 100.0,
            description: None,
        });

        dataset.site_items.push(SiteItemRecord {
            site_id: spec.site_id.clone(),
            item_id: item_id.clone(),
            current_par: rng.gen_range(0..40),
            min_order_qty: Some(rng.gen_range(1..=12)),
            lead_time_days: Some(rng.gen_range(2..=14)),
        });

        dataset
            .usage
            .extend(to_observations(spec.start, &series).into_iter().map(|obs| {
                UsageRecord {
                    site_id: spec.site_id.clone(),
                    item_id: item_id.clone(),
                    day: obs.day,
                    qty: obs.quantity,
                }
            }));
    }

    Ok(dataset)
}
