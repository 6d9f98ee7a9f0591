// src/strategy/optimization.rs

//! Module for stock policy calculations.
//!
//! Turns a lead-time demand forecast and a target service level into a
//! safety stock, reorder point, par level and reorder quantity.

use std::collections::BTreeMap;

use crate::forecast::SIGMA_FLOOR;
use crate::model::item::ItemPolicyInputs;
use crate::model::recommendation::{Constraints, ForecastResult, ForecastSummary, Recommendation};

/// Canonical service levels and their standard normal z-scores.
pub const Z_TABLE: [(f64, f64); 4] = [
    (0.90, 1.2816),
    (0.95, 1.6449),
    (0.98, 2.0537),
    (0.99, 2.3263),
];

/// Level used when the requested one is not in [`Z_TABLE`].
pub const DEFAULT_SERVICE_LEVEL: f64 = 0.98;
pub const DEFAULT_Z: f64 = 2.0537;

/// Relative distance from a whole number that still counts as that number
/// when rounding up. Absorbs products like `0.1 * 30` landing a hair above
/// an integer.
pub const RELATIVE_ROUNDING_TOLERANCE: f64 = 1e-9;

/// A service level resolved against [`Z_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceLevel {
    pub level: f64,
    pub z: f64,
}

impl ServiceLevel {
    /// Looks up the z-score for `requested` rounded to 2 decimals.
    ///
    /// Unknown levels fall back to 98%.
    pub fn resolve(requested: f64) -> Self {
        let rounded = (requested * 100.0).round() / 100.0;

        Z_TABLE
            .iter()
            .find(|(level, _)| (level - rounded).abs() < 1e-9)
            .map(|&(level, z)| Self { level, z })
            .unwrap_or(Self {
                level: DEFAULT_SERVICE_LEVEL,
                z: DEFAULT_Z,
            })
    }
}

/// Rounds a quantity up to whole units, never below zero.
///
/// Values within [`RELATIVE_ROUNDING_TOLERANCE`] of a whole number snap to
/// it. Quantities past `u32::MAX` saturate.
pub fn ceil_units(quantity: f64) -> u32 {
    let nearest = quantity.round();
    let tolerance = RELATIVE_ROUNDING_TOLERANCE * nearest.abs().max(1.0);
    let rounded = if (quantity - nearest).abs() <= tolerance {
        nearest
    } else {
        quantity.ceil()
    };

    if rounded <= 0.0 {
        0
    } else {
        rounded as u32
    }
}

/// Computes the replenishment policy for one item.
///
/// # Formula
/// - SafetyStock = ceil(Z * sigma_lead)
/// - ROP = ceil(mu_lead + Z * sigma_lead)
/// - Par = max(CurrentPar, ROP + ceil(avg_daily * ReviewDays))
/// - ReorderQty = max(MOQ, ceil(avg_daily * (ReviewDays + LeadTime)))
///
/// Safety stock and ROP are each rounded from the unrounded product, so ROP
/// need not equal `ceil(mu_lead) + safety_stock`.
///
/// The returned recommendation has no rationale yet.
pub fn optimize_par(
    item: &ItemPolicyInputs,
    forecast: &ForecastResult,
    service_level: f64,
    review_period_days: u32,
) -> Recommendation {
    let level = ServiceLevel::resolve(service_level);
    // A floored sigma stands for "no observed spread" and buys no buffer.
    let buffer = if forecast.sigma_daily <= SIGMA_FLOOR {
        0.0
    } else {
        level.z * forecast.sigma_lead
    };

    let safety_stock = ceil_units(buffer);
    let rop = ceil_units(forecast.mu_lead + buffer);

    let review_demand = ceil_units(forecast.avg_daily * review_period_days as f64);
    let proposed_par = item.current_par.max(rop.saturating_add(review_demand));

    let cycle_days = review_period_days.saturating_add(forecast.lead_time_days) as f64;
    let reorder_qty = item
        .min_order_qty
        .max(ceil_units(forecast.avg_daily * cycle_days));

    Recommendation {
        item_id: item.item_id.clone(),
        current_par: item.current_par,
        forecast: ForecastSummary::from(forecast),
        service_level: level.level,
        safety_stock,
        rop,
        proposed_par,
        reorder_qty,
        constraints: Constraints {
            min_order_qty: item.min_order_qty,
            backorder: false,
        },
        metrics: BTreeMap::new(),
        rationale: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(current_par: u32, moq: u32, lead: u32) -> ItemPolicyInputs {
        ItemPolicyInputs::new("SYRINGE-10ML", current_par, moq, lead, 0.4).unwrap()
    }

    fn forecast(avg_daily: f64, sigma_daily: f64, lead: u32) -> ForecastResult {
        let days = lead as f64;
        ForecastResult {
            avg_daily,
            sigma_daily,
            mu_lead: avg_daily * days,
            sigma_lead: sigma_daily * days.sqrt(),
            lead_time_days: lead,
        }
    }

    #[test]
    fn canonical_levels_resolve_to_table() {
        assert_eq!(ServiceLevel::resolve(0.90).z, 1.2816);
        assert_eq!(ServiceLevel::resolve(0.95).z, 1.6449);
        assert_eq!(ServiceLevel::resolve(0.9799).z, 2.0537);
        assert_eq!(ServiceLevel::resolve(0.991).z, 2.3263);
    }

    #[test]
    fn unknown_levels_fall_back_to_98() {
        for requested in [0.5, 0.97, 0.999, 1.0, -3.0, f64::NAN] {
            let level = ServiceLevel::resolve(requested);
            assert_eq!(level.level, 0.98);
            assert_eq!(level.z, 2.0537);
        }
    }

    #[test]
    fn ceil_units_rounds_up_and_clamps() {
        assert_eq!(ceil_units(0.0), 0);
        assert_eq!(ceil_units(-4.2), 0);
        assert_eq!(ceil_units(2.01), 3);
        assert_eq!(ceil_units(3.0), 3);
        assert_eq!(ceil_units(1e-12), 0);
        assert_eq!(ceil_units(1e-8), 1);
    }

    #[test]
    fn ceil_units_only_forgives_noise() {
        assert_eq!(ceil_units(7.0000005), 8);
        assert_eq!(ceil_units(0.1 * 30.0), 3);
        assert_eq!(ceil_units(1_000_000.0 + 0.01), 1_000_001);
        assert_eq!(ceil_units(1e12), u32::MAX);
    }

    #[test]
    fn worked_example() {
        // avg 1/day, sigma 2/day, 4 day lead: mu 4, sigma_lead 4.
        let rec = optimize_par(&item(0, 1, 4), &forecast(1.0, 2.0, 4), 0.95, 7);

        // 1.6449 * 4 = 6.5796
        assert_eq!(rec.safety_stock, 7);
        assert_eq!(rec.rop, 11);
        assert_eq!(rec.proposed_par, 18);
        assert_eq!(rec.reorder_qty, 11);
        assert_eq!(rec.service_level, 0.95);
        assert!(!rec.constraints.backorder);
        assert!(rec.metrics.is_empty());
        assert!(rec.rationale.is_none());
    }

    #[test]
    fn rop_and_safety_stock_round_independently() {
        // mu 2.5, buffer 2.0537 * 0.5 = 1.02685 -> ss 2, rop ceil(3.52685) = 4
        let fc = ForecastResult {
            avg_daily: 2.5,
            sigma_daily: 0.5,
            mu_lead: 2.5,
            sigma_lead: 0.5,
            lead_time_days: 1,
        };
        let rec = optimize_par(&item(0, 1, 1), &fc, 0.98, 7);
        assert_eq!(rec.safety_stock, 2);
        assert_eq!(rec.rop, 4);
        assert_ne!(rec.rop, 3 + rec.safety_stock);
    }

    #[test]
    fn current_par_is_a_floor() {
        let rec = optimize_par(&item(500, 1, 7), &forecast(1.0, 1.0, 7), 0.99, 7);
        assert_eq!(rec.proposed_par, 500);
    }

    #[test]
    fn min_order_qty_is_a_floor() {
        let rec = optimize_par(&item(0, 48, 7), &forecast(0.5, 0.1, 7), 0.98, 7);
        assert_eq!(rec.reorder_qty, 48);
    }

    #[test]
    fn zero_demand_pins_everything() {
        let fc = forecast(0.0, crate::forecast::SIGMA_FLOOR, 14);
        let rec = optimize_par(&item(12, 6, 14), &fc, 0.99, 7);
        assert_eq!(rec.safety_stock, 0);
        assert_eq!(rec.rop, 0);
        assert_eq!(rec.proposed_par, 12);
        assert_eq!(rec.reorder_qty, 6);
    }

    #[test]
    fn floored_sigma_buys_no_safety_stock() {
        let fc = ForecastResult {
            avg_daily: 2.5,
            sigma_daily: crate::forecast::SIGMA_FLOOR,
            mu_lead: 2.5,
            sigma_lead: crate::forecast::SIGMA_FLOOR,
            lead_time_days: 1,
        };
        let rec = optimize_par(&item(0, 1, 1), &fc, 0.99, 7);
        assert_eq!(rec.safety_stock, 0);
        assert_eq!(rec.rop, 3);
    }

    #[test]
    fn huge_review_period_saturates() {
        let rec = optimize_par(&item(0, 1, 7), &forecast(1.0, 0.5, 7), 0.98, u32::MAX);
        assert_eq!(rec.reorder_qty, u32::MAX);
        assert_eq!(rec.proposed_par, u32::MAX);
    }
}
