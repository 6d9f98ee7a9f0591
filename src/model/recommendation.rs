// src/model/recommendation.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lead-time demand distribution of one item. Recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub avg_daily: f64,
    pub sigma_daily: f64,
    pub mu_lead: f64,
    pub sigma_lead: f64,
    pub lead_time_days: u32,
}

/// The part of the forecast that is reported back, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub avg_daily: f64,
    pub lead_time_days: u32,
    pub sigma_lead: f64,
}

impl From<&ForecastResult> for ForecastSummary {
    fn from(forecast: &ForecastResult) -> Self {
        Self {
            avg_daily: round2(forecast.avg_daily),
            lead_time_days: forecast.lead_time_days,
            sigma_lead: round2(forecast.sigma_lead),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub min_order_qty: u32,
    /// Backorders are never assumed.
    pub backorder: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rationale {
    pub summary: String,
    pub bullets: Vec<String>,
    pub citations: Vec<String>,
}

/// Replenishment recommendation for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_id: String,
    pub current_par: u32,
    pub forecast: ForecastSummary,
    /// Canonical service level the z-score was taken from.
    pub service_level: f64,
    pub safety_stock: u32,
    pub rop: u32,
    pub proposed_par: u32,
    pub reorder_qty: u32,
    pub constraints: Constraints,
    pub metrics: BTreeMap<String, f64>,
    pub rationale: Option<Rationale>,
}

/// All recommendations produced for one site in one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub generated_at: DateTime<Utc>,
    pub site_id: String,
    pub items: Vec<Recommendation>,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
