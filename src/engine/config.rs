// src/engine/config.rs

use serde::{Deserialize, Serialize};

/// Run-wide policy settings supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Target probability of not stocking out during the lead time.
    pub service_level: f64,
    /// Days between replenishment decisions.
    pub review_period_days: u32,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            service_level: 0.98,
            review_period_days: 7,
        }
    }
}
