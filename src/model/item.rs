// src/model/item.rs

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Replenishment attributes of one item at one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPolicyInputs {
    pub item_id: String,
    pub current_par: u32,
    pub min_order_qty: u32, // >= 1
    pub lead_time_days: u32, // >= 1
    pub unit_cost: f64,
}

impl ItemPolicyInputs {
    /// Builds validated policy inputs.
    pub fn new(
        item_id: impl Into<String>,
        current_par: u32,
        min_order_qty: u32,
        lead_time_days: u32,
        unit_cost: f64,
    ) -> Result<Self, PolicyError> {
        let item_id = item_id.into();

        if lead_time_days == 0 {
            return Err(PolicyError::ZeroLeadTime { item_id });
        }
        if min_order_qty == 0 {
            return Err(PolicyError::ZeroMinOrderQty { item_id });
        }
        if !unit_cost.is_finite() || unit_cost < 0.0 {
            return Err(PolicyError::InvalidUnitCost { item_id, unit_cost });
        }

        Ok(Self {
            item_id,
            current_par,
            min_order_qty,
            lead_time_days,
            unit_cost,
        })
    }
}
