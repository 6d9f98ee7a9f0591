// src/error.rs

//! Error types for the recommendation pipeline.
//!
//! The numeric core (estimation, projection, optimization, explanation) is
//! total and never returns an error. Everything here guards the edges: building
//! validated inputs, loading tables, aggregating a site and exporting reports.

use chrono::NaiveDate;
use thiserror::Error;

/// A usage history could not be built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HistoryError {
    /// No observations at all. Callers skip such items before forecasting.
    #[error("usage history is empty")]
    Empty,

    #[error("negative quantity {quantity} on {day}")]
    NegativeQuantity { day: NaiveDate, quantity: f64 },

    #[error("non-finite quantity on {day}")]
    NonFiniteQuantity { day: NaiveDate },
}

/// Item policy attributes outside their admissible range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    #[error("item {item_id}: lead_time_days must be at least 1")]
    ZeroLeadTime { item_id: String },

    #[error("item {item_id}: min_order_qty must be at least 1")]
    ZeroMinOrderQty { item_id: String },

    #[error("item {item_id}: unit_cost must be finite and non-negative, got {unit_cost}")]
    InvalidUnitCost { item_id: String, unit_cost: f64 },
}

/// Failure while reading the item, site-item or usage tables.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
}

/// Failure while producing recommendations for a site.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecommendError {
    /// A site item has no row in the item master, so there is no unit cost.
    #[error("item {item_id} is stocked at the site but missing from the item master")]
    MissingItemMaster { item_id: String },

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("item {item_id}: {source}")]
    History {
        item_id: String,
        #[source]
        source: HistoryError,
    },
}

/// Failure while exporting a recommendation report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Invalid parameters for a synthetic usage pattern.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("usage probability must lie in [0, 1]: {0}")]
    Occurrence(#[from] rand_distr::BernoulliError),

    #[error("usage size distribution: {0}")]
    Size(#[from] rand_distr::NormalError),
}
