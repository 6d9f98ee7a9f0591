//! PAR level recommendations from intermittent daily usage.
//!
//! Each stocked item runs through the same pipeline: a Croston-style demand
//! estimate with a weekday multiplier, projection over the lead time, a
//! service-level stock policy and a short text rationale.

pub mod engine;
pub mod error;
pub mod forecast;
pub mod io;
pub mod model;
pub mod strategy;
pub mod telemetry;

pub use engine::config::RecommendConfig;
pub use engine::recommender::Recommender;
pub use error::{HistoryError, LoadError, PolicyError, RecommendError, ReportError};
pub use forecast::{forecast_item, Forecaster};
pub use io::tables::Dataset;
pub use model::history::{DemandHistory, DemandObservation};
pub use model::item::ItemPolicyInputs;
pub use model::recommendation::{ForecastResult, Rationale, RecommendResponse, Recommendation};
pub use strategy::explain::explain;
pub use strategy::optimization::optimize_par;
