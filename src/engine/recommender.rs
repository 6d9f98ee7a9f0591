// src/engine/recommender.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::engine::config::RecommendConfig;
use crate::error::RecommendError;
use crate::forecast::croston::CrostonEstimator;
use crate::forecast::traits::DemandEstimator;
use crate::forecast::Forecaster;
use crate::io::tables::{Dataset, ItemRecord, SiteItemRecord};
use crate::model::history::{DemandHistory, DemandObservation};
use crate::model::item::ItemPolicyInputs;
use crate::model::recommendation::{RecommendResponse, Recommendation};
use crate::strategy::explain::explain;
use crate::strategy::optimization::optimize_par;

/// Runs the forecast → optimize → explain pipeline.
#[derive(Debug, Clone, Default)]
pub struct Recommender<E: DemandEstimator = CrostonEstimator> {
    config: RecommendConfig,
    forecaster: Forecaster<E>,
}

impl Recommender<CrostonEstimator> {
    pub fn new(config: RecommendConfig) -> Self {
        Self::with_estimator(config, CrostonEstimator::new())
    }
}

impl<E: DemandEstimator> Recommender<E> {
    pub fn with_estimator(config: RecommendConfig, estimator: E) -> Self {
        Self {
            config,
            forecaster: Forecaster::new(estimator),
        }
    }

    /// Full recommendation, rationale included, for one item.
    pub fn recommend_item(&self, item: &ItemPolicyInputs, history: &DemandHistory) -> Recommendation {
        let forecast = self.forecaster.forecast(history, item.lead_time_days);

        let mut rec = optimize_par(
            item,
            &forecast,
            self.config.service_level,
            self.config.review_period_days,
        );
        rec.rationale = Some(explain(&rec, item.unit_cost));

        debug!(
            item_id = %item.item_id,
            avg_daily = forecast.avg_daily,
            mu_lead = forecast.mu_lead,
            sigma_lead = forecast.sigma_lead,
            rop = rec.rop,
            proposed_par = rec.proposed_par,
            "item recommended"
        );

        rec
    }

    /// Recommendations for every item stocked at `site_id`, in site-item
    /// order. Items without any usage rows are skipped.
    ///
    /// `generated_at` is stamped onto the response as given.
    pub fn recommend_site(
        &self,
        dataset: &Dataset,
        site_id: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<RecommendResponse, RecommendError> {
        let master: HashMap<&str, &ItemRecord> = dataset
            .items
            .iter()
            .map(|row| (row.item_id.as_str(), row))
            .collect();

        let mut usage: HashMap<&str, Vec<DemandObservation>> = HashMap::new();
        for row in dataset.usage.iter().filter(|row| row.site_id == site_id) {
            usage
                .entry(row.item_id.as_str())
                .or_default()
                .push(DemandObservation::new(row.day, row.qty));
        }

        let site_items: Vec<&SiteItemRecord> = dataset
            .site_items
            .iter()
            .filter(|row| row.site_id == site_id)
            .collect();

        let results = site_items
            .par_iter()
            .map(|row| self.recommend_row(row, &master, &usage))
            .collect::<Result<Vec<_>, _>>()?;

        let items: Vec<Recommendation> = results.into_iter().flatten().collect();

        info!(
            site_id,
            stocked = site_items.len(),
            recommended = items.len(),
            "site recommendations ready"
        );

        Ok(RecommendResponse {
            generated_at,
            site_id: site_id.to_string(),
            items,
        })
    }

    fn recommend_row(
        &self,
        row: &SiteItemRecord,
        master: &HashMap<&str, &ItemRecord>,
        usage: &HashMap<&str, Vec<DemandObservation>>,
    ) -> Result<Option<Recommendation>, RecommendError> {
        let observations = match usage.get(row.item_id.as_str()) {
            Some(obs) if !obs.is_empty() => obs.clone(),
            _ => {
                warn!(item_id = %row.item_id, site_id = %row.site_id, "no usage history, skipping");
                return Ok(None);
            }
        };

        let unit_cost = master
            .get(row.item_id.as_str())
            .map(|item| item.unit_cost)
            .ok_or_else(|| RecommendError::MissingItemMaster {
                item_id: row.item_id.clone(),
            })?;

        let item = ItemPolicyInputs::new(
            row.item_id.clone(),
            row.current_par,
            row.min_order_qty(),
            row.lead_time_days(),
            unit_cost,
        )?;

        let history =
            DemandHistory::new(observations).map_err(|source| RecommendError::History {
                item_id: row.item_id.clone(),
                source,
            })?;

        Ok(Some(self.recommend_item(&item, &history)))
    }
}
