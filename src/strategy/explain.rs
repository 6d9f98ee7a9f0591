// src/strategy/explain.rs

use crate::model::recommendation::{round2, Rationale, Recommendation};

/// Annual holding cost as a share of unit cost.
pub const ANNUAL_HOLDING_RATE: f64 = 0.18;

/// Monthly cost of holding the par increase, rounded to cents.
///
/// A par that stays put (or would drop) costs nothing; no savings are claimed.
pub fn monthly_holding_estimate(rec: &Recommendation, unit_cost: f64) -> f64 {
    let increase = rec.proposed_par.saturating_sub(rec.current_par) as f64;
    round2(increase * unit_cost * ANNUAL_HOLDING_RATE / 12.0)
}

/// Renders a recommendation as a short rationale.
pub fn explain(rec: &Recommendation, unit_cost: f64) -> Rationale {
    let avg = rec.forecast.avg_daily;
    let lead = rec.forecast.lead_time_days;
    let holding = monthly_holding_estimate(rec, unit_cost);

    let action = if rec.proposed_par > rec.current_par {
        "Increasing PAR to"
    } else {
        "Keeping PAR at"
    };

    let summary = format!(
        "{} {} protects a {}-day lead time (ROP {}, safety stock {}). Est. holding impact ${:.2}/mo.",
        action, rec.proposed_par, lead, rec.rop, rec.safety_stock, holding
    );

    let bullets = vec![
        format!("Avg daily demand ≈ {:.2}", avg),
        format!("Lead time demand ≈ {:.2}", round2(avg * lead as f64)),
        format!(
            "{}% service level assumption",
            (rec.service_level * 100.0).round()
        ),
        format!("Min order qty: {}", rec.constraints.min_order_qty),
    ];

    Rationale {
        summary,
        bullets,
        citations: Vec::new(),
    }
}
