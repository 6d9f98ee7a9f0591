// src/io/reporting.rs

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::error::ReportError;
use crate::model::recommendation::RecommendResponse;

/// Output format of a recommendation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

/// One flattened CSV row per recommended item.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow<'a> {
    pub generated_at: String,
    pub site_id: &'a str,
    pub item_id: &'a str,
    pub current_par: u32,
    pub proposed_par: u32,
    pub rop: u32,
    pub safety_stock: u32,
    pub reorder_qty: u32,
    pub min_order_qty: u32,
    pub avg_daily: f64,
    pub sigma_lead: f64,
    pub lead_time_days: u32,
    pub service_level: f64,
    pub summary: &'a str,
}

/// Writes the whole response as pretty-printed JSON.
pub fn write_json<W: Write>(mut writer: W, response: &RecommendResponse) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the response as CSV, one row per item.
pub fn write_csv<W: Write>(writer: W, response: &RecommendResponse) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let generated_at = response.generated_at.to_rfc3339();

    for rec in &response.items {
        wtr.serialize(ReportRow {
            generated_at: generated_at.clone(),
            site_id: &response.site_id,
            item_id: &rec.item_id,
            current_par: rec.current_par,
            proposed_par: rec.proposed_par,
            rop: rec.rop,
            safety_stock: rec.safety_stock,
            reorder_qty: rec.reorder_qty,
            min_order_qty: rec.constraints.min_order_qty,
            avg_daily: rec.forecast.avg_daily,
            sigma_lead: rec.forecast.sigma_lead,
            lead_time_days: rec.forecast.lead_time_days,
            service_level: rec.service_level,
            summary: rec
                .rationale
                .as_ref()
                .map(|r| r.summary.as_str())
                .unwrap_or(""),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a report in the chosen format.
pub fn write_report<W: Write>(
    writer: W,
    response: &RecommendResponse,
    format: ReportFormat,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Json => write_json(writer, response)?,
        ReportFormat::Csv => write_csv(writer, response)?,
    }

    info!(
        site_id = %response.site_id,
        rows = response.items.len(),
        ?format,
        "report written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::recommendation::{Constraints, ForecastSummary, Rationale, Recommendation};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn response() -> RecommendResponse {
        RecommendResponse {
            generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap(),
            site_id: "SLC-660".into(),
            items: vec![Recommendation {
                item_id: "MASK-N95".into(),
                current_par: 20,
                forecast: ForecastSummary {
                    avg_daily: 3.5,
                    lead_time_days: 5,
                    sigma_lead: 2.24,
                },
                service_level: 0.95,
                safety_stock: 4,
                rop: 22,
                proposed_par: 47,
                reorder_qty: 42,
                constraints: Constraints {
                    min_order_qty: 10,
                    backorder: false,
                },
                metrics: BTreeMap::new(),
                rationale: Some(Rationale {
                    summary: "Increasing PAR to 47".into(),
                    bullets: vec![],
                    citations: vec![],
                }),
            }],
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_item() {
        let mut out = Vec::new();
        write_csv(&mut out, &response()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("generated_at,site_id,item_id,current_par,proposed_par"));
        assert!(lines[1].contains("SLC-660,MASK-N95,20,47,22,4,42,10,3.5,2.24,5,0.95"));
    }

    #[test]
    fn json_round_trips_the_response() {
        let mut out = Vec::new();
        write_json(&mut out, &response()).unwrap();
        let parsed: RecommendResponse = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, response());

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["generated_at"], "2024-06-01T08:30:00Z");
        assert_eq!(value["items"][0]["constraints"]["backorder"], false);
        assert!(value["items"][0]["metrics"].as_object().unwrap().is_empty());
    }
}
