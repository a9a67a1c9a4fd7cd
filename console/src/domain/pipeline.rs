//! Sales funnel model: canonical stages, stage totals normalisation, and
//! the pipeline summary block.
//!
//! The server aggregates the numbers; the console only reshapes them. Stage
//! totals arrive keyed by stage, possibly with stages missing entirely —
//! normalisation always yields the five canonical stages in funnel order,
//! zero-filled where the server had nothing to say.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Canonical funnel stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKey {
    /// First contact and qualification.
    Prospecting,
    /// Needs defined / RFP / demo signed off.
    NeedsDefined,
    /// Proposal submitted.
    ProposalSubmitted,
    /// Negotiation.
    NegotiationDone,
    /// Close won.
    CloseWon,
}

/// Every canonical stage in funnel order.
pub const STAGE_ORDER: [StageKey; 5] = [
    StageKey::Prospecting,
    StageKey::NeedsDefined,
    StageKey::ProposalSubmitted,
    StageKey::NegotiationDone,
    StageKey::CloseWon,
];

impl StageKey {
    /// Wire key used by the aggregation endpoint.
    pub fn key(self) -> &'static str {
        match self {
            Self::Prospecting => "PROSPECTING",
            Self::NeedsDefined => "NEEDS_DEFINED",
            Self::ProposalSubmitted => "PROPOSAL_SUBMITTED",
            Self::NegotiationDone => "NEGOTIATION_DONE",
            Self::CloseWon => "CLOSE_WON",
        }
    }

    /// Operator-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Prospecting => "Prospecting",
            Self::NeedsDefined => "Needs Defined / RFP / Demo Signed Off",
            Self::ProposalSubmitted => "Proposal Submitted",
            Self::NegotiationDone => "Negotiation",
            Self::CloseWon => "Close Won",
        }
    }

    /// 1-based funnel position.
    pub fn order(self) -> u8 {
        match self {
            Self::Prospecting => 1,
            Self::NeedsDefined => 2,
            Self::ProposalSubmitted => 3,
            Self::NegotiationDone => 4,
            Self::CloseWon => 5,
        }
    }
}

/// Per-stage aggregate exactly as the server sends it.
///
/// Every numeric field is optional on the wire; absent values normalise to
/// zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStageTotals {
    /// Server-side stage row id; absent for stages with no deals yet.
    #[serde(default)]
    pub stage_id: Option<i64>,
    /// Server-side stage name override.
    #[serde(default)]
    pub stage_name: Option<String>,
    /// Number of deals sitting in the stage.
    #[serde(default)]
    pub count: Option<u64>,
    /// Total deal value in the stage.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Win probability attached to the stage, in percent.
    #[serde(default)]
    pub probability: Option<f64>,
    /// Probability-weighted deal value.
    #[serde(default)]
    pub weighted_amount: Option<f64>,
}

/// A normalised funnel row, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct StageTotals {
    /// Server-side stage row id, when the stage has data.
    pub stage_id: Option<i64>,
    /// Canonical stage.
    pub key: StageKey,
    /// Label to render; the server override wins when present.
    pub stage_name: String,
    /// Number of deals sitting in the stage.
    pub count: u64,
    /// Total deal value in the stage.
    pub amount: f64,
    /// Win probability, in percent.
    pub probability: f64,
    /// Probability-weighted deal value.
    pub weighted_amount: f64,
    /// 1-based funnel position.
    pub order: u8,
    /// True when the server had no row for the stage.
    pub is_empty: bool,
}

/// Reshape server stage totals into the five canonical stages, in order,
/// zero-filling stages the server omitted.
pub fn normalize_stages(totals: &HashMap<String, RawStageTotals>) -> Vec<StageTotals> {
    STAGE_ORDER
        .iter()
        .map(|stage| {
            let raw = totals.get(stage.key());
            StageTotals {
                stage_id: raw.and_then(|data| data.stage_id),
                key: *stage,
                stage_name: raw
                    .and_then(|data| data.stage_name.clone())
                    .unwrap_or_else(|| stage.label().to_owned()),
                count: raw.and_then(|data| data.count).unwrap_or(0),
                amount: raw.and_then(|data| data.amount).unwrap_or(0.0),
                probability: raw.and_then(|data| data.probability).unwrap_or(0.0),
                weighted_amount: raw.and_then(|data| data.weighted_amount).unwrap_or(0.0),
                order: stage.order(),
                is_empty: raw.is_none(),
            }
        })
        .collect()
}

/// Year-level pipeline summary computed server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    /// Year the summary covers.
    pub year: String,
    /// Deals across every stage.
    pub total_deals: u64,
    /// Total open pipeline value.
    pub total_pipeline: f64,
    /// Value already closed won.
    pub closed_won_amount: f64,
    /// Mean deal size.
    pub avg_deal_size: f64,
    /// Probability-weighted forecast.
    pub weighted_forecast: f64,
    /// Quarterly target; nullable by design.
    pub quarterly_target: Option<f64>,
    /// Achievement against the target, in percent; nullable by design.
    pub achievement_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn raw(stage_id: i64, count: u64, amount: f64) -> RawStageTotals {
        RawStageTotals {
            stage_id: Some(stage_id),
            stage_name: None,
            count: Some(count),
            amount: Some(amount),
            probability: Some(25.0),
            weighted_amount: Some(amount * 0.25),
        }
    }

    #[rstest]
    fn missing_stages_are_zero_filled_in_funnel_order() {
        let mut totals = HashMap::new();
        totals.insert("PROSPECTING".to_owned(), raw(11, 4, 1_000_000.0));
        totals.insert("CLOSE_WON".to_owned(), raw(15, 1, 250_000.0));

        let stages = normalize_stages(&totals);
        assert_eq!(stages.len(), 5);

        let orders: Vec<u8> = stages.iter().map(|stage| stage.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);

        assert!(!stages[0].is_empty);
        assert_eq!(stages[0].count, 4);

        // Stages the server omitted come back empty but present.
        assert!(stages[1].is_empty);
        assert_eq!(stages[1].count, 0);
        assert_eq!(stages[1].stage_id, None);
        assert_eq!(
            stages[1].stage_name,
            "Needs Defined / RFP / Demo Signed Off",
        );

        assert!(!stages[4].is_empty);
        assert_eq!(stages[4].key, StageKey::CloseWon);
    }

    #[rstest]
    fn server_stage_names_override_the_canonical_labels() {
        let mut totals = HashMap::new();
        totals.insert(
            "NEGOTIATION_DONE".to_owned(),
            RawStageTotals {
                stage_name: Some("Negotiation / Legal".to_owned()),
                ..Default::default()
            },
        );

        let stages = normalize_stages(&totals);
        assert_eq!(stages[3].stage_name, "Negotiation / Legal");
        assert!(!stages[3].is_empty);
    }

    #[rstest]
    fn summary_wire_shape_decodes_with_nullable_targets() {
        let body = r#"{
            "year": "2025",
            "totalDeals": 12,
            "totalPipeline": 5400000,
            "closedWonAmount": 1200000,
            "avgDealSize": 450000,
            "weightedForecast": 2100000,
            "quarterlyTarget": null,
            "achievementPercent": null
        }"#;
        let summary: PipelineSummary = serde_json::from_str(body).expect("summary decodes");
        assert_eq!(summary.total_deals, 12);
        assert_eq!(summary.quarterly_target, None);
    }
}
