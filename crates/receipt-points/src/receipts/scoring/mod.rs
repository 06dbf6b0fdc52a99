pub(crate) mod rules;

use serde::{Deserialize, Serialize};

use super::domain::Receipt;

/// Stateless scorer applying every points rule to a receipt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Full breakdown, one entry per rule application that earned points.
    pub fn score(&self, receipt: &Receipt) -> PointsBreakdown {
        let (contributions, total_points) = rules::score_receipt(receipt);
        PointsBreakdown {
            total_points,
            contributions,
        }
    }

    pub fn points(&self, receipt: &Receipt) -> u64 {
        self.score(receipt).total_points
    }
}

/// Independent rules feeding the points total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl ScoringRule {
    pub fn label(self) -> &'static str {
        match self {
            ScoringRule::RetailerName => "Retailer name",
            ScoringRule::RoundDollarTotal => "Round dollar total",
            ScoringRule::QuarterMultipleTotal => "Quarter multiple total",
            ScoringRule::ItemPairs => "Item pairs",
            ScoringRule::DescriptionLength => "Description length",
            ScoringRule::OddPurchaseDay => "Odd purchase day",
            ScoringRule::AfternoonPurchase => "Afternoon purchase",
        }
    }
}

/// Discrete contribution to a score, kept for audits and the CLI breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: ScoringRule,
    pub points: u64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub total_points: u64,
    pub contributions: Vec<RuleContribution>,
}

impl PointsBreakdown {
    /// Sum of the contributions attributed to `rule`.
    pub fn points_for(&self, rule: ScoringRule) -> u64 {
        self.contributions
            .iter()
            .filter(|contribution| contribution.rule == rule)
            .fold(0u64, |acc, contribution| acc.saturating_add(contribution.points))
    }
}
