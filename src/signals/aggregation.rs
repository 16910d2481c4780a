//! Confluence summary: weighs triggered reasons into an overall market bias

use serde::{Deserialize, Serialize};

use crate::indicators::registry::IndicatorCategory;
use crate::models::signal::{Bias, Reason};

pub const DEFAULT_CONFLUENCE_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketBias {
    Bullish,
    Bearish,
    Mixed,
    NoClearSignal,
}

impl MarketBias {
    pub fn label(self) -> &'static str {
        match self {
            MarketBias::Bullish => "Bullish Bias",
            MarketBias::Bearish => "Bearish Bias",
            MarketBias::Mixed => "Mixed/Neutral",
            MarketBias::NoClearSignal => "No Clear Signal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfluenceSummary {
    pub bias: MarketBias,
    /// Share of the total weighted score backing the bias, 0-100
    pub confidence: f64,
    pub bullish_score: u32,
    pub bearish_score: u32,
    pub neutral_score: u32,
    pub bullish: Vec<Reason>,
    pub bearish: Vec<Reason>,
    pub neutral: Vec<Reason>,
}

impl ConfluenceSummary {
    pub fn total_score(&self) -> u32 {
        self.bullish_score + self.bearish_score + self.neutral_score
    }
}

pub struct Aggregator;

impl Aggregator {
    /// Split reasons by bias and derive the overall market bias.
    ///
    /// A side only wins if it outscores the other and reaches `threshold`.
    /// Input order is preserved inside each group.
    pub fn summarize(reasons: &[Reason], threshold: u32) -> ConfluenceSummary {
        let mut summary = ConfluenceSummary {
            bias: MarketBias::NoClearSignal,
            confidence: 0.0,
            bullish_score: 0,
            bearish_score: 0,
            neutral_score: 0,
            bullish: Vec::new(),
            bearish: Vec::new(),
            neutral: Vec::new(),
        };

        for reason in reasons {
            let weight = reason.strength.weight();
            match reason.bias {
                Bias::Bullish => {
                    summary.bullish_score += weight;
                    summary.bullish.push(reason.clone());
                }
                Bias::Bearish => {
                    summary.bearish_score += weight;
                    summary.bearish.push(reason.clone());
                }
                Bias::Neutral => {
                    summary.neutral_score += weight;
                    summary.neutral.push(reason.clone());
                }
            }
        }

        let total = summary.total_score();
        if total == 0 {
            return summary;
        }

        let (bull, bear) = (summary.bullish_score, summary.bearish_score);
        let share = |score: u32| score as f64 / total as f64 * 100.0;
        (summary.bias, summary.confidence) = if bull > bear && bull >= threshold {
            (MarketBias::Bullish, share(bull))
        } else if bear > bull && bear >= threshold {
            (MarketBias::Bearish, share(bear))
        } else {
            (MarketBias::Mixed, share(bull.max(bear)))
        };
        summary
    }

    /// Weighted score per category, in category order, skipping empty ones
    pub fn score_by_category(reasons: &[Reason]) -> Vec<(IndicatorCategory, u32)> {
        IndicatorCategory::all_categories()
            .into_iter()
            .filter_map(|category| {
                let score: u32 = reasons
                    .iter()
                    .filter(|r| r.category == category)
                    .map(|r| r.strength.weight())
                    .sum();
                (score > 0).then_some((category, score))
            })
            .collect()
    }
}
