use serde::{Deserialize, Serialize};

use crate::indicators::registry::IndicatorCategory;

/// Direction a triggered rule leans toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Low,
    Medium,
    Strong,
}

impl Strength {
    /// Score contribution used by the confluence summary
    pub fn weight(self) -> u32 {
        match self {
            Strength::Strong => 3,
            Strength::Medium => 2,
            Strength::Low => 1,
        }
    }
}

/// One triggered rule with its rendered explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub rule_id: String,
    pub category: IndicatorCategory,
    pub bias: Bias,
    pub strength: Strength,
    pub priority: i32,
    pub message: String,
}
