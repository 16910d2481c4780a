//! Indicator categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorCategory {
    Momentum,
    Trend,
    Volatility,
    Volume,
}

impl IndicatorCategory {
    /// Get all categories
    pub fn all_categories() -> Vec<IndicatorCategory> {
        vec![
            IndicatorCategory::Momentum,
            IndicatorCategory::Trend,
            IndicatorCategory::Volatility,
            IndicatorCategory::Volume,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            IndicatorCategory::Momentum => "Momentum",
            IndicatorCategory::Trend => "Trend",
            IndicatorCategory::Volatility => "Volatility",
            IndicatorCategory::Volume => "Volume",
        }
    }
}

impl fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
