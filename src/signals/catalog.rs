//! The rule catalog.
//!
//! Rules are data: an id, a category, a bias and strength for the confluence
//! summary, a display priority, a message template and a predicate. The
//! standard catalog bakes the configured thresholds into both the predicates
//! and the message text.

use std::collections::HashSet;

use crate::config::Thresholds;
use crate::indicators::registry::IndicatorCategory;
use crate::models::indicators::SnapshotField;
use crate::models::signal::{Bias, Strength};
use crate::signals::error::CatalogError;
use crate::signals::rules::{
    above, above_multiple, all_of, below, below_multiple, crossed_above, crossed_below, descending,
    greater_than, within, Rule,
};

/// Ids of the rules in the standard catalog
pub mod rule_ids {
    pub const RSI_OVERSOLD: &str = "rsi_oversold";
    pub const RSI_OVERBOUGHT: &str = "rsi_overbought";
    pub const RSI_NEUTRAL: &str = "rsi_neutral";
    pub const STOCH_RSI_OVERSOLD: &str = "stoch_rsi_oversold";
    pub const STOCH_RSI_OVERBOUGHT: &str = "stoch_rsi_overbought";
    pub const MACD_BULLISH_CROSSOVER: &str = "macd_bullish_crossover";
    pub const MACD_BEARISH_CROSSOVER: &str = "macd_bearish_crossover";
    pub const MACD_POSITIVE: &str = "macd_positive_territory";
    pub const MACD_NEGATIVE: &str = "macd_negative_territory";
    pub const PRICE_ABOVE_EMA_200: &str = "price_above_ema_200";
    pub const PRICE_BELOW_EMA_200: &str = "price_below_ema_200";
    pub const EMA_SHORT_ABOVE_LONG: &str = "ema_short_above_long";
    pub const EMA_SHORT_BELOW_LONG: &str = "ema_short_below_long";
    pub const EMA_BULLISH_ALIGNMENT: &str = "ema_bullish_alignment";
    pub const EMA_BEARISH_ALIGNMENT: &str = "ema_bearish_alignment";
    pub const ADX_STRONG_TREND: &str = "adx_strong_trend";
    pub const ADX_WEAK_TREND: &str = "adx_weak_trend";
    pub const ADX_BULLISH_DIRECTION: &str = "adx_bullish_direction";
    pub const ADX_BEARISH_DIRECTION: &str = "adx_bearish_direction";
    pub const ATR_HIGH_VOLATILITY: &str = "atr_high_volatility";
    pub const BB_NEAR_LOWER: &str = "bb_near_lower_band";
    pub const BB_NEAR_UPPER: &str = "bb_near_upper_band";
    pub const BB_SQUEEZE: &str = "bb_squeeze";
    pub const BB_EXPANSION: &str = "bb_expansion";
    pub const VOLUME_SPIKE: &str = "volume_spike";
    pub const VOLUME_LOW: &str = "volume_low";
}

#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Build a catalog from arbitrary rules, rejecting duplicate ids
    pub fn new(rules: Vec<Rule>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(CatalogError::DuplicateRuleId(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// The standard momentum / trend / volatility / volume rule set.
    ///
    /// `adx_strong_trend` stays direction-free; the DI comparison is carried by
    /// its own pair of rules so the summary can lean with the trend.
    pub fn standard(t: &Thresholds) -> Result<Self, CatalogError> {
        use rule_ids::*;
        use IndicatorCategory::{Momentum, Trend, Volatility, Volume};
        use SnapshotField as F;

        let rules = vec![
            Rule::new(
                RSI_OVERSOLD,
                Momentum,
                Bias::Bullish,
                Strength::Medium,
                10,
                &format!("RSI < {} → Oversold, potential bounce", t.rsi_oversold),
                below(F::Rsi, t.rsi_oversold),
            )?,
            Rule::new(
                RSI_OVERBOUGHT,
                Momentum,
                Bias::Bearish,
                Strength::Medium,
                11,
                &format!("RSI > {} → Overbought, potential pullback", t.rsi_overbought),
                above(F::Rsi, t.rsi_overbought),
            )?,
            Rule::new(
                RSI_NEUTRAL,
                Momentum,
                Bias::Neutral,
                Strength::Low,
                12,
                &format!(
                    "RSI between {} and {} → Balanced momentum, watch for a directional break (RSI {{rsi:.1}})",
                    t.rsi_neutral_low, t.rsi_neutral_high
                ),
                within(F::Rsi, t.rsi_neutral_low, t.rsi_neutral_high),
            )?,
            Rule::new(
                STOCH_RSI_OVERSOLD,
                Momentum,
                Bias::Bullish,
                Strength::Medium,
                20,
                &format!(
                    "Stoch RSI < {} → Oversold momentum, watch for an upturn",
                    t.stoch_rsi_oversold
                ),
                below(F::StochRsi, t.stoch_rsi_oversold),
            )?,
            Rule::new(
                STOCH_RSI_OVERBOUGHT,
                Momentum,
                Bias::Bearish,
                Strength::Medium,
                21,
                &format!(
                    "Stoch RSI > {} → Overbought momentum, watch for a downturn",
                    t.stoch_rsi_overbought
                ),
                above(F::StochRsi, t.stoch_rsi_overbought),
            )?,
            Rule::new(
                MACD_BULLISH_CROSSOVER,
                Momentum,
                Bias::Bullish,
                Strength::Strong,
                30,
                "MACD crossed above signal → Bullish momentum shift",
                crossed_above(F::MacdLine, F::MacdSignal),
            )?,
            Rule::new(
                MACD_BEARISH_CROSSOVER,
                Momentum,
                Bias::Bearish,
                Strength::Strong,
                31,
                "MACD crossed below signal → Bearish momentum shift",
                crossed_below(F::MacdLine, F::MacdSignal),
            )?,
            Rule::new(
                MACD_POSITIVE,
                Momentum,
                Bias::Bullish,
                Strength::Low,
                40,
                "MACD above zero → Momentum in positive territory",
                above(F::MacdLine, 0.0),
            )?,
            Rule::new(
                MACD_NEGATIVE,
                Momentum,
                Bias::Bearish,
                Strength::Low,
                41,
                "MACD below zero → Momentum in negative territory",
                below(F::MacdLine, 0.0),
            )?,
            Rule::new(
                PRICE_ABOVE_EMA_200,
                Trend,
                Bias::Bullish,
                Strength::Strong,
                50,
                "Price above EMA 200 → Long-term uptrend bias",
                greater_than(F::Close, F::Ema200),
            )?,
            Rule::new(
                PRICE_BELOW_EMA_200,
                Trend,
                Bias::Bearish,
                Strength::Strong,
                51,
                "Price below EMA 200 → Long-term downtrend bias",
                greater_than(F::Ema200, F::Close),
            )?,
            Rule::new(
                EMA_SHORT_ABOVE_LONG,
                Trend,
                Bias::Bullish,
                Strength::Medium,
                55,
                "Short EMA above long EMA → Short-term bullish structure",
                greater_than(F::EmaShort, F::EmaLong),
            )?,
            Rule::new(
                EMA_SHORT_BELOW_LONG,
                Trend,
                Bias::Bearish,
                Strength::Medium,
                56,
                "Short EMA below long EMA → Short-term bearish structure",
                greater_than(F::EmaLong, F::EmaShort),
            )?,
            Rule::new(
                EMA_BULLISH_ALIGNMENT,
                Trend,
                Bias::Bullish,
                Strength::Strong,
                57,
                "Short > long > EMA 50 → Stacked bullish trend structure, pullbacks find support",
                descending(vec![F::EmaShort, F::EmaLong, F::Ema50]),
            )?,
            Rule::new(
                EMA_BEARISH_ALIGNMENT,
                Trend,
                Bias::Bearish,
                Strength::Strong,
                58,
                "Short < long < EMA 50 → Stacked bearish trend structure, rallies meet resistance",
                descending(vec![F::Ema50, F::EmaLong, F::EmaShort]),
            )?,
            Rule::new(
                ADX_STRONG_TREND,
                Trend,
                Bias::Neutral,
                Strength::Medium,
                60,
                &format!("ADX > {} → Strong trend in place (ADX {{adx:.1}})", t.adx_strong),
                above(F::Adx, t.adx_strong),
            )?,
            Rule::new(
                ADX_WEAK_TREND,
                Trend,
                Bias::Neutral,
                Strength::Low,
                61,
                &format!("ADX < {} → Weak trend, ranging market (ADX {{adx:.1}})", t.adx_weak),
                below(F::Adx, t.adx_weak),
            )?,
            Rule::new(
                ADX_BULLISH_DIRECTION,
                Trend,
                Bias::Bullish,
                Strength::Medium,
                62,
                &format!(
                    "+DI above -DI with ADX > {} → Trend direction is up (+DI {{plus_di:.1}} / -DI {{minus_di:.1}})",
                    t.adx_strong
                ),
                all_of(above(F::Adx, t.adx_strong), greater_than(F::PlusDi, F::MinusDi)),
            )?,
            Rule::new(
                ADX_BEARISH_DIRECTION,
                Trend,
                Bias::Bearish,
                Strength::Medium,
                63,
                &format!(
                    "-DI above +DI with ADX > {} → Trend direction is down (+DI {{plus_di:.1}} / -DI {{minus_di:.1}})",
                    t.adx_strong
                ),
                all_of(above(F::Adx, t.adx_strong), greater_than(F::MinusDi, F::PlusDi)),
            )?,
            Rule::new(
                ATR_HIGH_VOLATILITY,
                Volatility,
                Bias::Neutral,
                Strength::Medium,
                70,
                &format!(
                    "ATR above {}% of price → Elevated volatility, widen stops ({{atr_percent:.2}}%)",
                    t.atr_high_percent
                ),
                above(F::AtrPercent, t.atr_high_percent),
            )?,
            Rule::new(
                BB_NEAR_LOWER,
                Volatility,
                Bias::Bullish,
                Strength::Medium,
                72,
                "Price near lower Bollinger Band → Mean reversion bounce setup (position {bb_position:.2})",
                below(F::BbPosition, t.bb_lower_position),
            )?,
            Rule::new(
                BB_NEAR_UPPER,
                Volatility,
                Bias::Bearish,
                Strength::Medium,
                73,
                "Price near upper Bollinger Band → Mean reversion pullback setup (position {bb_position:.2})",
                above(F::BbPosition, t.bb_upper_position),
            )?,
            Rule::new(
                BB_SQUEEZE,
                Volatility,
                Bias::Neutral,
                Strength::Strong,
                74,
                &format!(
                    "Bollinger width < {}% → Volatility squeeze, expect a breakout ({{bb_width:.2}}%)",
                    t.bb_squeeze_width
                ),
                below(F::BbWidth, t.bb_squeeze_width),
            )?,
            Rule::new(
                BB_EXPANSION,
                Volatility,
                Bias::Neutral,
                Strength::Medium,
                75,
                &format!(
                    "Bollinger width > {}% → Volatility expansion, expect reversion to the mean ({{bb_width:.2}}%)",
                    t.bb_expansion_width
                ),
                above(F::BbWidth, t.bb_expansion_width),
            )?,
            Rule::new(
                VOLUME_SPIKE,
                Volume,
                Bias::Neutral,
                Strength::Strong,
                80,
                &format!(
                    "Volume > {}x average → Volume spike, strong participation ({{volume_ratio:.1}}x)",
                    t.volume_spike_multiplier
                ),
                above_multiple(F::Volume, F::AvgVolume, t.volume_spike_multiplier),
            )?,
            Rule::new(
                VOLUME_LOW,
                Volume,
                Bias::Neutral,
                Strength::Low,
                81,
                &format!(
                    "Volume < {}x average → Low participation, moves may lack conviction ({{volume_ratio:.1}}x)",
                    t.volume_low_ratio
                ),
                below_multiple(F::Volume, F::AvgVolume, t.volume_low_ratio),
            )?,
        ];

        Self::new(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleCatalog {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
