//! Runtime configuration.
//!
//! Values come from `CONFLUENCE_*` environment variables (a `.env` file is
//! loaded by the binary through `dotenvy`) layered over defaults. The same
//! structs deserialize from JSON.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::indicators::{IndicatorError, IndicatorPeriods};

pub const ENV_PREFIX: &str = "CONFLUENCE_";
pub const DEFAULT_BINANCE_URL: &str = "https://api.binance.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("inconsistent thresholds: {0}")]
    Inconsistent(String),

    #[error(transparent)]
    Periods(#[from] IndicatorError),
}

/// Current deployment environment, `sandbox` unless `ENVIRONMENT` says otherwise
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Rule thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Inclusive RSI band read as balanced momentum
    pub rsi_neutral_low: f64,
    pub rsi_neutral_high: f64,
    pub stoch_rsi_oversold: f64,
    pub stoch_rsi_overbought: f64,
    pub adx_strong: f64,
    pub adx_weak: f64,
    pub volume_spike_multiplier: f64,
    pub volume_low_ratio: f64,
    pub atr_high_percent: f64,
    /// Band position (0 = lower band, 1 = upper band)
    pub bb_lower_position: f64,
    pub bb_upper_position: f64,
    /// Band width as a percentage of the middle band
    pub bb_squeeze_width: f64,
    pub bb_expansion_width: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_neutral_low: 45.0,
            rsi_neutral_high: 55.0,
            stoch_rsi_oversold: 20.0,
            stoch_rsi_overbought: 80.0,
            adx_strong: 25.0,
            adx_weak: 20.0,
            volume_spike_multiplier: 1.5,
            volume_low_ratio: 0.7,
            atr_high_percent: 3.0,
            bb_lower_position: 0.1,
            bb_upper_position: 0.9,
            bb_squeeze_width: 2.0,
            bb_expansion_width: 8.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("rsi_oversold", self.rsi_oversold),
            ("rsi_overbought", self.rsi_overbought),
            ("rsi_neutral_low", self.rsi_neutral_low),
            ("rsi_neutral_high", self.rsi_neutral_high),
            ("stoch_rsi_oversold", self.stoch_rsi_oversold),
            ("stoch_rsi_overbought", self.stoch_rsi_overbought),
            ("adx_strong", self.adx_strong),
            ("adx_weak", self.adx_weak),
            ("volume_spike_multiplier", self.volume_spike_multiplier),
            ("volume_low_ratio", self.volume_low_ratio),
            ("atr_high_percent", self.atr_high_percent),
            ("bb_lower_position", self.bb_lower_position),
            ("bb_upper_position", self.bb_upper_position),
            ("bb_squeeze_width", self.bb_squeeze_width),
            ("bb_expansion_width", self.bb_expansion_width),
        ];
        for (key, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if self.rsi_oversold >= self.rsi_overbought || self.rsi_overbought > 100.0 {
            return Err(ConfigError::Inconsistent(format!(
                "rsi_oversold ({}) must be below rsi_overbought ({}) within 0-100",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        if self.rsi_neutral_low > self.rsi_neutral_high {
            return Err(ConfigError::Inconsistent(format!(
                "rsi_neutral_low ({}) must not exceed rsi_neutral_high ({})",
                self.rsi_neutral_low, self.rsi_neutral_high
            )));
        }
        if self.stoch_rsi_oversold >= self.stoch_rsi_overbought || self.stoch_rsi_overbought > 100.0 {
            return Err(ConfigError::Inconsistent(format!(
                "stoch_rsi_oversold ({}) must be below stoch_rsi_overbought ({}) within 0-100",
                self.stoch_rsi_oversold, self.stoch_rsi_overbought
            )));
        }
        if self.adx_weak > self.adx_strong {
            return Err(ConfigError::Inconsistent(format!(
                "adx_weak ({}) must not exceed adx_strong ({})",
                self.adx_weak, self.adx_strong
            )));
        }
        if self.volume_low_ratio >= self.volume_spike_multiplier {
            return Err(ConfigError::Inconsistent(format!(
                "volume_low_ratio ({}) must be below volume_spike_multiplier ({})",
                self.volume_low_ratio, self.volume_spike_multiplier
            )));
        }
        if self.bb_lower_position >= self.bb_upper_position {
            return Err(ConfigError::Inconsistent(format!(
                "bb_lower_position ({}) must be below bb_upper_position ({})",
                self.bb_lower_position, self.bb_upper_position
            )));
        }
        if self.bb_squeeze_width >= self.bb_expansion_width {
            return Err(ConfigError::Inconsistent(format!(
                "bb_squeeze_width ({}) must be below bb_expansion_width ({})",
                self.bb_squeeze_width, self.bb_expansion_width
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub periods: IndicatorPeriods,
    /// Minimum weighted score before a side is called a bias
    pub confluence_threshold: u32,
    pub binance_base_url: String,
    pub request_timeout_ms: u64,
    pub candle_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            periods: IndicatorPeriods::default(),
            confluence_threshold: 3,
            binance_base_url: DEFAULT_BINANCE_URL.to_string(),
            request_timeout_ms: 10_000,
            candle_limit: 1000,
        }
    }
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary key lookup; keys carry the `CONFLUENCE_` prefix
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let t = &defaults.thresholds;
        let p = &defaults.periods;
        let read = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        let config = Config {
            thresholds: Thresholds {
                rsi_oversold: parse_or(&read, "RSI_OVERSOLD", t.rsi_oversold)?,
                rsi_overbought: parse_or(&read, "RSI_OVERBOUGHT", t.rsi_overbought)?,
                rsi_neutral_low: parse_or(&read, "RSI_NEUTRAL_LOW", t.rsi_neutral_low)?,
                rsi_neutral_high: parse_or(&read, "RSI_NEUTRAL_HIGH", t.rsi_neutral_high)?,
                stoch_rsi_oversold: parse_or(&read, "STOCH_RSI_OVERSOLD", t.stoch_rsi_oversold)?,
                stoch_rsi_overbought: parse_or(&read, "STOCH_RSI_OVERBOUGHT", t.stoch_rsi_overbought)?,
                adx_strong: parse_or(&read, "ADX_STRONG", t.adx_strong)?,
                adx_weak: parse_or(&read, "ADX_WEAK", t.adx_weak)?,
                volume_spike_multiplier: parse_or(
                    &read,
                    "VOLUME_SPIKE_MULTIPLIER",
                    t.volume_spike_multiplier,
                )?,
                volume_low_ratio: parse_or(&read, "VOLUME_LOW_RATIO", t.volume_low_ratio)?,
                atr_high_percent: parse_or(&read, "ATR_HIGH_PERCENT", t.atr_high_percent)?,
                bb_lower_position: parse_or(&read, "BB_LOWER_POSITION", t.bb_lower_position)?,
                bb_upper_position: parse_or(&read, "BB_UPPER_POSITION", t.bb_upper_position)?,
                bb_squeeze_width: parse_or(&read, "BB_SQUEEZE_WIDTH", t.bb_squeeze_width)?,
                bb_expansion_width: parse_or(&read, "BB_EXPANSION_WIDTH", t.bb_expansion_width)?,
            },
            periods: IndicatorPeriods {
                rsi: parse_or(&read, "RSI_PERIOD", p.rsi)?,
                stoch_rsi: parse_or(&read, "STOCH_RSI_PERIOD", p.stoch_rsi)?,
                macd_fast: parse_or(&read, "MACD_FAST", p.macd_fast)?,
                macd_slow: parse_or(&read, "MACD_SLOW", p.macd_slow)?,
                macd_signal: parse_or(&read, "MACD_SIGNAL", p.macd_signal)?,
                ema_short: parse_or(&read, "EMA_SHORT", p.ema_short)?,
                ema_long: parse_or(&read, "EMA_LONG", p.ema_long)?,
                ema_mid: parse_or(&read, "EMA_MID", p.ema_mid)?,
                ema_trend: parse_or(&read, "EMA_TREND", p.ema_trend)?,
                adx: parse_or(&read, "ADX_PERIOD", p.adx)?,
                atr: parse_or(&read, "ATR_PERIOD", p.atr)?,
                bollinger: parse_or(&read, "BOLLINGER_PERIOD", p.bollinger)?,
                volume_average: parse_or(&read, "VOLUME_AVERAGE_PERIOD", p.volume_average)?,
            },
            confluence_threshold: parse_or(&read, "SCORE_THRESHOLD", defaults.confluence_threshold)?,
            binance_base_url: read("BINANCE_URL").unwrap_or(defaults.binance_base_url.clone()),
            request_timeout_ms: parse_or(&read, "REQUEST_TIMEOUT_MS", defaults.request_timeout_ms)?,
            candle_limit: parse_or(&read, "CANDLE_LIMIT", defaults.candle_limit)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.periods.validate()?;
        if url::Url::parse(&self.binance_base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "binance_base_url".to_string(),
                value: self.binance_base_url.clone(),
            });
        }
        if self.candle_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "candle_limit".to_string(),
                value: self.candle_limit.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_or<T, F>(read: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match read(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: format!("{}{}", ENV_PREFIX, name),
            value: raw,
        }),
        None => Ok(default),
    }
}
