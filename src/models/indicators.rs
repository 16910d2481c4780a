use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}

/// Indicator values for a single candle.
///
/// `timestamp` and `close` are required for evaluation but kept optional so a
/// malformed record from a provider can still be represented and rejected.
/// Every other field is absent while its indicator is warming up. Non-finite
/// values are treated as absent by [`IndicatorSnapshot::get`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stoch_rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_line: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_short: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_long: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_50: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_200: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plus_di: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minus_di: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_middle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            close: Some(close),
            ..Self::default()
        }
    }

    pub fn with_rsi(mut self, rsi: f64) -> Self {
        self.rsi = Some(rsi);
        self
    }

    pub fn with_stoch_rsi(mut self, stoch_rsi: f64) -> Self {
        self.stoch_rsi = Some(stoch_rsi);
        self
    }

    pub fn with_macd(mut self, line: f64, signal: f64) -> Self {
        self.macd_line = Some(line);
        self.macd_signal = Some(signal);
        self
    }

    pub fn with_emas(mut self, short: f64, long: f64) -> Self {
        self.ema_short = Some(short);
        self.ema_long = Some(long);
        self
    }

    pub fn with_ema_200(mut self, ema_200: f64) -> Self {
        self.ema_200 = Some(ema_200);
        self
    }

    pub fn with_ema_50(mut self, ema_50: f64) -> Self {
        self.ema_50 = Some(ema_50);
        self
    }

    pub fn with_adx(mut self, adx: f64) -> Self {
        self.adx = Some(adx);
        self
    }

    pub fn with_directional(mut self, plus_di: f64, minus_di: f64) -> Self {
        self.plus_di = Some(plus_di);
        self.minus_di = Some(minus_di);
        self
    }

    pub fn with_bollinger(mut self, upper: f64, middle: f64, lower: f64) -> Self {
        self.bb_upper = Some(upper);
        self.bb_middle = Some(middle);
        self.bb_lower = Some(lower);
        self
    }

    pub fn with_atr(mut self, atr: f64) -> Self {
        self.atr = Some(atr);
        self
    }

    pub fn with_volume(mut self, volume: f64, avg_volume: f64) -> Self {
        self.volume = Some(volume);
        self.avg_volume = Some(avg_volume);
        self
    }

    /// Read a field, treating non-finite numbers as absent
    pub fn get(&self, field: SnapshotField) -> Option<f64> {
        let raw = match field {
            SnapshotField::Close => self.close,
            SnapshotField::Rsi => self.rsi,
            SnapshotField::StochRsi => self.stoch_rsi,
            SnapshotField::MacdLine => self.macd_line,
            SnapshotField::MacdSignal => self.macd_signal,
            SnapshotField::EmaShort => self.ema_short,
            SnapshotField::EmaLong => self.ema_long,
            SnapshotField::Ema50 => self.ema_50,
            SnapshotField::Ema200 => self.ema_200,
            SnapshotField::Adx => self.adx,
            SnapshotField::PlusDi => self.plus_di,
            SnapshotField::MinusDi => self.minus_di,
            SnapshotField::Atr => self.atr,
            SnapshotField::BbUpper => self.bb_upper,
            SnapshotField::BbMiddle => self.bb_middle,
            SnapshotField::BbLower => self.bb_lower,
            SnapshotField::Volume => self.volume,
            SnapshotField::AvgVolume => self.avg_volume,
            SnapshotField::VolumeRatio => {
                let avg = self.get(SnapshotField::AvgVolume).filter(|a| *a > 0.0)?;
                Some(self.get(SnapshotField::Volume)? / avg)
            }
            SnapshotField::AtrPercent => {
                let close = self.get(SnapshotField::Close).filter(|c| *c > 0.0)?;
                Some(self.get(SnapshotField::Atr)? / close * 100.0)
            }
            SnapshotField::BbPosition => {
                let lower = self.get(SnapshotField::BbLower)?;
                let range = self.get(SnapshotField::BbUpper)? - lower;
                if range <= 0.0 {
                    return None;
                }
                Some((self.get(SnapshotField::Close)? - lower) / range)
            }
            SnapshotField::BbWidth => {
                let middle = self.get(SnapshotField::BbMiddle).filter(|m| *m > 0.0)?;
                let range = self.get(SnapshotField::BbUpper)? - self.get(SnapshotField::BbLower)?;
                Some(range / middle * 100.0)
            }
        };
        raw.filter(|v| v.is_finite())
    }
}

/// Numeric fields a rule or message template can read.
///
/// `VolumeRatio`, `AtrPercent`, `BbPosition` and `BbWidth` are derived from
/// stored fields and are absent whenever an input is. `BbPosition` is 0 at the
/// lower band and 1 at the upper one; `BbWidth` is the band spread as a
/// percentage of the middle band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotField {
    Close,
    Rsi,
    StochRsi,
    MacdLine,
    MacdSignal,
    EmaShort,
    EmaLong,
    Ema50,
    Ema200,
    Adx,
    PlusDi,
    MinusDi,
    Atr,
    BbUpper,
    BbMiddle,
    BbLower,
    Volume,
    AvgVolume,
    VolumeRatio,
    AtrPercent,
    BbPosition,
    BbWidth,
}

impl SnapshotField {
    pub const ALL: [SnapshotField; 22] = [
        SnapshotField::Close,
        SnapshotField::Rsi,
        SnapshotField::StochRsi,
        SnapshotField::MacdLine,
        SnapshotField::MacdSignal,
        SnapshotField::EmaShort,
        SnapshotField::EmaLong,
        SnapshotField::Ema50,
        SnapshotField::Ema200,
        SnapshotField::Adx,
        SnapshotField::PlusDi,
        SnapshotField::MinusDi,
        SnapshotField::Atr,
        SnapshotField::BbUpper,
        SnapshotField::BbMiddle,
        SnapshotField::BbLower,
        SnapshotField::Volume,
        SnapshotField::AvgVolume,
        SnapshotField::VolumeRatio,
        SnapshotField::AtrPercent,
        SnapshotField::BbPosition,
        SnapshotField::BbWidth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SnapshotField::Close => "close",
            SnapshotField::Rsi => "rsi",
            SnapshotField::StochRsi => "stoch_rsi",
            SnapshotField::MacdLine => "macd_line",
            SnapshotField::MacdSignal => "macd_signal",
            SnapshotField::EmaShort => "ema_short",
            SnapshotField::EmaLong => "ema_long",
            SnapshotField::Ema50 => "ema_50",
            SnapshotField::Ema200 => "ema_200",
            SnapshotField::Adx => "adx",
            SnapshotField::PlusDi => "plus_di",
            SnapshotField::MinusDi => "minus_di",
            SnapshotField::Atr => "atr",
            SnapshotField::BbUpper => "bb_upper",
            SnapshotField::BbMiddle => "bb_middle",
            SnapshotField::BbLower => "bb_lower",
            SnapshotField::Volume => "volume",
            SnapshotField::AvgVolume => "avg_volume",
            SnapshotField::VolumeRatio => "volume_ratio",
            SnapshotField::AtrPercent => "atr_percent",
            SnapshotField::BbPosition => "bb_position",
            SnapshotField::BbWidth => "bb_width",
        }
    }
}

impl fmt::Display for SnapshotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SnapshotField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SnapshotField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown snapshot field '{}'", s))
    }
}
