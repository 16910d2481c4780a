//! Builds [`IndicatorSnapshot`]s from a candle history.

use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{calculate_macd_series, calculate_rsi_series, calculate_stoch_rsi_series};
use crate::indicators::trend::{calculate_adx_series, calculate_ema_series};
use crate::indicators::volatility::{calculate_atr_series, calculate_bollinger_series, BOLLINGER_STD_DEV};
use crate::indicators::volume::calculate_average_volume_series;
use crate::models::indicators::{Candle, IndicatorSnapshot};

/// Lookback periods for every indicator the snapshot carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorPeriods {
    pub rsi: usize,
    pub stoch_rsi: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub ema_short: usize,
    pub ema_long: usize,
    pub ema_mid: usize,
    pub ema_trend: usize,
    pub adx: usize,
    pub atr: usize,
    pub bollinger: usize,
    pub volume_average: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            rsi: 14,
            stoch_rsi: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            ema_short: 9,
            ema_long: 21,
            ema_mid: 50,
            ema_trend: 200,
            adx: 14,
            atr: 14,
            bollinger: 20,
            volume_average: 20,
        }
    }
}

impl IndicatorPeriods {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        let periods = [
            ("rsi", self.rsi),
            ("stoch_rsi", self.stoch_rsi),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("ema_short", self.ema_short),
            ("ema_long", self.ema_long),
            ("ema_mid", self.ema_mid),
            ("ema_trend", self.ema_trend),
            ("adx", self.adx),
            ("atr", self.atr),
            ("bollinger", self.bollinger),
            ("volume_average", self.volume_average),
        ];
        for (indicator, period) in periods {
            if period == 0 {
                return Err(IndicatorError::InvalidPeriod { indicator, period });
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidPeriod {
                indicator: "macd_fast",
                period: self.macd_fast,
            });
        }
        Ok(())
    }

    /// Candles needed before every snapshot field can be populated
    pub fn full_warmup(&self) -> usize {
        [
            self.rsi + self.stoch_rsi,
            self.macd_slow + self.macd_signal - 1,
            self.ema_short,
            self.ema_long,
            self.ema_mid,
            self.ema_trend,
            2 * self.adx,
            self.atr + 1,
            self.bollinger,
            self.volume_average,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    periods: IndicatorPeriods,
}

impl SnapshotBuilder {
    pub fn new(periods: IndicatorPeriods) -> Result<Self, IndicatorError> {
        periods.validate()?;
        Ok(Self { periods })
    }

    pub fn periods(&self) -> &IndicatorPeriods {
        &self.periods
    }

    /// One snapshot per candle, fields absent until their indicator warms up
    pub fn build_series(&self, candles: &[Candle]) -> Vec<IndicatorSnapshot> {
        let p = &self.periods;
        let rsi = calculate_rsi_series(candles, p.rsi);
        let stoch_rsi = calculate_stoch_rsi_series(&rsi, p.stoch_rsi);
        let macd = calculate_macd_series(candles, p.macd_fast, p.macd_slow, p.macd_signal);
        let ema_short = calculate_ema_series(candles, p.ema_short);
        let ema_long = calculate_ema_series(candles, p.ema_long);
        let ema_mid = calculate_ema_series(candles, p.ema_mid);
        let ema_trend = calculate_ema_series(candles, p.ema_trend);
        let adx = calculate_adx_series(candles, p.adx);
        let atr = calculate_atr_series(candles, p.atr);
        let bands = calculate_bollinger_series(candles, p.bollinger, BOLLINGER_STD_DEV);
        let avg_volume = calculate_average_volume_series(candles, p.volume_average);

        candles
            .iter()
            .enumerate()
            .map(|(i, candle)| IndicatorSnapshot {
                timestamp: Some(candle.timestamp),
                close: Some(candle.close),
                rsi: rsi[i],
                stoch_rsi: stoch_rsi[i],
                macd_line: macd.line[i],
                macd_signal: macd.signal[i],
                ema_short: ema_short[i],
                ema_long: ema_long[i],
                ema_50: ema_mid[i],
                ema_200: ema_trend[i],
                adx: adx.adx[i],
                plus_di: adx.plus_di[i],
                minus_di: adx.minus_di[i],
                atr: atr[i],
                bb_upper: bands.upper[i],
                bb_middle: bands.middle[i],
                bb_lower: bands.lower[i],
                volume: Some(candle.volume),
                avg_volume: avg_volume[i],
            })
            .collect()
    }

    /// Snapshot of the last candle and, when available, the one before it
    pub fn latest_pair(
        &self,
        candles: &[Candle],
    ) -> Result<(IndicatorSnapshot, Option<IndicatorSnapshot>), IndicatorError> {
        let mut series = self.build_series(candles);
        let current = series.pop().ok_or(IndicatorError::NotEnoughCandles {
            required: 1,
            actual: 0,
        })?;
        Ok((current, series.pop()))
    }
}
