//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// ATR for every candle using Wilder's smoothing of the true range.
///
/// The first candle has no previous close, so the first value lands at index
/// `period`.
pub fn calculate_atr_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if period == 0 || candles.len() < period + 1 {
        return out;
    }

    let tr_values: Vec<f64> = candles
        .windows(2)
        .map(|pair| math::true_range(pair[1].high, pair[1].low, pair[0].close))
        .collect();

    for (i, value) in math::wilder_series(&tr_values, period).into_iter().enumerate() {
        out[i + 1] = value;
    }
    out
}

/// Latest ATR value
pub fn calculate_atr(candles: &[Candle], period: usize) -> Option<f64> {
    calculate_atr_series(candles, period).last().copied().flatten()
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Option<f64> {
    calculate_atr(candles, 14)
}
