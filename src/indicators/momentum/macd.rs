//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Aligned MACD line and signal line
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

impl MacdSeries {
    /// MACD - Signal at `index`, when both are defined
    pub fn histogram(&self, index: usize) -> Option<f64> {
        Some(self.line.get(index).copied().flatten()? - self.signal.get(index).copied().flatten()?)
    }
}

/// Calculate MACD for every candle
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
pub fn calculate_macd_series(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let fast = math::ema_series(&closes, fast_period);
    let slow = math::ema_series(&closes, slow_period);

    let line: Vec<Option<f64>> = fast
        .iter()
        .zip(&slow)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal = math::ema_of_optional(&line, signal_period);

    MacdSeries { line, signal }
}

/// Latest (line, signal) pair
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<(f64, f64)> {
    let series = calculate_macd_series(candles, fast_period, slow_period, signal_period);
    let last = candles.len().checked_sub(1)?;
    Some((series.line[last]?, series.signal[last]?))
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Option<(f64, f64)> {
    calculate_macd(candles, 12, 26, 9)
}
