//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// RSI for every candle using Wilder's smoothing.
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss.
/// The first value is available at index `period`.
pub fn calculate_rsi_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if period == 0 || candles.len() < period + 1 {
        return out;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = candles
        .windows(2)
        .map(|pair| {
            let change = pair[1].close - pair[0].close;
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let avg_gains = math::wilder_series(&gains, period);
    let avg_losses = math::wilder_series(&losses, period);

    for (i, (gain, loss)) in avg_gains.iter().zip(&avg_losses).enumerate() {
        if let (Some(gain), Some(loss)) = (gain, loss) {
            out[i + 1] = Some(rsi_from_averages(*gain, *loss));
        }
    }
    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // flat market reads as neutral, pure gains as fully overbought
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Latest RSI value
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Option<f64> {
    calculate_rsi_series(candles, period).last().copied().flatten()
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<f64> {
    calculate_rsi(candles, 14)
}
