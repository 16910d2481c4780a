//! Stochastic RSI: where the current RSI sits inside its recent range, 0-100

use crate::common::math;

/// Stoch RSI over an aligned RSI series.
///
/// Needs `period` consecutive RSI values. A window with no range (max == min)
/// yields `None` since the position inside it is undefined.
pub fn calculate_stoch_rsi_series(rsi: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; rsi.len()];
    if period == 0 || rsi.len() < period {
        return out;
    }

    for end in period - 1..rsi.len() {
        let window: Option<Vec<f64>> = rsi[end + 1 - period..=end].iter().copied().collect();
        let Some(window) = window else {
            continue;
        };
        let Some((lowest, highest)) = math::min_max(&window) else {
            continue;
        };
        let range = highest - lowest;
        if range > 0.0 {
            out[end] = Some((window[window.len() - 1] - lowest) / range * 100.0);
        }
    }
    out
}
