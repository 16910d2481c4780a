//! Volume indicators

use crate::common::math;
use crate::models::indicators::Candle;

/// Rolling average volume, current candle included
pub fn calculate_average_volume_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    math::sma_series(&volumes, period)
}
