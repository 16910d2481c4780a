//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Band width in standard deviations
pub const BOLLINGER_STD_DEV: f64 = 2.0;

/// Aligned upper, middle and lower bands
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands for every candle
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
///
/// The deviation is the population one, over the same window as the SMA.
pub fn calculate_bollinger_series(candles: &[Candle], period: usize, std_dev: f64) -> BollingerSeries {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma_series(&closes, period);
    let deviation = math::std_dev_series(&closes, period);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(&deviation)
            .map(|(mid, dev)| Some((*mid)? + sign * std_dev * (*dev)?))
            .collect()
    };

    let upper = band(1.0);
    let lower = band(-1.0);
    BollingerSeries { upper, middle, lower }
}
