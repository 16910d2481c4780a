//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Aligned ADX with its directional indicators
#[derive(Debug, Clone, PartialEq)]
pub struct AdxSeries {
    pub adx: Vec<Option<f64>>,
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
}

/// Calculate ADX for every candle.
///
/// ADX measures trend strength regardless of direction. TR, +DM and -DM are
/// smoothed with Wilder's method, DX is derived from the DIs and ADX is the
/// Wilder average of DX. The first ADX value lands at index `2 * period - 1`.
pub fn calculate_adx_series(candles: &[Candle], period: usize) -> AdxSeries {
    let len = candles.len();
    let mut series = AdxSeries {
        adx: vec![None; len],
        plus_di: vec![None; len],
        minus_di: vec![None; len],
    };
    if period == 0 || len < period + 1 {
        return series;
    }

    let mut tr_values = Vec::with_capacity(len - 1);
    let mut plus_dm_values = Vec::with_capacity(len - 1);
    let mut minus_dm_values = Vec::with_capacity(len - 1);

    for pair in candles.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        tr_values.push(math::true_range(cur.high, cur.low, prev.close));

        let up_move = cur.high - prev.high;
        let down_move = prev.low - cur.low;
        plus_dm_values.push(if up_move > down_move && up_move > 0.0 { up_move } else { 0.0 });
        minus_dm_values.push(if down_move > up_move && down_move > 0.0 { down_move } else { 0.0 });
    }

    let atr = math::wilder_series(&tr_values, period);
    let plus_dm = math::wilder_series(&plus_dm_values, period);
    let minus_dm = math::wilder_series(&minus_dm_values, period);

    let mut dx_values = Vec::new();
    let mut dx_start = None;
    for i in 0..tr_values.len() {
        let (Some(tr), Some(pdm), Some(mdm)) = (atr[i], plus_dm[i], minus_dm[i]) else {
            continue;
        };
        let (plus_di, minus_di) = if tr > 0.0 {
            (100.0 * pdm / tr, 100.0 * mdm / tr)
        } else {
            (0.0, 0.0)
        };
        series.plus_di[i + 1] = Some(plus_di);
        series.minus_di[i + 1] = Some(minus_di);

        let di_sum = plus_di + minus_di;
        let dx = if di_sum > 0.0 {
            100.0 * (plus_di - minus_di).abs() / di_sum
        } else {
            0.0
        };
        dx_start.get_or_insert(i + 1);
        dx_values.push(dx);
    }

    if let Some(start) = dx_start {
        for (offset, value) in math::wilder_series(&dx_values, period).into_iter().enumerate() {
            series.adx[start + offset] = value;
        }
    }
    series
}

/// Latest ADX value
pub fn calculate_adx(candles: &[Candle], period: usize) -> Option<f64> {
    calculate_adx_series(candles, period).adx.last().copied().flatten()
}

/// Calculate ADX with default period (14)
pub fn calculate_adx_default(candles: &[Candle]) -> Option<f64> {
    calculate_adx(candles, 14)
}
