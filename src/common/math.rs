//! Series helpers shared by the indicator calculations.
//!
//! Every `*_series` function returns a vector aligned with its input: position
//! `i` holds the value as of input `i`, or `None` while the window is still
//! warming up.

/// Simple moving average of the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Rolling simple moving average
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut sum: f64 = values[..period].iter().sum();
    out[period - 1] = Some(sum / period as f64);
    for i in period..values.len() {
        sum += values[i] - values[i - period];
        out[i] = Some(sum / period as f64);
    }
    out
}

/// Rolling population standard deviation
pub fn std_dev_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    for end in period..=values.len() {
        let window = &values[end - period..end];
        let Some(mean) = sma(window, period) else {
            continue;
        };
        let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
        out[end - 1] = Some(variance.sqrt());
    }
    out
}

/// Single EMA step
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    value * k + previous * (1.0 - k)
}

/// EMA seeded with the SMA of the first `period` values
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut current = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(current);
    for i in period..values.len() {
        current = ema_from_previous(values[i], current, period);
        out[i] = Some(current);
    }
    out
}

/// EMA over a series that itself has a warm-up prefix.
///
/// Leading `None`s are skipped; the EMA starts once `period` defined values
/// are available. Output stops at the first gap after the prefix.
pub fn ema_of_optional(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    let Some(start) = values.iter().position(Option::is_some) else {
        return out;
    };

    let defined: Vec<f64> = values[start..].iter().map_while(|v| *v).collect();
    for (offset, value) in ema_series(&defined, period).into_iter().enumerate() {
        out[start + offset] = value;
    }
    out
}

/// Wilder's smoothing (RMA) seeded with the SMA of the first `period` values
pub fn wilder_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut current = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(current);
    for i in period..values.len() {
        current = (current * (period as f64 - 1.0) + values[i]) / period as f64;
        out[i] = Some(current);
    }
    out
}

/// True range of a bar given the previous close
pub fn true_range(high: f64, low: f64, previous_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - previous_close).abs();
    let lc = (low - previous_close).abs();
    hl.max(hc).max(lc)
}

/// Highest and lowest value in a window, `None` if the window is empty
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
