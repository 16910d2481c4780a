//! Unit tests for EMA indicator

use confluence::indicators::trend::{calculate_ema, calculate_ema_series};

use crate::support::{flat_candles, rising_candles};

#[test]
fn test_ema_insufficient_data() {
    let candles = rising_candles(10);
    assert!(calculate_ema(&candles, 20).is_none());
}

#[test]
fn test_ema_sufficient_data() {
    let candles = rising_candles(50);
    let ema = calculate_ema(&candles, 12).unwrap();
    assert!(ema.is_finite());
    // lags behind a rising close
    assert!(ema < candles.last().unwrap().close);
}

#[test]
fn test_ema_flat_series_equals_price() {
    let ema = calculate_ema(&flat_candles(30, 42.0), 10).unwrap();
    assert!((ema - 42.0).abs() < 1e-9);
}

#[test]
fn test_ema_series_first_value() {
    let series = calculate_ema_series(&rising_candles(30), 9);
    assert!(series[7].is_none());
    assert!(series[8].is_some());
}
