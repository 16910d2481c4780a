//! Unit tests for ATR indicator

use confluence::indicators::volatility::{calculate_atr, calculate_atr_default, calculate_atr_series};

use crate::support::{flat_candles, rising_candles};

#[test]
fn test_atr_insufficient_data() {
    assert!(calculate_atr(&rising_candles(14), 14).is_none());
}

#[test]
fn test_atr_first_value_at_period() {
    let series = calculate_atr_series(&rising_candles(30), 14);
    assert!(series[13].is_none());
    assert!(series[14].is_some());
}

#[test]
fn test_atr_constant_true_range() {
    // high - previous close = 0.3 + 0.5 every bar
    let atr = calculate_atr_default(&rising_candles(40)).unwrap();
    assert!((atr - 0.8).abs() < 1e-9);
}

#[test]
fn test_atr_flat_market_is_zero() {
    assert_eq!(calculate_atr_default(&flat_candles(30, 50.0)), Some(0.0));
}
