//! Unit tests for Bollinger Bands

use confluence::indicators::volatility::{calculate_bollinger_series, BOLLINGER_STD_DEV};

use crate::support::{approx_eq, closes_to_candles, flat_candles, rising_candles};

#[test]
fn test_bollinger_warmup() {
    let bands = calculate_bollinger_series(&rising_candles(25), 20, BOLLINGER_STD_DEV);
    assert_eq!(bands.middle.len(), 25);
    assert!(bands.upper[18].is_none());
    assert!(bands.lower[18].is_none());
    assert!(bands.upper[19].is_some());
    assert!(bands.middle[19].is_some());

    let short = calculate_bollinger_series(&rising_candles(5), 20, BOLLINGER_STD_DEV);
    assert!(short.middle.iter().all(Option::is_none));
}

#[test]
fn test_bollinger_band_values() {
    // mean 5, population deviation 2
    let candles = closes_to_candles(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    let bands = calculate_bollinger_series(&candles, 8, 2.0);

    assert!(approx_eq(bands.middle[7].unwrap(), 5.0));
    assert!(approx_eq(bands.upper[7].unwrap(), 9.0));
    assert!(approx_eq(bands.lower[7].unwrap(), 1.0));
}

#[test]
fn test_bollinger_flat_series_collapses() {
    let bands = calculate_bollinger_series(&flat_candles(30, 50.0), 20, BOLLINGER_STD_DEV);
    assert_eq!(bands.upper[29], Some(50.0));
    assert_eq!(bands.lower[29], Some(50.0));
}
