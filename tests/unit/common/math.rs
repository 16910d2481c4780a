//! Unit tests for shared series helpers

use confluence::common::math::{
    ema_of_optional, ema_series, min_max, sma, sma_series, std_dev_series, true_range, wilder_series,
};

use crate::support::approx_eq;

#[test]
fn test_sma_uses_last_window() {
    assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), Some(3.5));
    assert_eq!(sma(&[1.0, 2.0], 3), None);
    assert_eq!(sma(&[1.0, 2.0], 0), None);
}

#[test]
fn test_sma_series_alignment() {
    let series = sma_series(&[1.0, 2.0, 3.0, 4.0], 2);
    assert_eq!(series, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
}

#[test]
fn test_std_dev_series_is_population() {
    let series = std_dev_series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
    assert!(series[..7].iter().all(Option::is_none));
    assert!(approx_eq(series[7].unwrap(), 2.0));

    let rolling = std_dev_series(&[1.0, 1.0, 3.0], 2);
    assert_eq!(rolling, vec![None, Some(0.0), Some(1.0)]);
    assert!(std_dev_series(&[1.0], 0).iter().all(Option::is_none));
}

#[test]
fn test_ema_series_seeded_with_sma() {
    let series = ema_series(&[1.0, 2.0, 3.0], 2);
    assert_eq!(series[0], None);
    assert!(approx_eq(series[1].unwrap(), 1.5));
    // k = 2/3: 3 * 2/3 + 1.5 / 3
    assert!(approx_eq(series[2].unwrap(), 2.5));
}

#[test]
fn test_ema_of_optional_skips_warmup_prefix() {
    let series = ema_of_optional(&[None, Some(1.0), Some(2.0), Some(3.0)], 2);
    assert_eq!(series[0], None);
    assert_eq!(series[1], None);
    assert!(approx_eq(series[2].unwrap(), 1.5));
    assert!(approx_eq(series[3].unwrap(), 2.5));
}

#[test]
fn test_ema_of_optional_all_absent() {
    assert_eq!(ema_of_optional(&[None, None], 2), vec![None, None]);
}

#[test]
fn test_wilder_smoothing() {
    let series = wilder_series(&[1.0, 2.0, 3.0], 2);
    assert_eq!(series[0], None);
    assert!(approx_eq(series[1].unwrap(), 1.5));
    assert!(approx_eq(series[2].unwrap(), 2.25));
}

#[test]
fn test_true_range_picks_largest_move() {
    assert_eq!(true_range(10.0, 8.0, 12.0), 4.0);
    assert_eq!(true_range(10.0, 8.0, 9.0), 2.0);
    assert_eq!(true_range(10.0, 8.0, 5.0), 5.0);
}

#[test]
fn test_min_max() {
    assert_eq!(min_max(&[3.0, -1.0, 7.0]), Some((-1.0, 7.0)));
    assert_eq!(min_max(&[]), None);
}
