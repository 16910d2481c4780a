//! Unit tests for snapshot building

use confluence::indicators::{IndicatorError, IndicatorPeriods, SnapshotBuilder};
use confluence::models::indicators::SnapshotField;

use crate::support::{falling_candles, rising_candles, ts, zigzag_candles};

#[test]
fn test_default_periods() {
    let periods = IndicatorPeriods::default();
    assert_eq!(periods.rsi, 14);
    assert_eq!((periods.macd_fast, periods.macd_slow, periods.macd_signal), (12, 26, 9));
    assert_eq!(periods.ema_trend, 200);
    assert_eq!(periods.full_warmup(), 200);
}

#[test]
fn test_periods_reject_zero() {
    let periods = IndicatorPeriods {
        atr: 0,
        ..IndicatorPeriods::default()
    };
    assert_eq!(
        periods.validate(),
        Err(IndicatorError::InvalidPeriod {
            indicator: "atr",
            period: 0
        })
    );
    assert!(SnapshotBuilder::new(periods).is_err());
}

#[test]
fn test_periods_reject_inverted_macd() {
    let periods = IndicatorPeriods {
        macd_fast: 26,
        macd_slow: 12,
        ..IndicatorPeriods::default()
    };
    assert!(matches!(
        periods.validate(),
        Err(IndicatorError::InvalidPeriod { indicator: "macd_fast", .. })
    ));
}

#[test]
fn test_full_warmup_follows_longest_indicator() {
    let periods = IndicatorPeriods {
        ema_trend: 50,
        ..IndicatorPeriods::default()
    };
    assert_eq!(periods.full_warmup(), 50);

    let short = IndicatorPeriods {
        ema_mid: 20,
        ema_trend: 20,
        ..IndicatorPeriods::default()
    };
    // macd slow + signal - 1
    assert_eq!(short.full_warmup(), 34);
}

#[test]
fn test_build_series_is_aligned() {
    let builder = SnapshotBuilder::default();
    let candles = rising_candles(40);
    let series = builder.build_series(&candles);

    assert_eq!(series.len(), candles.len());
    assert_eq!(series[0].timestamp, Some(ts(0)));
    assert_eq!(series[0].close, Some(candles[0].close));
    assert!(series[0].rsi.is_none());
    assert!(series[13].rsi.is_none());
    assert!(series[14].rsi.is_some());
    assert!(series[39].ema_200.is_none());
}

#[test]
fn test_latest_pair_populates_every_field() {
    let builder = SnapshotBuilder::default();
    let candles = zigzag_candles(300);
    let (current, previous) = builder.latest_pair(&candles).unwrap();

    for field in SnapshotField::ALL {
        assert!(current.get(field).is_some(), "{} missing", field);
    }
    assert_eq!(current.timestamp, Some(candles[299].timestamp));
    assert_eq!(current.volume, Some(candles[299].volume));

    let previous = previous.unwrap();
    assert_eq!(previous.timestamp, Some(candles[298].timestamp));
    assert_eq!(previous.close, Some(candles[298].close));
}

#[test]
fn test_directional_and_band_fields_flow_through() {
    let builder = SnapshotBuilder::default();
    let (current, _) = builder.latest_pair(&falling_candles(300)).unwrap();

    let plus_di = current.get(SnapshotField::PlusDi).unwrap();
    let minus_di = current.get(SnapshotField::MinusDi).unwrap();
    assert!(minus_di > plus_di);
    assert!(current.get(SnapshotField::Adx).unwrap() > 25.0);

    // steady decline keeps price in the bottom tenth of the bands
    let position = current.get(SnapshotField::BbPosition).unwrap();
    assert!(position > 0.0 && position < 0.1, "position {}", position);
    assert!(current.ema_50.unwrap() > current.ema_long.unwrap());
}

#[test]
fn test_latest_pair_single_candle() {
    let builder = SnapshotBuilder::default();
    let (current, previous) = builder.latest_pair(&rising_candles(1)).unwrap();
    assert!(previous.is_none());
    assert!(current.close.is_some());
    assert!(current.rsi.is_none());
}

#[test]
fn test_latest_pair_empty_history() {
    let builder = SnapshotBuilder::default();
    assert_eq!(
        builder.latest_pair(&[]).unwrap_err(),
        IndicatorError::NotEnoughCandles {
            required: 1,
            actual: 0
        }
    );
}
