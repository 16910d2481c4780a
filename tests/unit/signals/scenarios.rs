//! End-to-end reasoning scenarios against the standard catalog

use confluence::config::Thresholds;
use confluence::models::indicators::IndicatorSnapshot;
use confluence::signals::{evaluate, ReasoningError, RuleCatalog, SnapshotRole};

use crate::support::{bare_snapshot, ts};

const RSI_OVERSOLD_MESSAGE: &str = "RSI < 30 → Oversold, potential bounce";

fn standard() -> RuleCatalog {
    RuleCatalog::standard(&Thresholds::default()).unwrap()
}

#[test]
fn test_oversold_below_long_term_trend() {
    let current = bare_snapshot(100.0).with_rsi(25.0).with_ema_200(120.0);
    let messages = evaluate(&current, None, &standard()).unwrap();

    assert_eq!(
        messages,
        vec![
            RSI_OVERSOLD_MESSAGE,
            "Price below EMA 200 → Long-term downtrend bias",
        ]
    );
    assert!(messages.iter().all(|m| !m.contains("MACD crossed")));
}

#[test]
fn test_macd_bullish_crossover() {
    let previous = bare_snapshot(99.0).with_macd(0.5, 0.9);
    let current = bare_snapshot(100.0).with_macd(1.2, 0.8);
    let messages = evaluate(&current, Some(&previous), &standard()).unwrap();

    assert_eq!(
        messages,
        vec![
            "MACD crossed above signal → Bullish momentum shift",
            "MACD above zero → Momentum in positive territory",
        ]
    );
}

#[test]
fn test_crossover_without_previous_does_not_trigger() {
    let current = bare_snapshot(100.0).with_macd(1.2, 0.8);
    let messages = evaluate(&current, None, &standard()).unwrap();
    assert_eq!(messages, vec!["MACD above zero → Momentum in positive territory"]);
}

#[test]
fn test_only_required_fields_yields_empty_output() {
    let messages = evaluate(&bare_snapshot(100.0), Some(&bare_snapshot(99.0)), &standard()).unwrap();
    assert!(messages.is_empty());
}

#[test]
fn test_missing_timestamp_yields_error_only() {
    let current = IndicatorSnapshot {
        close: Some(100.0),
        rsi: Some(25.0),
        ema_200: Some(120.0),
        ..IndicatorSnapshot::default()
    };
    assert_eq!(
        evaluate(&current, None, &standard()),
        Err(ReasoningError::InvalidSnapshot {
            role: SnapshotRole::Current,
            field: "timestamp",
        })
    );
}

#[test]
fn test_oversold_message_present_exactly_once() {
    let catalog = standard();
    let mut rsi = 0.0;
    while rsi < 30.0 {
        let current = IndicatorSnapshot::new(ts(1), 50.0)
            .with_rsi(rsi)
            .with_stoch_rsi(rsi)
            .with_adx(rsi);
        let messages = evaluate(&current, None, &catalog).unwrap();
        let hits = messages.iter().filter(|m| *m == RSI_OVERSOLD_MESSAGE).count();
        assert_eq!(hits, 1, "rsi {}", rsi);
        rsi += 0.5;
    }
}

#[test]
fn test_absent_rsi_produces_no_rsi_rules() {
    let catalog = standard();
    let current = IndicatorSnapshot::new(ts(1), 100.0)
        .with_macd(0.3, 0.1)
        .with_emas(101.0, 100.0)
        .with_ema_200(95.0)
        .with_adx(40.0)
        .with_volume(3000.0, 1000.0);
    let previous = IndicatorSnapshot::new(ts(0), 99.0).with_rsi(80.0);

    let messages = evaluate(&current, Some(&previous), &catalog).unwrap();
    assert!(!messages.is_empty());
    assert!(messages.iter().all(|m| !m.starts_with("RSI")));
}
