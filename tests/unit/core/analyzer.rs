//! Unit tests for the analysis pipeline

use std::sync::Arc;

use confluence::config::{Config, Thresholds};
use confluence::core::{render_text, AnalysisError, Analyzer};
use confluence::indicators::IndicatorError;
use confluence::services::StaticMarketDataProvider;
use confluence::signals::{rule_ids, MarketBias};

use crate::support::{falling_candles, rising_candles};

fn analyzer_with(candles: Vec<confluence::models::Candle>) -> Analyzer {
    Analyzer::new(
        &Config::default(),
        Arc::new(StaticMarketDataProvider::new(candles)),
    )
    .unwrap()
}

#[tokio::test]
async fn test_uptrend_analysis() {
    let analyzer = analyzer_with(rising_candles(300));
    let report = analyzer.analyze("BTCUSDT", "1h").await.unwrap();

    assert_eq!(report.symbol, "BTCUSDT");
    assert_eq!(report.interval, "1h");
    assert_eq!(report.candle_count, 300);

    let ids: Vec<&str> = report.reasons.iter().map(|r| r.rule_id.as_str()).collect();
    assert!(ids.contains(&rule_ids::PRICE_ABOVE_EMA_200));
    assert!(ids.contains(&rule_ids::EMA_SHORT_ABOVE_LONG));
    assert!(ids.contains(&rule_ids::ADX_STRONG_TREND));
    assert!(!ids.contains(&rule_ids::PRICE_BELOW_EMA_200));
    assert!(ids.contains(&rule_ids::EMA_BULLISH_ALIGNMENT));
    assert!(ids.contains(&rule_ids::ADX_BULLISH_DIRECTION));
    assert!(!ids.contains(&rule_ids::ADX_BEARISH_DIRECTION));

    assert!(report
        .messages()
        .contains(&"Price above EMA 200 → Long-term uptrend bias"));
    assert_eq!(report.summary.bias, MarketBias::Bullish);
}

#[tokio::test]
async fn test_downtrend_analysis() {
    let analyzer = analyzer_with(falling_candles(300));
    let report = analyzer.analyze("ETHUSDT", "4h").await.unwrap();

    assert!(report
        .messages()
        .contains(&"Price below EMA 200 → Long-term downtrend bias"));
    assert_eq!(report.summary.bias, MarketBias::Bearish);
}

#[tokio::test]
async fn test_strong_downtrend_counts_as_bearish_confluence() {
    let analyzer = analyzer_with(falling_candles(300));
    let report = analyzer.analyze("ETHUSDT", "4h").await.unwrap();

    let bearish: Vec<&str> = report
        .summary
        .bearish
        .iter()
        .map(|r| r.rule_id.as_str())
        .collect();
    assert!(bearish.contains(&rule_ids::ADX_BEARISH_DIRECTION));
    assert!(bearish.contains(&rule_ids::EMA_BEARISH_ALIGNMENT));

    // the direction-free strength reading stays neutral
    assert!(report
        .summary
        .neutral
        .iter()
        .any(|r| r.rule_id == rule_ids::ADX_STRONG_TREND));
    assert!(report
        .summary
        .bullish
        .iter()
        .all(|r| r.rule_id != rule_ids::ADX_BULLISH_DIRECTION));
}

#[tokio::test]
async fn test_candle_limit_applied() {
    let config = Config {
        candle_limit: 50,
        ..Config::default()
    };
    let analyzer = Analyzer::new(
        &config,
        Arc::new(StaticMarketDataProvider::new(rising_candles(300))),
    )
    .unwrap();
    let report = analyzer.analyze("BTCUSDT", "1h").await.unwrap();

    assert_eq!(report.candle_count, 50);
    // EMA 200 has not warmed up, so the long-term rules stay silent
    assert!(report.snapshot.ema_200.is_none());
    assert!(report
        .reasons
        .iter()
        .all(|r| r.rule_id != rule_ids::PRICE_ABOVE_EMA_200));
}

#[test]
fn test_empty_history_is_an_error() {
    let analyzer = analyzer_with(Vec::new());
    let err = analyzer.analyze_candles("BTCUSDT", "1h", &[]).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::Indicator(IndicatorError::NotEnoughCandles { .. })
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let config = Config {
        thresholds: Thresholds {
            adx_weak: 30.0,
            ..Thresholds::default()
        },
        ..Config::default()
    };
    let result = Analyzer::new(&config, Arc::new(StaticMarketDataProvider::new(Vec::new())));
    assert!(matches!(result, Err(AnalysisError::Config(_))));
}

#[test]
fn test_catalog_uses_configured_thresholds() {
    let config = Config {
        thresholds: Thresholds {
            rsi_overbought: 65.0,
            ..Thresholds::default()
        },
        ..Config::default()
    };
    let analyzer =
        Analyzer::new(&config, Arc::new(StaticMarketDataProvider::new(Vec::new()))).unwrap();
    let rule = analyzer.catalog().get(rule_ids::RSI_OVERBOUGHT).unwrap();
    assert_eq!(
        rule.template().source(),
        "RSI > 65 → Overbought, potential pullback"
    );
}

#[test]
fn test_render_text_report() {
    let analyzer = analyzer_with(Vec::new());
    let report = analyzer
        .analyze_candles("BTCUSDT", "15m", &rising_candles(300))
        .unwrap();
    let text = render_text(&report);

    assert!(text.contains("TECHNICAL ANALYSIS - BTCUSDT (15m)"));
    assert!(text.contains("OVERALL MARKET BIAS: Bullish Bias"));
    assert!(text.contains("BULLISH CONFLUENCES"));
    assert!(text.contains("REASONING:"));
    assert!(text.contains("  1. "));
}

#[test]
fn test_render_text_without_reasons() {
    let analyzer = analyzer_with(Vec::new());
    let report = analyzer
        .analyze_candles("BTCUSDT", "15m", &rising_candles(1))
        .unwrap();
    let text = render_text(&report);
    assert!(text.contains("No Clear Signal"));
    assert!(text.contains("No confluence detected"));
}

#[test]
fn test_report_serializes_to_json() {
    let analyzer = analyzer_with(Vec::new());
    let report = analyzer
        .analyze_candles("BTCUSDT", "1h", &rising_candles(300))
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["symbol"], "BTCUSDT");
    assert_eq!(json["summary"]["bias"], "bullish");
    assert!(json["reasons"].as_array().unwrap().len() >= 3);
    assert!(json["snapshot"]["ema_200"].is_number());
}
