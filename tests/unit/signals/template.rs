//! Unit tests for message templates

use confluence::signals::{MessageTemplate, TemplateError};

use crate::support::bare_snapshot;

#[test]
fn test_literal_template() {
    let template = MessageTemplate::parse("Price above EMA 200 → Long-term uptrend bias").unwrap();
    let rendered = template.render(&bare_snapshot(1.0), None);
    assert_eq!(rendered, "Price above EMA 200 → Long-term uptrend bias");
}

#[test]
fn test_placeholder_with_precision() {
    let template = MessageTemplate::parse("RSI at {rsi:.1}").unwrap();
    let snapshot = bare_snapshot(100.0).with_rsi(25.46);
    assert_eq!(template.render(&snapshot, None), "RSI at 25.5");
}

#[test]
fn test_placeholder_without_precision() {
    let template = MessageTemplate::parse("RSI {rsi}").unwrap();
    assert_eq!(template.render(&bare_snapshot(100.0).with_rsi(25.0), None), "RSI 25");
}

#[test]
fn test_previous_placeholder() {
    let template = MessageTemplate::parse("MACD {prev.macd_line:.2} → {macd_line:.2}").unwrap();
    let previous = bare_snapshot(100.0).with_macd(-0.5, 0.1);
    let current = bare_snapshot(100.0).with_macd(0.25, 0.1);

    assert_eq!(template.render(&current, Some(&previous)), "MACD -0.50 → 0.25");
    assert_eq!(template.render(&current, None), "MACD n/a → 0.25");
}

#[test]
fn test_absent_value_renders_placeholder_text() {
    let template = MessageTemplate::parse("ADX {adx:.1}").unwrap();
    assert_eq!(template.render(&bare_snapshot(100.0), None), "ADX n/a");
}

#[test]
fn test_escaped_braces() {
    let template = MessageTemplate::parse("{{literal}} {close}").unwrap();
    assert_eq!(template.render(&bare_snapshot(7.0), None), "{literal} 7");
}

#[test]
fn test_unknown_field_rejected() {
    assert_eq!(
        MessageTemplate::parse("value {bogus}"),
        Err(TemplateError::UnknownField("bogus".to_string()))
    );
}

#[test]
fn test_unclosed_placeholder_rejected() {
    assert_eq!(MessageTemplate::parse("RSI {rsi"), Err(TemplateError::Unclosed(4)));
}

#[test]
fn test_unmatched_brace_rejected() {
    assert_eq!(MessageTemplate::parse("a } b"), Err(TemplateError::UnmatchedBrace(2)));
}

#[test]
fn test_invalid_precision_rejected() {
    assert_eq!(
        MessageTemplate::parse("{rsi:2}"),
        Err(TemplateError::InvalidPrecision("2".to_string()))
    );
    assert_eq!(
        MessageTemplate::parse("{rsi:.x}"),
        Err(TemplateError::InvalidPrecision(".x".to_string()))
    );
}

#[test]
fn test_display_returns_source() {
    let template = MessageTemplate::parse("ATR {atr_percent:.2}%").unwrap();
    assert_eq!(template.to_string(), "ATR {atr_percent:.2}%");
    assert_eq!(template.source(), "ATR {atr_percent:.2}%");
}
