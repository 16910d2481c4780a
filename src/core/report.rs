//! Text rendering of an [`AnalysisReport`]

use std::fmt::Write;

use crate::core::analyzer::AnalysisReport;
use crate::models::signal::{Reason, Strength};

const RULE: &str = "================================================================";

pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "TECHNICAL ANALYSIS - {} ({})", report.symbol, report.interval);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Analysis time: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    if let Some(close) = report.snapshot.close {
        let _ = writeln!(out, "Current price: {:.4}", close);
    }
    let _ = writeln!(out, "Candles analysed: {}", report.candle_count);
    let _ = writeln!(
        out,
        "\nOVERALL MARKET BIAS: {} ({:.1}% confidence)",
        summary.bias.label(),
        summary.confidence
    );

    write_group(&mut out, "BULLISH CONFLUENCES", &summary.bullish);
    write_group(&mut out, "BEARISH CONFLUENCES", &summary.bearish);
    write_group(&mut out, "NEUTRAL/MIXED SIGNALS", &summary.neutral);

    let _ = writeln!(out, "\nREASONING:");
    if report.reasons.is_empty() {
        let _ = writeln!(out, "  No confluence detected");
    }
    for (i, reason) in report.reasons.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, reason.message);
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

fn write_group(out: &mut String, title: &str, reasons: &[Reason]) {
    if reasons.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{} ({} signals):", title, reasons.len());
    for reason in reasons {
        let _ = writeln!(
            out,
            "  - [{}] [{}] {}",
            reason.category,
            strength_label(reason.strength),
            reason.message
        );
    }
}

fn strength_label(strength: Strength) -> &'static str {
    match strength {
        Strength::Strong => "Strong",
        Strength::Medium => "Medium",
        Strength::Low => "Low",
    }
}
