//! Fetch → snapshots → reasoning → confluence summary

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError};
use crate::indicators::{IndicatorError, SnapshotBuilder};
use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::models::signal::Reason;
use crate::services::error::MarketDataError;
use crate::services::market_data::MarketDataProvider;
use crate::signals::aggregation::{Aggregator, ConfluenceSummary};
use crate::signals::catalog::RuleCatalog;
use crate::signals::engine::ReasoningEngine;
use crate::signals::error::{CatalogError, ReasoningError};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error(transparent)]
    Reasoning(#[from] ReasoningError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub interval: String,
    pub generated_at: DateTime<Utc>,
    pub candle_count: usize,
    pub snapshot: IndicatorSnapshot,
    pub reasons: Vec<Reason>,
    pub summary: ConfluenceSummary,
}

impl AnalysisReport {
    /// Rendered reasoning lines in display order
    pub fn messages(&self) -> Vec<&str> {
        self.reasons.iter().map(|r| r.message.as_str()).collect()
    }
}

pub struct Analyzer {
    provider: Arc<dyn MarketDataProvider>,
    builder: SnapshotBuilder,
    catalog: RuleCatalog,
    confluence_threshold: u32,
    candle_limit: usize,
}

impl Analyzer {
    pub fn new(config: &Config, provider: Arc<dyn MarketDataProvider>) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            provider,
            builder: SnapshotBuilder::new(config.periods.clone())?,
            catalog: RuleCatalog::standard(&config.thresholds)?,
            confluence_threshold: config.confluence_threshold,
            candle_limit: config.candle_limit,
        })
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub async fn analyze(&self, symbol: &str, interval: &str) -> Result<AnalysisReport, AnalysisError> {
        info!(symbol, interval, limit = self.candle_limit, "fetching candles");
        let candles = self
            .provider
            .get_candles(symbol, interval, self.candle_limit)
            .await?;
        self.analyze_candles(symbol, interval, &candles)
    }

    pub fn analyze_candles(
        &self,
        symbol: &str,
        interval: &str,
        candles: &[Candle],
    ) -> Result<AnalysisReport, AnalysisError> {
        let warmup = self.builder.periods().full_warmup();
        if candles.len() < warmup {
            warn!(
                candles = candles.len(),
                required = warmup,
                "limited data available, some indicators will be absent"
            );
        }

        let (current, previous) = self.builder.latest_pair(candles)?;
        let reasons = ReasoningEngine::evaluate_detailed(&current, previous.as_ref(), &self.catalog)?;
        debug!(triggered = reasons.len(), rules = self.catalog.len(), "rules evaluated");

        let summary = Aggregator::summarize(&reasons, self.confluence_threshold);
        info!(
            symbol,
            bias = summary.bias.label(),
            confidence = summary.confidence,
            "analysis complete"
        );

        Ok(AnalysisReport {
            symbol: symbol.to_string(),
            interval: interval.to_string(),
            generated_at: Utc::now(),
            candle_count: candles.len(),
            snapshot: current,
            reasons,
            summary,
        })
    }
}
