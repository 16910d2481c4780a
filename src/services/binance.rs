//! Binance spot klines over REST

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::indicators::Candle;
use crate::services::error::MarketDataError;
use crate::services::market_data::MarketDataProvider;

pub const MAX_KLINES_LIMIT: usize = 1000;

pub const SUPPORTED_INTERVALS: [&str; 16] = [
    "1s", "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w", "1M",
];

const KLINES_PATH: &str = "api/v3/klines";

const STABLE_QUOTES: [&str; 4] = ["USDT", "USDC", "FDUSD", "BUSD"];

/// Upper-case a symbol and append `USDT` when it has no stablecoin quote
pub fn normalize_symbol(raw: &str) -> Result<String, MarketDataError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(MarketDataError::InvalidSymbol(raw.to_string()));
    }
    if STABLE_QUOTES.iter().any(|quote| symbol.ends_with(quote) && symbol.len() > quote.len()) {
        Ok(symbol)
    } else {
        Ok(format!("{}USDT", symbol))
    }
}

pub fn validate_interval(interval: &str) -> Result<(), MarketDataError> {
    if SUPPORTED_INTERVALS.contains(&interval) {
        Ok(())
    } else {
        Err(MarketDataError::InvalidInterval(interval.to_string()))
    }
}

pub struct BinanceClient {
    http: reqwest::Client,
    base_url: Url,
    max_retries: usize,
    min_retry_delay: Duration,
}

impl BinanceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MarketDataError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    /// `base_url` may carry a path prefix, e.g. a proxy mount point
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, MarketDataError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http,
            base_url,
            max_retries: 3,
            min_retry_delay: Duration::from_millis(500),
        })
    }

    pub fn with_retry(mut self, max_retries: usize, min_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.min_retry_delay = min_delay;
        self
    }

    pub fn klines_url(&self, symbol: &str, interval: &str, limit: usize) -> Result<Url, MarketDataError> {
        let mut url = self.base_url.join(KLINES_PATH)?;
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("interval", interval)
            .append_pair("limit", &limit.clamp(1, MAX_KLINES_LIMIT).to_string());
        Ok(url)
    }

    async fn fetch_klines(&self, url: &Url) -> Result<Vec<Candle>, MarketDataError> {
        debug!(url = %url, "requesting klines");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<Vec<Value>> = response
            .json()
            .await
            .map_err(|e| MarketDataError::Decode(e.to_string()))?;
        rows.iter().map(|row| parse_kline_row(row)).collect()
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for BinanceClient {
    async fn get_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let symbol = normalize_symbol(symbol)?;
        validate_interval(interval)?;
        let url = self.klines_url(&symbol, interval, limit)?;

        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_retry_delay)
            .with_max_times(self.max_retries);

        let candles = (|| async { self.fetch_klines(&url).await })
            .retry(backoff)
            .when(MarketDataError::is_retryable)
            .notify(|err, delay| {
                warn!(
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "klines request failed, retrying"
                );
            })
            .await?;

        info!(symbol = %symbol, interval, candles = candles.len(), "fetched klines");
        Ok(candles)
    }
}

/// One kline row: `[open_time, open, high, low, close, volume, close_time, ...]`
/// with prices encoded as strings
pub fn parse_kline_row(row: &[Value]) -> Result<Candle, MarketDataError> {
    if row.len() < 6 {
        return Err(MarketDataError::Decode(format!(
            "expected at least 6 fields, got {}",
            row.len()
        )));
    }

    let open_time = row[0]
        .as_i64()
        .ok_or_else(|| MarketDataError::Decode(format!("open time is not an integer: {}", row[0])))?;
    let timestamp = DateTime::<Utc>::from_timestamp_millis(open_time)
        .ok_or_else(|| MarketDataError::Decode(format!("open time out of range: {}", open_time)))?;

    Ok(Candle::new(
        number(&row[1], "open")?,
        number(&row[2], "high")?,
        number(&row[3], "low")?,
        number(&row[4], "close")?,
        number(&row[5], "volume")?,
        timestamp,
    ))
}

fn number(value: &Value, name: &str) -> Result<f64, MarketDataError> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| MarketDataError::Decode(format!("invalid {}: {}", name, value)))
}
