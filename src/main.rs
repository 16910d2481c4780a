//! Confluence CLI
//!
//! Fetches candles from Binance, evaluates the rule catalog on the latest
//! candle and prints the reasoning.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use confluence::config::Config;
use confluence::core::{render_text, Analyzer};
use confluence::logging;
use confluence::services::binance::{normalize_symbol, validate_interval, BinanceClient};
use dotenvy::dotenv;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "confluence", version, about = "Indicator confluence reasoning for Binance pairs")]
struct Cli {
    /// Trading pair; `USDT` is appended when no stablecoin quote is given
    #[arg(default_value = "BTCUSDT")]
    symbol: String,

    /// Kline interval (1m, 5m, 15m, 1h, 4h, 1d, ...)
    #[arg(short, long, default_value = "15m")]
    interval: String,

    /// Number of candles to fetch (max 1000)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Override the Binance REST base URL
    #[arg(long, env = "CONFLUENCE_BINANCE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(limit) = cli.limit {
        config.candle_limit = limit;
    }
    if let Some(base_url) = cli.base_url {
        config.binance_base_url = base_url;
    }
    config.validate()?;

    let symbol = normalize_symbol(&cli.symbol)?;
    validate_interval(&cli.interval)?;

    info!(environment = %confluence::config::get_environment(), symbol = %symbol, "starting analysis");

    let client = BinanceClient::new(
        &config.binance_base_url,
        Duration::from_millis(config.request_timeout_ms),
    )?;
    let analyzer = Analyzer::new(&config, Arc::new(client))?;

    let report = match analyzer.analyze(&symbol, &cli.interval).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, symbol = %symbol, "analysis failed");
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}
