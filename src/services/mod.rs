pub mod binance;
pub mod error;
pub mod market_data;

pub use binance::BinanceClient;
pub use error::MarketDataError;
pub use market_data::{MarketDataProvider, StaticMarketDataProvider};
