use confluence::services::{MarketDataProvider, StaticMarketDataProvider};

use crate::support::rising_candles;

#[tokio::test]
async fn test_static_provider_returns_latest_candles() {
    let candles = rising_candles(10);
    let provider = StaticMarketDataProvider::new(candles.clone());

    let latest = provider.get_candles("BTCUSDT", "1h", 3).await.unwrap();
    assert_eq!(latest, candles[7..].to_vec());

    let all = provider.get_candles("BTCUSDT", "1h", 100).await.unwrap();
    assert_eq!(all.len(), 10);
}
