// Memoizing front for a market data provider: price histories and display names each get
// their own bounded LRU cache. Only successful lookups are remembered.
use super::cache::BoundedCache;
use super::provider::MarketDataProvider;
use crate::config::EngineSettings;
use crate::error::Result;
use chrono::NaiveDate;
use shared::models::{PriceHistory, Symbol};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub struct MarketDataStore {
    provider: Arc<dyn MarketDataProvider>,
    history_start: NaiveDate,
    histories: Mutex<BoundedCache<Arc<PriceHistory>>>,
    names: Mutex<BoundedCache<String>>,
}

impl MarketDataStore {
    pub fn new(provider: Arc<dyn MarketDataProvider>, settings: &EngineSettings) -> Result<Self> {
        Ok(MarketDataStore {
            provider,
            history_start: settings.history_start,
            histories: Mutex::new(BoundedCache::new(settings.history_cache_capacity)?),
            names: Mutex::new(BoundedCache::new(settings.name_cache_capacity)?),
        })
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn history(&self, symbol: &Symbol) -> Result<Arc<PriceHistory>> {
        if let Some(hit) = self.histories.lock().await.get(symbol) {
            debug!(%symbol, "History cache hit");
            return Ok(hit);
        }

        // The lock is not held across the download; two concurrent misses for the same
        // symbol may both fetch, and the later insert wins.
        let bars = self.provider.history(symbol, self.history_start).await?;
        let history = Arc::new(PriceHistory::new(symbol.clone(), bars));

        if let Some((evicted, _)) = self.histories.lock().await.insert(symbol.clone(), history.clone()) {
            info!(%evicted, "Evicted history from cache");
        }
        Ok(history)
    }

    pub async fn display_name(&self, symbol: &Symbol) -> Result<String> {
        if let Some(hit) = self.names.lock().await.get(symbol) {
            debug!(%symbol, "Name cache hit");
            return Ok(hit);
        }
        let name = self.provider.display_name(symbol).await?;
        self.names.lock().await.insert(symbol.clone(), name.clone());
        Ok(name)
    }

    pub async fn cached_histories(&self) -> usize {
        self.histories.lock().await.len()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StaticProvider;
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    fn settings(history_capacity: usize) -> EngineSettings {
        EngineSettings {
            history_cache_capacity: history_capacity,
            ..EngineSettings::default()
        }
    }

    #[tokio::test]
    async fn test_history_is_memoized() {
        let provider = Arc::new(StaticProvider::default().with_series("SPY", &[1.0, 2.0, 3.0]));
        let store = MarketDataStore::new(provider.clone(), &settings(15)).unwrap();

        let first = store.history(&sym("spy")).await.unwrap();
        let second = store.history(&sym("SPY")).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.history_calls(), 1);
        assert_eq!(first.len(), 3);
    }

    #[tokio::test]
    async fn test_history_cache_evicts_oldest() {
        let provider = Arc::new(
            StaticProvider::default()
                .with_series("A", &[1.0])
                .with_series("B", &[1.0])
                .with_series("C", &[1.0]),
        );
        let store = MarketDataStore::new(provider.clone(), &settings(2)).unwrap();

        store.history(&sym("A")).await.unwrap();
        store.history(&sym("B")).await.unwrap();
        store.history(&sym("C")).await.unwrap(); // evicts A
        assert_eq!(store.cached_histories().await, 2);
        assert_eq!(provider.history_calls(), 3);

        store.history(&sym("C")).await.unwrap();
        assert_eq!(provider.history_calls(), 3);
        store.history(&sym("A")).await.unwrap();
        assert_eq!(provider.history_calls(), 4);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let provider = Arc::new(StaticProvider::default());
        let store = MarketDataStore::new(provider.clone(), &settings(15)).unwrap();

        assert!(store.history(&sym("NOPE")).await.is_err());
        assert!(store.history(&sym("NOPE")).await.is_err());
        assert_eq!(provider.history_calls(), 2);
        assert_eq!(store.cached_histories().await, 0);
    }

    #[tokio::test]
    async fn test_display_name_is_memoized() {
        let provider = Arc::new(StaticProvider::default().with_name("GLD", "SPDR Gold Shares"));
        let store = MarketDataStore::new(provider.clone(), &settings(15)).unwrap();

        assert_eq!(store.display_name(&sym("gld")).await.unwrap(), "SPDR Gold Shares");
        assert_eq!(store.display_name(&sym("GLD")).await.unwrap(), "SPDR Gold Shares");
        assert_eq!(provider.name_calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_capacity_rejected() {
        let provider = Arc::new(StaticProvider::default());
        assert!(MarketDataStore::new(provider, &settings(0)).is_err());
    }
}
