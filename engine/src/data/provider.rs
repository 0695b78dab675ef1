// Source of daily bars and instrument metadata.
use crate::config::ProviderSettings;
use crate::data::csv_parser::CsvProvider;
use crate::data::yahoo::YahooProvider;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{Bar, Symbol};
use std::sync::Arc;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &str;

    /// Daily bars from `start` up to the most recent session.
    async fn history(&self, symbol: &Symbol, start: NaiveDate) -> Result<Vec<Bar>>;

    /// Human readable instrument name, e.g. "SPDR S&P 500".
    async fn display_name(&self, symbol: &Symbol) -> Result<String>;
}

pub fn from_settings(settings: &ProviderSettings) -> Result<Arc<dyn MarketDataProvider>> {
    let provider: Arc<dyn MarketDataProvider> = match settings {
        ProviderSettings::Yahoo { base_url, user_agent, timeout_secs } => {
            Arc::new(YahooProvider::new(base_url, user_agent, *timeout_secs)?)
        }
        ProviderSettings::Csv { dir } => Arc::new(CsvProvider::new(dir.clone())),
    };
    tracing::info!(provider = provider.name(), "Market data provider ready");
    Ok(provider)
}
