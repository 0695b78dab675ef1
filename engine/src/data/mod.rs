// Market data: providers, caching, and the memoizing store in front of them.
pub mod cache;
pub mod csv_parser;
pub mod market_data;
pub mod provider;
pub mod yahoo;

pub use market_data::MarketDataStore;
pub use provider::MarketDataProvider;
