//! Yahoo Finance chart endpoint client.
//!
//! `GET /v8/finance/chart/{symbol}` serves both what the chart needs: the daily
//! OHLCV arrays for a period, and a `meta` block carrying the instrument names.

use super::provider::MarketDataProvider;
use crate::error::{EngineError, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use shared::models::{Bar, Symbol};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    long_name: Option<String>,
    /// Exchange offset from UTC in seconds; bar timestamps are shifted by it before taking the date.
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteArrays>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteArrays {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &Symbol) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| EngineError::ConfigError(format!("invalid provider url '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| EngineError::ConfigError(format!("provider url '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol.as_str()]);
        Ok(url)
    }

    async fn fetch_chart(&self, symbol: &Symbol, query: &[(&str, String)]) -> Result<ChartResult> {
        let url = self.chart_url(symbol)?;
        debug!(%url, ?query, "Requesting chart");
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        // Unknown symbols come back as 404 with an error payload, so parse before checking status.
        match serde_json::from_str::<ChartEnvelope>(&body) {
            Ok(envelope) => first_result(envelope, symbol),
            Err(_) if !status.is_success() => Err(EngineError::ProviderResponse(format!(
                "HTTP {} for {}",
                status, symbol
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

fn first_result(envelope: ChartEnvelope, symbol: &Symbol) -> Result<ChartResult> {
    if let Some(err) = envelope.chart.error {
        debug!(%symbol, code = %err.code, description = %err.description, "Provider reported an error");
        return Err(EngineError::SymbolNotFound(symbol.to_string()));
    }
    envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| EngineError::SymbolNotFound(symbol.to_string()))
}

/// Zips the parallel quote arrays into bars, dropping rows with any missing price.
fn bars_from_result(result: &ChartResult) -> Result<Vec<Bar>> {
    let empty = QuoteArrays::default();
    let quote = result.indicators.quote.first().unwrap_or(&empty);

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let field = |values: &[Option<f64>]| values.get(i).copied().flatten();
        let (Some(open), Some(high), Some(low), Some(close)) =
            (field(&quote.open), field(&quote.high), field(&quote.low), field(&quote.close))
        else {
            continue;
        };
        let date = DateTime::<Utc>::from_timestamp(ts + result.meta.gmtoffset, 0)
            .ok_or_else(|| EngineError::ProviderResponse(format!("timestamp out of range: {}", ts)))?
            .date_naive();
        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume: field(&quote.volume).unwrap_or(0.0),
        });
    }
    Ok(bars)
}

fn name_from_meta(meta: &ChartMeta) -> Option<String> {
    [&meta.short_name, &meta.long_name]
        .into_iter()
        .flatten()
        .map(|n| n.trim())
        .find(|n| !n.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn history(&self, symbol: &Symbol, start: NaiveDate) -> Result<Vec<Bar>> {
        let period1 = start.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc().timestamp();
        let period2 = Utc::now().timestamp();
        let query = [
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
            ("interval", "1d".to_string()),
        ];
        let result = self.fetch_chart(symbol, &query).await?;
        let bars = bars_from_result(&result)?;
        info!(%symbol, bars = bars.len(), "Downloaded history");
        Ok(bars)
    }

    async fn display_name(&self, symbol: &Symbol) -> Result<String> {
        let query = [("range", "1d".to_string()), ("interval", "1d".to_string())];
        let result = self.fetch_chart(symbol, &query).await?;
        name_from_meta(&result.meta).ok_or_else(|| EngineError::NameUnavailable(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPY_RESPONSE: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "SPY", "shortName": "SPDR S&P 500", "longName": "SPDR S&P 500 ETF Trust", "gmtoffset": -18000 },
                "timestamp": [1546439400, 1546525800, 1546612200],
                "indicators": { "quote": [{
                    "open":   [245.98, null, 236.82],
                    "high":   [251.21, 248.57, 247.56],
                    "low":    [245.95, 243.67, 236.63],
                    "close":  [250.18, 244.21, 247.03],
                    "volume": [126925200, 144140700, null]
                }]}
            }],
            "error": null
        }
    }"#;

    const NOT_FOUND_RESPONSE: &str = r#"{
        "chart": { "result": null, "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" } }
    }"#;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[test]
    fn test_bars_drop_rows_with_missing_prices() {
        let envelope: ChartEnvelope = serde_json::from_str(SPY_RESPONSE).unwrap();
        let result = first_result(envelope, &sym("SPY")).unwrap();
        let bars = bars_from_result(&result).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2019, 1, 2).unwrap());
        assert_eq!(bars[0].close, 250.18);
        assert_eq!(bars[0].volume, 126925200.0);
        // Second row had a null open; third row keeps its prices with zero volume.
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2019, 1, 4).unwrap());
        assert_eq!(bars[1].volume, 0.0);
    }

    #[test]
    fn test_error_payload_is_symbol_not_found() {
        let envelope: ChartEnvelope = serde_json::from_str(NOT_FOUND_RESPONSE).unwrap();
        let err = first_result(envelope, &sym("NOPE")).unwrap_err();
        assert!(matches!(err, EngineError::SymbolNotFound(s) if s == "NOPE"));
    }

    #[test]
    fn test_empty_result_is_symbol_not_found() {
        let envelope: ChartEnvelope = serde_json::from_str(r#"{ "chart": { "result": [] } }"#).unwrap();
        assert!(matches!(first_result(envelope, &sym("X")), Err(EngineError::SymbolNotFound(_))));
    }

    #[test]
    fn test_name_prefers_short_name() {
        let envelope: ChartEnvelope = serde_json::from_str(SPY_RESPONSE).unwrap();
        let result = first_result(envelope, &sym("SPY")).unwrap();
        assert_eq!(name_from_meta(&result.meta).as_deref(), Some("SPDR S&P 500"));
    }

    #[test]
    fn test_name_falls_back_to_long_name() {
        let meta = ChartMeta { short_name: Some("  ".to_string()), long_name: Some("Gold Futures".to_string()), gmtoffset: 0 };
        assert_eq!(name_from_meta(&meta).as_deref(), Some("Gold Futures"));
        let meta = ChartMeta { short_name: None, long_name: None, gmtoffset: 0 };
        assert_eq!(name_from_meta(&meta), None);
    }

    #[test]
    fn test_chart_url_encodes_symbol() {
        let provider = YahooProvider::new("https://query1.finance.yahoo.com/", "test", 5).unwrap();
        let url = provider.chart_url(&sym("^axjo")).unwrap();
        assert!(url.as_str().starts_with("https://query1.finance.yahoo.com/v8/finance/chart/"));
        let last = url.path_segments().unwrap().last().unwrap();
        assert!(matches!(last, "^AXJO" | "%5EAXJO"), "unexpected segment {}", last);
        let url = provider.chart_url(&sym("gc=f")).unwrap();
        assert!(url.path().ends_with("/chart/GC=F"));
    }
}
