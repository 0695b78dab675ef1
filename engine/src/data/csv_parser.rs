use super::provider::MarketDataProvider;
use crate::error::{EngineError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use shared::models::{Bar, Symbol};
use std::path::PathBuf;

/// Reads bars from a directory of CSV exports, one `{SYMBOL}.csv` per instrument.
///
/// Layout is the provider's download format:
/// `Date,Open,High,Low,Close,Adj Close,Volume` with ISO dates. Display names come
/// from an optional `names.csv` with `Symbol,Name` columns.
pub struct CsvProvider {
    dir: PathBuf,
}

pub struct BarCsvParser;

impl BarCsvParser {
    // Example Row: 2019-01-02,245.98,251.21,245.95,250.18,231.39,126925200
    pub fn parse_bars(content: &str) -> Result<Vec<Bar>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers()?.clone();
        let mut bars = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;

            let date_str = Self::required(&record, &headers, "Date", line)?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                EngineError::CsvDataFormatError(format!("Error parsing 'Date' at line {}: {}", line, e))
            })?;

            let open = Self::number(&record, &headers, "Open", line)?;
            let high = Self::number(&record, &headers, "High", line)?;
            let low = Self::number(&record, &headers, "Low", line)?;
            let close = Self::number(&record, &headers, "Close", line)?;
            let volume = Self::number(&record, &headers, "Volume", line)?;

            let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) else {
                tracing::debug!(line, %date, "Skipping row with missing prices");
                continue;
            };

            bars.push(Bar {
                date,
                open,
                high,
                low,
                close,
                volume: volume.unwrap_or(0.0),
            });
        }
        Ok(bars)
    }

    /// `Symbol,Name` rows; returns the name for `symbol` if listed.
    pub fn find_name(content: &str, symbol: &Symbol) -> Result<Option<String>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let headers = rdr.headers()?.clone();

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let listed = Self::required(&record, &headers, "Symbol", idx + 2)?;
            if Symbol::parse(listed).as_ref() == Some(symbol) {
                let name = Self::required(&record, &headers, "Name", idx + 2)?;
                return Ok(Some(name.to_string()).filter(|n| !n.is_empty()));
            }
        }
        Ok(None)
    }

    fn required<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str> {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|pos| record.get(pos))
            .ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' field at line {}", name, line)))
    }

    // Exports mark holidays and halted sessions with "null".
    fn number(record: &StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<Option<f64>> {
        let raw = Self::required(record, headers, name, line)?;
        if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
            return Ok(None);
        }
        raw.parse::<f64>().map(Some).map_err(|e| {
            EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: '{}': {}", name, line, raw, e))
        })
    }
}

/// Symbols name files directly under the data directory; path separators and `..` never match one.
fn is_plain_file_stem(symbol: &str) -> bool {
    !symbol.contains(['/', '\\']) && !symbol.contains("..")
}

impl CsvProvider {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    async fn read(&self, file_name: &str) -> Result<Option<String>> {
        let path = self.dir.join(file_name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl MarketDataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    async fn history(&self, symbol: &Symbol, start: NaiveDate) -> Result<Vec<Bar>> {
        if !is_plain_file_stem(symbol.as_str()) {
            return Err(EngineError::SymbolNotFound(symbol.to_string()));
        }
        let content = self
            .read(&format!("{}.csv", symbol))
            .await?
            .ok_or_else(|| EngineError::SymbolNotFound(symbol.to_string()))?;
        let mut bars = BarCsvParser::parse_bars(&content)?;
        bars.retain(|b| b.date >= start);
        tracing::info!(%symbol, bars = bars.len(), dir = %self.dir.display(), "Loaded history from CSV");
        Ok(bars)
    }

    async fn display_name(&self, symbol: &Symbol) -> Result<String> {
        let Some(content) = self.read("names.csv").await? else {
            return Err(EngineError::NameUnavailable(symbol.to_string()));
        };
        BarCsvParser::find_name(&content, symbol)?
            .ok_or_else(|| EngineError::NameUnavailable(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SPY_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2018-12-31,249.56,250.19,247.47,249.92,231.17,144299400
2019-01-02,245.98,251.21,245.95,250.18,231.39,126925200
2019-01-03,248.23,248.57,243.67,244.21,225.87,144140700
2019-01-04,null,null,null,null,null,null
2019-01-07,252.69,255.95,251.69,254.38,235.28,";

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    fn fixture_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SPY.csv"), SPY_CSV).unwrap();
        fs::write(dir.path().join("names.csv"), "Symbol,Name\nspy,SPDR S&P 500\nGLD,\n").unwrap();
        dir
    }

    #[test]
    fn test_parse_bars_valid_data() {
        let bars = BarCsvParser::parse_bars(SPY_CSV).unwrap();
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2018, 12, 31).unwrap());
        assert_eq!(bars[1].open, 245.98);
        assert_eq!(bars[1].volume, 126925200.0);
        // Empty volume cell becomes zero.
        assert_eq!(bars[3].close, 254.38);
        assert_eq!(bars[3].volume, 0.0);
    }

    #[test]
    fn test_parse_bars_invalid_number() {
        let content = "Date,Open,High,Low,Close,Adj Close,Volume\n2019-01-02,abc,1,1,1,1,1";
        let err = BarCsvParser::parse_bars(content).unwrap_err();
        assert!(err.to_string().contains("Error parsing 'Open' at line 2"));
    }

    #[test]
    fn test_parse_bars_missing_column() {
        let content = "Date,Open,High,Low,Close\n2019-01-02,1,1,1,1";
        let err = BarCsvParser::parse_bars(content).unwrap_err();
        assert!(err.to_string().contains("Missing 'Volume' field"));
    }

    #[test]
    fn test_parse_bars_bad_date() {
        let content = "Date,Open,High,Low,Close,Adj Close,Volume\n02/01/2019,1,1,1,1,1,1";
        assert!(matches!(BarCsvParser::parse_bars(content), Err(EngineError::CsvDataFormatError(_))));
    }

    #[tokio::test]
    async fn test_history_filters_by_start() {
        let dir = fixture_dir();
        let provider = CsvProvider::new(dir.path().to_path_buf());
        let bars = provider
            .history(&sym("spy"), NaiveDate::from_ymd_opt(2019, 1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(bars.len(), 3);
        assert!(bars.iter().all(|b| b.date.format("%Y").to_string() == "2019"));
    }

    #[tokio::test]
    async fn test_history_missing_file_is_symbol_not_found() {
        let dir = fixture_dir();
        let provider = CsvProvider::new(dir.path().to_path_buf());
        let err = provider
            .history(&sym("NOPE"), NaiveDate::from_ymd_opt(2019, 1, 1).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::SymbolNotFound(s) if s == "NOPE"));
    }

    #[tokio::test]
    async fn test_display_name_lookup() {
        let dir = fixture_dir();
        let provider = CsvProvider::new(dir.path().to_path_buf());
        assert_eq!(provider.display_name(&sym("SPY")).await.unwrap(), "SPDR S&P 500");
        // Listed with an empty name, and not listed at all.
        assert!(matches!(provider.display_name(&sym("GLD")).await, Err(EngineError::NameUnavailable(_))));
        assert!(matches!(provider.display_name(&sym("ETH-USD")).await, Err(EngineError::NameUnavailable(_))));
    }

    #[tokio::test]
    async fn test_history_stays_inside_data_dir() {
        let root = TempDir::new().unwrap();
        let data = root.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("SPY.csv"), SPY_CSV).unwrap();
        fs::write(root.path().join("SECRET.csv"), SPY_CSV).unwrap();
        let provider = CsvProvider::new(data);
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();

        for raw in ["../secret", "..\\secret", "sub/SPY", "..SPY"] {
            let err = provider.history(&sym(raw), start).await.unwrap_err();
            assert!(matches!(err, EngineError::SymbolNotFound(_)), "{raw} escaped the data dir");
        }
        assert_eq!(provider.history(&sym("SPY"), start).await.unwrap().len(), 3);
    }
}
