pub mod models;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::models::{Bar, PriceHistory, Symbol};
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close, high: close, low: close, close,
            volume: 0.0,
        }
    }

    #[test]
    fn test_symbol_parse_normalizes() {
        assert_eq!(Symbol::parse("  btc-usd ").unwrap().as_str(), "BTC-USD");
        assert_eq!(Symbol::parse("^axjo").unwrap().to_string(), "^AXJO");
        assert!(Symbol::parse("   ").is_none());
        assert!(Symbol::parse("").is_none());
    }

    #[test]
    fn test_symbol_serde_rejects_blank() {
        let ok: Symbol = serde_json::from_str("\"spy\"").unwrap();
        assert_eq!(ok.as_str(), "SPY");
        assert!(serde_json::from_str::<Symbol>("\" \"").is_err());
    }

    #[test]
    fn test_price_history_sorts_and_dedups() {
        let symbol = Symbol::parse("SPY").unwrap();
        let history = PriceHistory::new(symbol, vec![bar(3, 3.0), bar(1, 1.0), bar(3, 30.0), bar(2, 2.0)]);
        let closes: Vec<f64> = history.closes().collect();
        // Later duplicate of day 3 replaces the earlier one.
        assert_eq!(closes, vec![1.0, 2.0, 30.0]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.last().unwrap().close, 30.0);
    }
}
