use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A ticker as the market-data provider understands it, e.g. `SPY`, `^AXJO`, `BTC-USD`.
///
/// Symbols are trimmed and upper-cased so that `" spy"` and `"SPY"` share one cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Returns `None` for input that is blank after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::parse(&value).ok_or_else(|| "symbol must not be blank".to_string())
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// One daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Daily history for one symbol, ascending by date with no duplicate dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub symbol: Symbol,
    pub bars: Vec<Bar>,
}

impl PriceHistory {
    /// Sorts and de-duplicates the bars by date; the last bar seen for a date wins.
    pub fn new(symbol: Symbol, mut bars: Vec<Bar>) -> Self {
        bars.reverse();
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self { symbol, bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}

/// A line derived from a price series, with the styling it is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub label: String,
    pub color: String,
    pub line_width: u32,
    pub values: Vec<f64>,
}

impl IndicatorSeries {
    /// Last finite value, used by the legend readout.
    pub fn last_value(&self) -> Option<f64> {
        self.values.iter().rev().copied().find(|v| v.is_finite())
    }
}

/// Everything the chart needs for one symbol: the bars and the overlays computed from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub history: Arc<PriceHistory>,
    pub emas: Vec<IndicatorSeries>,
}

impl ChartFrame {
    pub fn symbol(&self) -> &Symbol {
        &self.history.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.history.bars
    }
}
