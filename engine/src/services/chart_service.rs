//! Plot refresh pipeline.
//!
//! A symbol goes in; either a [`ChartFrame`] (history plus EMA overlays) comes out,
//! or the request is skipped. Skips are silent for the user: an unknown symbol, a
//! provider failure and a series shorter than `min_bars` all leave the current chart
//! untouched and only show up in the log.

use crate::config::{EmaLine, EngineSettings};
use crate::data::{provider, MarketDataStore};
use crate::error::Result;
use crate::indicators::{Ema, IndicatorCalculator};
use shared::models::{ChartFrame, IndicatorSeries, PriceHistory, Symbol};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum PlotOutcome {
    Ready(ChartFrame),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    BlankSymbol,
    TooShort { symbol: Symbol, bars: usize, required: usize },
    Unavailable { symbol: Symbol, error: String },
}

struct Overlay {
    calculator: Ema,
    line: EmaLine,
}

pub struct ChartService {
    store: Arc<MarketDataStore>,
    min_bars: usize,
    overlays: Vec<Overlay>,
}

impl ChartService {
    pub fn new(store: Arc<MarketDataStore>, settings: &EngineSettings) -> Result<Self> {
        settings.validate()?;
        let overlays = settings
            .indicators
            .ema
            .iter()
            .map(|line| {
                Ok(Overlay {
                    calculator: Ema::new(line.span)?,
                    line: line.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            store,
            min_bars: settings.min_bars,
            overlays,
        })
    }

    /// Builds the provider named in the settings and a store around it.
    pub fn from_settings(settings: &EngineSettings) -> Result<Self> {
        let provider = provider::from_settings(&settings.provider)?;
        let store = Arc::new(MarketDataStore::new(provider, settings)?);
        Self::new(store, settings)
    }

    pub async fn plot(&self, raw_symbol: &str) -> PlotOutcome {
        let Some(symbol) = Symbol::parse(raw_symbol) else {
            debug!("Ignoring blank symbol");
            return PlotOutcome::Skipped(SkipReason::BlankSymbol);
        };
        info!(%symbol, provider = self.store.provider_name(), "Plot requested");

        let history = match self.store.history(&symbol).await {
            Ok(history) => history,
            Err(e) => {
                warn!(%symbol, error = %e, "History unavailable, keeping current chart");
                return PlotOutcome::Skipped(SkipReason::Unavailable {
                    symbol,
                    error: e.to_string(),
                });
            }
        };

        if history.len() < self.min_bars {
            info!(%symbol, bars = history.len(), required = self.min_bars, "Series too short, treating symbol as nonexistent");
            return PlotOutcome::Skipped(SkipReason::TooShort {
                symbol,
                bars: history.len(),
                required: self.min_bars,
            });
        }

        PlotOutcome::Ready(self.frame_for(history))
    }

    /// Computes every configured overlay for `history`.
    pub fn frame_for(&self, history: Arc<PriceHistory>) -> ChartFrame {
        let emas = self
            .overlays
            .iter()
            .map(|overlay| {
                debug!(
                    symbol = %history.symbol,
                    indicator = overlay.calculator.name(),
                    parameters = %overlay.calculator.parameters(),
                    "Computing overlay"
                );
                IndicatorSeries {
                    label: overlay.line.label(),
                    color: overlay.line.color.clone(),
                    line_width: overlay.line.line_width,
                    values: overlay.calculator.calculate(&history.bars),
                }
            })
            .collect();
        ChartFrame { history, emas }
    }

    pub async fn display_name(&self, symbol: &Symbol) -> Result<String> {
        self.store.display_name(symbol).await
    }
}
