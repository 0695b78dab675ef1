// Bridges UI events to the engine's plot pipeline.
//
// A symbol selection starts a plot request; if it produces a frame, the chart is replaced
// and a display-name lookup starts on the tokio runtime. Both requests carry tickets, so
// results of superseded requests are dropped instead of overwriting newer state.

use crate::state::app_state::{AppState, LOADING_NAME};
use dioxus::prelude::*;
use engine::config::EngineSettings;
use engine::services::{ChartService, PlotOutcome, RequestTicket, RequestTracker, SkipReason};
use shared::models::Symbol;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct ChartClient {
    service: Arc<ChartService>,
    plots: RequestTracker,
    names: RequestTracker,
}

/// Aborts the wrapped tokio task when the waiting UI task is cancelled.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Label text for a finished name lookup; any failure falls back to the symbol itself.
fn resolved_label(result: std::result::Result<engine::Result<String>, JoinError>, symbol: &Symbol) -> String {
    match result {
        Ok(Ok(name)) => name,
        Ok(Err(e)) => {
            warn!(%symbol, error = %e, "Name lookup failed, showing the symbol instead");
            symbol.to_string()
        }
        Err(e) => {
            warn!(%symbol, error = %e, "Name lookup task did not complete");
            symbol.to_string()
        }
    }
}

/// The label to show, or `None` when a newer lookup has superseded this one.
fn label_update(
    ticket: &RequestTicket,
    result: std::result::Result<engine::Result<String>, JoinError>,
    symbol: &Symbol,
) -> Option<String> {
    if !ticket.is_current() {
        debug!(%symbol, request = ticket.id(), "Discarding stale name");
        return None;
    }
    Some(resolved_label(result, symbol))
}

impl ChartClient {
    pub fn new(service: Arc<ChartService>) -> Self {
        Self {
            service,
            plots: RequestTracker::new(),
            names: RequestTracker::new(),
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> engine::Result<Self> {
        Ok(Self::new(Arc::new(ChartService::from_settings(settings)?)))
    }

    /// The plot refresh handler. Must be called from a Dioxus scope (event handler or hook).
    pub fn refresh(&self, state: AppState, raw_symbol: String) {
        let ticket = self.plots.begin();
        let client = self.clone();
        spawn(async move {
            let outcome = client.service.plot(&raw_symbol).await;
            if !ticket.is_current() {
                debug!(symbol = %raw_symbol, request = ticket.id(), "Plot superseded, discarding result");
                return;
            }
            match outcome {
                PlotOutcome::Ready(frame) => {
                    let symbol = frame.symbol().clone();
                    info!(%symbol, bars = frame.bars().len(), "Plotting");
                    let mut state = state;
                    state.set_name_label(LOADING_NAME);
                    state.show_frame(frame);
                    client.lookup_name(state, symbol);
                }
                // Nothing changes on screen; the engine already logged why.
                PlotOutcome::Skipped(SkipReason::BlankSymbol) => {}
                PlotOutcome::Skipped(reason) => debug!(?reason, "Plot skipped"),
            }
        });
    }

    fn lookup_name(&self, mut state: AppState, symbol: Symbol) {
        let ticket = self.names.begin();
        let service = self.service.clone();
        let lookup_symbol = symbol.clone();
        let handle = AbortOnDrop(tokio::spawn(async move {
            service.display_name(&lookup_symbol).await
        }));

        let task = spawn(async move {
            let mut handle = handle;
            let result = (&mut handle.0).await;
            if let Some(label) = label_update(&ticket, result, &symbol) {
                let mut state = state;
                state.set_name_label(label);
            }
        });
        state.replace_name_task(task);
    }
}
