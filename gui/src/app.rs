// Root component: provides the shared state, plots the initial symbol and lays out the window.
#![allow(non_snake_case)]
use crate::components::{ChartCanvas, IndicatorReadout, SymbolBar};
use crate::config::AppConfig;
use crate::services::chart_client::ChartClient;
use crate::state::app_state::AppState;
use dioxus::prelude::*;

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let client = use_context::<ChartClient>();
    let init_zoom = config.chart.init_zoom_periods;
    let state = use_context_provider(|| AppState::new(init_zoom));
    let stylesheet = use_hook(|| config.palette().stylesheet());

    use_hook(|| {
        if let Some(symbol) = config.symbols.initial_symbol() {
            client.refresh(state, symbol.to_string());
        }
    });

    rsx! {
        style { "{stylesheet}" }
        div {
            class: "layout",
            SymbolBar {}
            div {
                class: "chart-area",
                ChartCanvas {}
                IndicatorReadout {}
            }
        }
    }
}
