// Top row of the window: the symbol combo and the instrument name next to it.
#![allow(non_snake_case)]
use crate::components::symbol_combo::SymbolCombo;
use crate::config::AppConfig;
use crate::services::chart_client::ChartClient;
use crate::state::app_state::AppState;
use dioxus::prelude::*;

#[component]
pub fn SymbolBar() -> Element {
    let config = use_context::<AppConfig>();
    let client = use_context::<ChartClient>();
    let state = use_context::<AppState>();
    let initial = config.symbols.initial_symbol().unwrap_or_default().to_string();

    rsx! {
        SymbolCombo {
            presets: config.symbols.presets.clone(),
            initial,
            on_commit: move |symbol: String| client.refresh(state, symbol),
        }
        div { class: "info-label", "{state.name_label}" }
    }
}
