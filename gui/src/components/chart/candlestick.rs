// Candlestick chart: renders the current frame to SVG and zooms on mouse wheel.
#![allow(non_snake_case)]
use crate::config::AppConfig;
use crate::state::app_state::AppState;
use dioxus::prelude::*;
use engine::render::ChartRenderer;
use std::rc::Rc;
use tracing::warn;

/// Wheel delta to zoom steps: scrolling down widens the window, scrolling up narrows it.
pub fn wheel_steps(delta_y: f64) -> i32 {
    if delta_y > 0.0 {
        1
    } else if delta_y < 0.0 {
        -1
    } else {
        0
    }
}

#[component]
pub fn ChartCanvas() -> Element {
    let config = use_context::<AppConfig>();
    let mut state = use_context::<AppState>();
    let min_visible_bars = config.chart.min_visible_bars;
    let renderer = use_hook(|| Rc::new(ChartRenderer::new(config.chart_style(), config.render_size())));

    // Re-rendered only when the frame or the viewport changes.
    let svg = use_memo(move || {
        let frame = state.frame.read();
        let frame = frame.as_ref()?;
        match renderer.render(frame, *state.viewport.read()) {
            Ok(svg) => Some(svg),
            Err(e) => {
                warn!(symbol = %frame.symbol(), error = %e, "Chart render failed");
                None
            }
        }
    });

    rsx! {
        div {
            class: "chart-canvas",
            onwheel: move |evt| {
                let steps = wheel_steps(evt.delta().strip_units().y);
                state.zoom(steps, min_visible_bars);
            },
            match svg() {
                Some(markup) => rsx! { div { class: "chart-svg", dangerous_inner_html: "{markup}" } },
                None => rsx! { div { class: "chart-empty", "No chart" } },
            }
        }
    }
}
