// Last close and latest EMA values, shown over the chart's top-right corner.
#![allow(non_snake_case)]
use crate::state::app_state::AppState;
use dioxus::prelude::*;
use shared::models::ChartFrame;
use shared::utils::format_price;

/// `(label, value, color)` triples for the readout; the close has no line color.
pub fn readout_entries(frame: &ChartFrame) -> Vec<(String, String, Option<String>)> {
    let mut entries = Vec::with_capacity(frame.emas.len() + 1);
    if let Some(last) = frame.history.last() {
        entries.push(("Close".to_string(), format_price(last.close), None));
    }
    for series in &frame.emas {
        if let Some(value) = series.last_value() {
            entries.push((series.label.clone(), format_price(value), Some(series.color.clone())));
        }
    }
    entries
}

#[component]
pub fn IndicatorReadout() -> Element {
    let state = use_context::<AppState>();
    let entries = state
        .frame
        .read()
        .as_ref()
        .map(readout_entries)
        .unwrap_or_default();

    rsx! {
        div {
            class: "indicator-readout",
            for (label, value, color) in entries {
                span {
                    key: "{label}",
                    style: if let Some(color) = color { format!("color: {color}") } else { String::new() },
                    "{label} {value}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{Bar, IndicatorSeries, PriceHistory, Symbol};
    use std::sync::Arc;

    #[test]
    fn test_readout_lists_close_then_emas() {
        let bar = Bar {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.5,
            volume: 100.0,
        };
        let frame = ChartFrame {
            history: Arc::new(PriceHistory::new(Symbol::parse("GLD").unwrap(), vec![bar])),
            emas: vec![IndicatorSeries {
                label: "EMA-10".to_string(),
                color: "#00FFFF".to_string(),
                line_width: 2,
                values: vec![11.25],
            }],
        };
        let entries = readout_entries(&frame);
        assert_eq!(entries[0], ("Close".to_string(), "11.50".to_string(), None));
        assert_eq!(entries[1], ("EMA-10".to_string(), "11.25".to_string(), Some("#00FFFF".to_string())));
    }
}
