// Editable symbol combo box: free text plus a fuzzy-ranked dropdown of preset symbols.
#![allow(non_snake_case)]
use dioxus::prelude::*;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use shared::models::Symbol;
use std::rc::Rc;

/// Presets ordered by fuzzy score against `query`; all presets, in order, for a blank query.
pub fn rank_presets(matcher: &SkimMatcherV2, presets: &[String], query: &str) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return presets.to_vec();
    }
    let mut scored: Vec<(i64, usize, &String)> = presets
        .iter()
        .enumerate()
        .filter_map(|(idx, preset)| matcher.fuzzy_match(preset, query).map(|score| (score, idx, preset)))
        .collect();
    // Higher score first; ties keep preset order.
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, preset)| preset.clone()).collect()
}

#[component]
pub fn SymbolCombo(presets: Vec<String>, initial: String, on_commit: EventHandler<String>) -> Element {
    let mut text = use_signal(|| initial.clone());
    let mut last_committed = use_signal(|| initial.clone());
    let mut open = use_signal(|| false);
    let mut highlighted = use_signal(|| None::<usize>);
    let matcher = use_hook(|| Rc::new(SkimMatcherV2::default()));

    let suggestions = use_memo(move || rank_presets(&matcher, &presets, &text()));

    let mut commit = move |value: String| {
        open.set(false);
        highlighted.set(None);
        text.set(value.clone());
        if Symbol::parse(&value).is_none() {
            return;
        }
        last_committed.set(value.clone());
        on_commit.call(value);
    };

    let handle_keydown = move |evt: KeyboardEvent| {
        let count = suggestions.read().len();
        match evt.key() {
            Key::ArrowDown if count > 0 => {
                open.set(true);
                let next = highlighted().map_or(0, |i| (i + 1) % count);
                highlighted.set(Some(next));
            }
            Key::ArrowUp if count > 0 => {
                open.set(true);
                let next = highlighted().map_or(count - 1, |i| (i + count - 1) % count);
                highlighted.set(Some(next));
            }
            Key::Enter => {
                let picked = highlighted()
                    .filter(|_| open())
                    .and_then(|i| suggestions.read().get(i).cloned());
                commit(picked.unwrap_or_else(|| text()));
            }
            Key::Escape => {
                open.set(false);
                highlighted.set(None);
            }
            _ => {}
        }
    };

    rsx! {
        div {
            class: "symbol-combo",
            onkeydown: handle_keydown,
            input {
                r#type: "text",
                value: "{text}",
                spellcheck: "false",
                placeholder: "Symbol",
                oninput: move |evt| {
                    text.set(evt.value());
                    open.set(true);
                    highlighted.set(None);
                },
                onfocusout: move |_| {
                    // Leaving the box commits edited text, like pressing Enter.
                    let current = text();
                    if current.trim() != last_committed().trim() {
                        commit(current);
                    } else {
                        open.set(false);
                    }
                },
            }
            button {
                tabindex: "-1",
                onmousedown: move |_| open.set(!open()),
                "▾"
            }
            if open() && !suggestions.read().is_empty() {
                ul {
                    class: "symbol-combo-list",
                    for (idx, preset) in suggestions.read().iter().cloned().enumerate() {
                        li {
                            key: "{preset}",
                            class: if highlighted() == Some(idx) { "active" } else { "" },
                            // mousedown fires before the input loses focus
                            onmousedown: move |_| commit(preset.clone()),
                            onmouseenter: move |_| highlighted.set(Some(idx)),
                            "{preset}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets() -> Vec<String> {
        "SPY ^AXJO GC=F GLD ^TNX BTC-USD ETH-USD XRP-USD"
            .split_whitespace()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_blank_query_lists_all_presets_in_order() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(rank_presets(&matcher, &presets(), "  "), presets());
    }

    #[test]
    fn test_query_filters_presets() {
        let matcher = SkimMatcherV2::default();
        let ranked = rank_presets(&matcher, &presets(), "usd");
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|p| p.ends_with("-USD")));
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let matcher = SkimMatcherV2::default();
        let ranked = rank_presets(&matcher, &presets(), "GLD");
        assert_eq!(ranked.first().map(String::as_str), Some("GLD"));
    }

    #[test]
    fn test_unknown_query_yields_nothing() {
        let matcher = SkimMatcherV2::default();
        assert!(rank_presets(&matcher, &presets(), "zzz").is_empty());
    }
}
