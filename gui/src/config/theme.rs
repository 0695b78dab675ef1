// Theme specific configurations (colors for the window chrome and the chart)
use engine::render::ChartStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    pub background: String,
    pub foreground: String,
    pub muted: String,
    pub border: String,
    pub accent: String,
    pub grid: String,
    pub chart_bullish: String,
    pub chart_bearish: String,
    pub volume_up: String,
    pub volume_down: String,
}

impl ThemePalette {
    /// Unknown names fall back to the light palette.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "dark" => Self::default_dark(),
            _ => Self::default_light(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#d1d4dc".to_string(),
            muted: "#8a8f98".to_string(),
            border: "#3a3a3a".to_string(),
            accent: "#007acc".to_string(),
            grid: "#2b2b2b".to_string(),
            chart_bullish: "#26a69a".to_string(),
            chart_bearish: "#ef5350".to_string(),
            volume_up: "#1f5f58".to_string(),
            volume_down: "#7a3432".to_string(),
        }
    }

    // White canvas with black text, like the classic desktop charting look.
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#000000".to_string(),
            muted: "#555555".to_string(),
            border: "#c8c8c8".to_string(),
            accent: "#007acc".to_string(),
            grid: "#e6e6e6".to_string(),
            chart_bullish: "#26a69a".to_string(),
            chart_bearish: "#ef5350".to_string(),
            volume_up: "#7fbfb8".to_string(),
            volume_down: "#f2a09e".to_string(),
        }
    }

    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            background: self.background.clone(),
            foreground: self.foreground.clone(),
            grid: self.grid.clone(),
            bullish: self.chart_bullish.clone(),
            bearish: self.chart_bearish.clone(),
            volume_up: self.volume_up.clone(),
            volume_down: self.volume_down.clone(),
        }
    }

    /// Global stylesheet for the window layout.
    pub fn stylesheet(&self) -> String {
        format!(
            r#"
html, body, #main {{ margin: 0; height: 100%; background: {bg}; color: {fg}; font-family: sans-serif; }}
.layout {{ display: grid; grid-template-columns: 220px 1fr; grid-template-rows: auto 1fr; height: 100vh; gap: 6px; padding: 6px; box-sizing: border-box; }}
.symbol-combo {{ position: relative; display: flex; }}
.symbol-combo input {{ flex: 1; padding: 4px 6px; background: {bg}; color: {fg}; border: 1px solid {border}; }}
.symbol-combo button {{ border: 1px solid {border}; border-left: none; background: {bg}; color: {fg}; cursor: pointer; }}
.symbol-combo-list {{ position: absolute; top: 100%; left: 0; right: 0; margin: 0; padding: 0; list-style: none; z-index: 10; background: {bg}; border: 1px solid {border}; max-height: 260px; overflow-y: auto; }}
.symbol-combo-list li {{ padding: 4px 8px; cursor: pointer; }}
.symbol-combo-list li.active {{ background: {accent}; color: #ffffff; }}
.info-label {{ align-self: center; color: {fg}; }}
.chart-area {{ grid-column: 1 / span 2; position: relative; min-height: 0; border: 1px solid {border}; }}
.chart-canvas, .chart-svg, .chart-svg svg {{ width: 100%; height: 100%; display: block; }}
.chart-empty {{ display: flex; align-items: center; justify-content: center; height: 100%; color: {muted}; }}
.indicator-readout {{ position: absolute; right: 80px; top: 8px; font-size: 12px; color: {muted}; }}
.indicator-readout span {{ margin-left: 12px; }}
"#,
            bg = self.background,
            fg = self.foreground,
            border = self.border,
            accent = self.accent,
            muted = self.muted,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert_eq!(ThemePalette::by_name("Dark"), ThemePalette::default_dark());
        assert_eq!(ThemePalette::by_name("light"), ThemePalette::default_light());
        assert_eq!(ThemePalette::by_name("solarized"), ThemePalette::default_light());
    }

    #[test]
    fn test_chart_style_uses_palette_colors() {
        let palette = ThemePalette::default_dark();
        let style = palette.chart_style();
        assert_eq!(style.background, palette.background);
        assert_eq!(style.bullish, "#26a69a");
        assert_eq!(style.volume_down, palette.volume_down);
    }

    #[test]
    fn test_stylesheet_interpolates_colors() {
        let css = ThemePalette::default_light().stylesheet();
        assert!(css.contains("background: #ffffff"));
        assert!(css.contains(".chart-area"));
    }
}
