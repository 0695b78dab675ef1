// GUI configuration module
pub mod theme; // Color palettes for the window chrome and the chart

use anyhow::{bail, Context};
use engine::config::EngineSettings;
use engine::render::ChartStyle;
use serde::Deserialize;
use std::path::Path;
use theme::ThemePalette;

/// Points at a JSON file that replaces the embedded default configuration.
pub const CONFIG_ENV_VAR: &str = "TICKER_CHART_CONFIG";

// Mirrors the structure of assets/config/default.json
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    pub symbols: SymbolSettings,
    pub chart: ChartConfig,
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub title: String,
    #[serde(default = "default_true")]
    pub maximized: bool,
    #[serde(default = "default_theme")]
    pub theme: String, // "dark" or "light"
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SymbolSettings {
    pub presets: Vec<String>,
    /// Symbol plotted on startup; the first preset when absent.
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub init_zoom_periods: usize,
    pub min_visible_bars: usize,
    pub render_width: u32,
    pub render_height: u32,
    /// Overrides the theme's chart colors when present.
    #[serde(default)]
    pub colors: Option<ChartStyle>,
}

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    800
}

impl SymbolSettings {
    pub fn initial_symbol(&self) -> Option<&str> {
        self.default
            .as_deref()
            .or_else(|| self.presets.first().map(String::as_str))
    }
}

impl AppConfig {
    /// Loads the file named by `TICKER_CHART_CONFIG`, or the embedded default.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_path(Path::new(&path)),
            None => Self::load_default(),
        }
    }

    pub fn load_default() -> anyhow::Result<Self> {
        let config_str = include_str!("../../assets/config/default.json"); // Path relative to this .rs file
        Self::from_json_str(config_str).context("embedded default configuration")
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path.display()))?;
        Self::from_json_str(&config_str).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let mut config: AppConfig = serde_json::from_str(json)?;
        config.symbols.presets.retain(|s| !s.trim().is_empty());
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.engine.validate()?;
        if self.chart.init_zoom_periods == 0 || self.chart.min_visible_bars == 0 {
            bail!("chart zoom settings must be at least 1 bar");
        }
        if self.chart.render_width == 0 || self.chart.render_height == 0 {
            bail!("chart render size must be non-zero");
        }
        Ok(())
    }

    pub fn palette(&self) -> ThemePalette {
        ThemePalette::by_name(&self.app.theme)
    }

    /// Chart colors: explicit `chart.colors` if configured, otherwise derived from the theme.
    pub fn chart_style(&self) -> ChartStyle {
        self.chart
            .colors
            .clone()
            .unwrap_or_else(|| self.palette().chart_style())
    }

    pub fn render_size(&self) -> (u32, u32) {
        (self.chart.render_width, self.chart.render_height)
    }
}
