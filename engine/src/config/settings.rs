// Engine settings. The GUI deserializes these from the `engine` section of its JSON config;
// the snapshot binary accepts the same JSON on the command line.
use crate::error::{EngineError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub provider: ProviderSettings,
    /// First date requested from the provider.
    pub history_start: NaiveDate,
    /// Series shorter than this are treated as "symbol does not exist".
    pub min_bars: usize,
    pub history_cache_capacity: usize,
    pub name_cache_capacity: usize,
    pub indicators: IndicatorSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderSettings {
    Yahoo {
        #[serde(default = "default_yahoo_base_url")]
        base_url: String,
        #[serde(default = "default_user_agent")]
        user_agent: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Csv {
        dir: PathBuf,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IndicatorSettings {
    pub ema: Vec<EmaLine>,
}

/// One EMA overlay: window length plus how it is drawn.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EmaLine {
    pub span: usize,
    #[serde(default)]
    pub label: Option<String>,
    pub color: String,
    #[serde(default = "default_line_width")]
    pub line_width: u32,
}

impl EmaLine {
    pub fn new(span: usize, color: &str) -> Self {
        Self {
            span,
            label: None,
            color: color.to_string(),
            line_width: default_line_width(),
        }
    }

    pub fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| format!("EMA-{}", self.span))
    }
}

fn default_yahoo_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_line_width() -> u32 {
    2
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings::Yahoo {
            base_url: default_yahoo_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            ema: vec![
                EmaLine::new(10, "#00FFFF"),
                EmaLine::new(20, "#FFA500"),
                EmaLine::new(50, "#FF0000"),
            ],
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            provider: ProviderSettings::default(),
            history_start: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default(),
            min_bars: 20,
            history_cache_capacity: 15,
            name_cache_capacity: 100,
            indicators: IndicatorSettings::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_cache_capacity == 0 || self.name_cache_capacity == 0 {
            return Err(EngineError::ConfigError(
                "cache capacities must be at least 1".to_string(),
            ));
        }
        if let Some(line) = self.indicators.ema.iter().find(|l| l.span == 0) {
            return Err(EngineError::ConfigError(format!(
                "EMA span must be at least 1 (got {} for '{}')",
                line.span,
                line.label()
            )));
        }
        if let ProviderSettings::Yahoo { timeout_secs: 0, .. } = self.provider {
            return Err(EngineError::ConfigError("provider timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
