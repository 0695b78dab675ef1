// Engine configuration module
pub mod settings;

pub use settings::{EmaLine, EngineSettings, IndicatorSettings, ProviderSettings};
