// GUI components module
pub mod chart;
pub mod symbol_combo;
pub mod toolbar;

pub use chart::{ChartCanvas, IndicatorReadout};
pub use toolbar::SymbolBar;
