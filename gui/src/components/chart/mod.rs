// Chart area: the rendered plot and the indicator readout on top of it.
pub mod candlestick;
pub mod indicators;

pub use candlestick::ChartCanvas;
pub use indicators::IndicatorReadout;
