// Technical indicators module
pub mod ema;

pub use ema::Ema;

use serde_json::Value;
use shared::models::Bar;

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    /// One output per input bar. Positions with no defined value are NaN.
    fn calculate(&self, data: &[Bar]) -> Vec<f64>;
}
