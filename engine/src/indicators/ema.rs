// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use crate::error::{EngineError, Result};
use serde_json::Value;
use shared::models::Bar;

/// Recursive EMA seeded with the first observation (no warm-up window):
/// `y0 = x0`, `y_t = (1 - a) * y_{t-1} + a * x_t` with `a = 2 / (span + 1)`.
///
/// A missing (NaN) input repeats the previous output. The skipped periods still
/// count, so the old value's weight decays by `(1 - a)^k` across a gap of `k`.
pub struct Ema {
    name: String,
    span: usize,
}

impl Ema {
    pub fn new(span: usize) -> Result<Self> {
        if span == 0 {
            return Err(EngineError::IndicatorError("EMA span must be at least 1".to_string()));
        }
        Ok(Self {
            name: format!("EMA({})", span),
            span,
        })
    }

    pub fn alpha(&self) -> f64 {
        2.0 / (self.span as f64 + 1.0)
    }

    pub fn smooth(&self, values: impl IntoIterator<Item = f64>) -> Vec<f64> {
        let alpha = self.alpha();
        let decay = 1.0 - alpha;

        let mut results = Vec::new();
        let mut previous: Option<f64> = None;
        // Weight the carried value has accumulated since the last observation.
        let mut old_weight = 1.0;

        for x in values {
            if x.is_nan() {
                if previous.is_some() {
                    old_weight *= decay;
                }
                results.push(previous.unwrap_or(f64::NAN));
                continue;
            }
            let ema = match previous {
                None => x,
                Some(prev) => (old_weight * prev + alpha * x) / (old_weight + alpha),
            };
            old_weight = decay;
            previous = Some(ema);
            results.push(ema);
        }
        results
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "span": self.span, "adjust": false })
    }

    fn calculate(&self, data: &[Bar]) -> Vec<f64> {
        self.smooth(data.iter().map(|b| b.close))
    }
}
