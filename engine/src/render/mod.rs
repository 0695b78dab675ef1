// Chart rendering: which bars are visible, how they are colored, and the SVG renderer.
pub mod svg;

pub use svg::ChartRenderer;

use serde::Deserialize;
use std::ops::Range;

/// The visible window, counted back from the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub visible_bars: usize,
}

/// Each wheel notch scales the window by this factor.
const ZOOM_STEP: f64 = 1.2;

impl Viewport {
    pub fn new(visible_bars: usize) -> Self {
        Self { visible_bars: visible_bars.max(1) }
    }

    /// Index range into a series of `total` bars; empty only when `total` is zero.
    pub fn range(&self, total: usize) -> Range<usize> {
        let shown = self.visible_bars.clamp(1, total.max(1)).min(total);
        (total - shown)..total
    }

    /// Positive `steps` zoom out (more bars), negative zoom in.
    pub fn zoomed(&self, steps: i32, min_bars: usize, total: usize) -> Self {
        // Scale what is on screen, not a window wider than the series.
        let current = self.visible_bars.min(total.max(1));
        let scaled = current as f64 * ZOOM_STEP.powi(steps);
        let upper = total.max(min_bars).max(1);
        let visible = (scaled.round() as usize).clamp(min_bars.max(1), upper);
        // Always move at least one bar so small windows still respond.
        let visible = match (steps.signum(), visible == current) {
            (1, true) => (visible + 1).min(upper),
            (-1, true) => visible.saturating_sub(1).max(min_bars.max(1)),
            _ => visible,
        };
        Self::new(visible)
    }
}

/// Hex colors for the chart surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartStyle {
    pub background: String,
    pub foreground: String,
    pub grid: String,
    pub bullish: String,
    pub bearish: String,
    pub volume_up: String,
    pub volume_down: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            foreground: "#000000".to_string(),
            grid: "#E0E0E0".to_string(),
            bullish: "#26A69A".to_string(),
            bearish: "#EF5350".to_string(),
            volume_up: "#7FBFB8".to_string(),
            volume_down: "#F2A09E".to_string(),
        }
    }
}
