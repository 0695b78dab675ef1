// Global application state for the GUI.
// Each field is its own signal so the chart only re-renders when the frame or the
// viewport changes, not when the name label does.

use dioxus::prelude::*;
use engine::render::Viewport;
use shared::models::ChartFrame;

pub const LOADING_NAME: &str = "Loading symbol name...";

#[derive(Clone, Copy)]
pub struct AppState {
    /// What the chart currently shows; `None` until the first successful plot.
    pub frame: Signal<Option<ChartFrame>>,
    pub viewport: Signal<Viewport>,
    /// Text next to the symbol box: the instrument's display name.
    pub name_label: Signal<String>,
    /// Background name lookup for the current symbol, cancelled when superseded.
    pub name_task: Signal<Option<Task>>,
    init_zoom_periods: usize,
}

impl AppState {
    // Must be called inside a component (signals need an owning scope).
    pub fn new(init_zoom_periods: usize) -> Self {
        Self {
            frame: Signal::new(None),
            viewport: Signal::new(Viewport::new(init_zoom_periods)),
            name_label: Signal::new(String::new()),
            name_task: Signal::new(None),
            init_zoom_periods,
        }
    }

    /// Replaces the chart contents and resets the zoom to the initial window.
    pub fn show_frame(&mut self, frame: ChartFrame) {
        self.frame.set(Some(frame));
        self.viewport.set(Viewport::new(self.init_zoom_periods));
    }

    pub fn set_name_label(&mut self, label: impl Into<String>) {
        self.name_label.set(label.into());
    }

    /// Zooms the visible window; a no-op while nothing is plotted.
    pub fn zoom(&mut self, steps: i32, min_visible_bars: usize) {
        let total = self.frame.peek().as_ref().map(|f| f.bars().len()).unwrap_or(0);
        if total == 0 || steps == 0 {
            return;
        }
        let next = self.viewport.peek().zoomed(steps, min_visible_bars, total);
        self.viewport.set(next);
    }

    /// Stores the new lookup task and cancels the one it supersedes.
    pub fn replace_name_task(&mut self, task: Task) {
        if let Some(previous) = self.name_task.write().replace(task) {
            previous.cancel();
        }
    }
}
