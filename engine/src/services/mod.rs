// Services: the plot refresh pipeline and request supersession.
pub mod chart_service;
pub mod request_tracker;

pub use chart_service::{ChartService, PlotOutcome, SkipReason};
pub use request_tracker::{RequestTicket, RequestTracker};
