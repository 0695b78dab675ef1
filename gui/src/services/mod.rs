// GUI-side services
pub mod chart_client;
