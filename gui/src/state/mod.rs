// Application state shared through the Dioxus context.
pub mod app_state;
