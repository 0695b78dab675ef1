// GUI main entry point using Dioxus
#![allow(non_snake_case)] // Common for Dioxus components

use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};

mod app;
mod components;
mod config;
mod services;
mod state;

use app::App;
use config::AppConfig;
use services::chart_client::ChartClient;

fn main() {
    // Verbosity follows RUST_LOG.
    tracing_subscriber::fmt::init();

    let app_config = match AppConfig::load() {
        Ok(cfg) => {
            tracing::info!(version = %cfg.version, provider = ?cfg.engine.provider, "Loaded configuration");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let client = match ChartClient::from_settings(&app_config.engine) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to start chart engine: {}", e);
            std::process::exit(1);
        }
    };

    let window = WindowBuilder::new()
        .with_title(app_config.app.title.clone())
        .with_maximized(app_config.app.maximized)
        .with_inner_size(LogicalSize::new(app_config.app.width, app_config.app.height));

    tracing::info!(title = %app_config.app.title, "Starting ticker chart (Dioxus Desktop)");
    LaunchBuilder::desktop()
        .with_cfg(DesktopConfig::new().with_window(window))
        .with_context(app_config)
        .with_context(client)
        .launch(App);
}
