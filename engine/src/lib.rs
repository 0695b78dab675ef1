// Engine library root: market data, indicators, the plot pipeline and chart rendering.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod render;
pub mod services;

pub use error::{EngineError, Result};
