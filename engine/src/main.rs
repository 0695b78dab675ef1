// Headless entry point: runs the plot pipeline for one symbol and writes the chart as SVG.
use anyhow::{bail, Context};
use clap::Parser;
use engine::config::EngineSettings;
use engine::render::{ChartRenderer, ChartStyle, Viewport};
use engine::services::{ChartService, PlotOutcome, SkipReason};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chart-snapshot")]
#[command(about = "Render a candlestick chart with EMA overlays to an SVG file", long_about = None)]
struct Cli {
    /// Ticker symbol, e.g. SPY or BTC-USD
    symbol: String,

    /// Output file; defaults to <SYMBOL>.svg
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Number of most recent bars to show
    #[arg(short, long, default_value_t = 100)]
    bars: usize,

    #[arg(long, default_value_t = 1600)]
    width: u32,

    #[arg(long, default_value_t = 900)]
    height: u32,

    /// JSON file with engine settings (same shape as the GUI's `engine` section)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading engine settings from {}", path.display()))?;
            EngineSettings::from_json_str(&json)?
        }
        None => EngineSettings::default(),
    };

    let service = ChartService::from_settings(&settings)?;
    let frame = match service.plot(&cli.symbol).await {
        PlotOutcome::Ready(frame) => frame,
        PlotOutcome::Skipped(SkipReason::BlankSymbol) => bail!("no symbol given"),
        PlotOutcome::Skipped(SkipReason::TooShort { symbol, bars, required }) => {
            bail!("{} has only {} bars (need {}); symbol probably does not exist", symbol, bars, required)
        }
        PlotOutcome::Skipped(SkipReason::Unavailable { symbol, error }) => {
            bail!("could not load history for {}: {}", symbol, error)
        }
    };

    let renderer = ChartRenderer::new(ChartStyle::default(), (cli.width, cli.height));
    let svg = renderer.render(&frame, Viewport::new(cli.bars))?;

    let out = cli.out.unwrap_or_else(|| PathBuf::from(format!("{}.svg", frame.symbol())));
    tokio::fs::write(&out, svg)
        .await
        .with_context(|| format!("writing {}", out.display()))?;

    match service.display_name(frame.symbol()).await {
        Ok(name) => info!(symbol = %frame.symbol(), %name, path = %out.display(), "Chart written"),
        Err(e) => info!(symbol = %frame.symbol(), error = %e, path = %out.display(), "Chart written (name unavailable)"),
    }
    Ok(())
}
