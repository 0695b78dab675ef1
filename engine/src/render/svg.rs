// Draws a ChartFrame with plotters into an SVG document: candlesticks and EMA lines on the
// price axis, volume bars on a secondary axis along the bottom.
use super::{ChartStyle, Viewport};
use crate::error::{EngineError, Result};
use plotters::prelude::*;
use shared::models::ChartFrame;
use shared::utils::{format_price, format_volume, parse_hex_color};
use std::fmt::Display;

/// Volume axis is stretched this many times past the tallest bar, keeping volume in the
/// bottom quarter of the plot.
const VOLUME_HEADROOM: f64 = 4.0;

/// Label areas plus margins, subtracted before sizing candle bodies.
const PLOT_CHROME_PX: u32 = 150;

fn render_err<E: Display>(e: E) -> EngineError {
    EngineError::Render(e.to_string())
}

fn color(hex: &str, fallback: RGBColor) -> RGBColor {
    parse_hex_color(hex).map(|(r, g, b)| RGBColor(r, g, b)).unwrap_or(fallback)
}

pub struct ChartRenderer {
    style: ChartStyle,
    size: (u32, u32),
}

impl ChartRenderer {
    pub fn new(style: ChartStyle, size: (u32, u32)) -> Self {
        Self { style, size }
    }

    pub fn render(&self, frame: &ChartFrame, viewport: Viewport) -> Result<String> {
        let bars = frame.bars();
        let range = viewport.range(bars.len());
        if range.is_empty() {
            return Err(EngineError::Render(format!("no bars to draw for {}", frame.symbol())));
        }
        let visible = &bars[range.clone()];

        let background = color(&self.style.background, WHITE);
        let foreground = color(&self.style.foreground, BLACK);
        let grid = color(&self.style.grid, RGBColor(224, 224, 224));
        let bullish = color(&self.style.bullish, GREEN);
        let bearish = color(&self.style.bearish, RED);
        let volume_up = color(&self.style.volume_up, GREEN);
        let volume_down = color(&self.style.volume_down, RED);

        let mut low = visible.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let mut high = visible.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        for series in &frame.emas {
            for v in series.values.get(range.clone()).unwrap_or_default() {
                if v.is_finite() {
                    low = low.min(*v);
                    high = high.max(*v);
                }
            }
        }
        let pad = ((high - low) * 0.05).max(high.abs() * 1e-3).max(1e-6);
        let max_volume = visible.iter().map(|b| b.volume).fold(0.0, f64::max);

        let x_range = (range.start as f64 - 0.5)..(range.end as f64 - 0.5);
        let candle_width =
            ((self.size.0.saturating_sub(PLOT_CHROME_PX)) as f64 / visible.len() as f64 * 0.7).max(1.0) as u32;

        let date_label = |x: &f64| {
            let idx = x.round();
            if idx < 0.0 {
                return String::new();
            }
            bars.get(idx as usize)
                .map(|b| b.date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        let price_label = |y: &f64| format_price(*y);
        let volume_label = |v: &f64| format_volume(*v);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            root.fill(&background).map_err(render_err)?;

            let mut chart = ChartBuilder::on(&root)
                .margin(10)
                .caption(frame.symbol().as_str(), ("sans-serif", 20).into_font().color(&foreground))
                .x_label_area_size(30)
                .y_label_area_size(60)
                .right_y_label_area_size(60)
                .build_cartesian_2d(x_range.clone(), (low - pad)..(high + pad))
                .map_err(render_err)?
                .set_secondary_coord(x_range, 0.0..(max_volume * VOLUME_HEADROOM).max(1.0));

            chart
                .configure_mesh()
                .light_line_style(background)
                .bold_line_style(grid)
                .axis_style(foreground)
                .label_style(("sans-serif", 12).into_font().color(&foreground))
                .x_labels(8)
                .x_label_formatter(&date_label)
                .y_label_formatter(&price_label)
                .draw()
                .map_err(render_err)?;

            chart
                .configure_secondary_axes()
                .axis_style(foreground)
                .label_style(("sans-serif", 12).into_font().color(&foreground))
                .y_label_formatter(&volume_label)
                .draw()
                .map_err(render_err)?;

            chart
                .draw_secondary_series(visible.iter().enumerate().map(|(i, bar)| {
                    let x = (range.start + i) as f64;
                    let fill = if bar.is_bullish() { volume_up } else { volume_down };
                    Rectangle::new([(x - 0.4, 0.0), (x + 0.4, bar.volume)], fill.mix(0.6).filled())
                }))
                .map_err(render_err)?;

            chart
                .draw_series(visible.iter().enumerate().map(|(i, bar)| {
                    CandleStick::new(
                        (range.start + i) as f64,
                        bar.open,
                        bar.high,
                        bar.low,
                        bar.close,
                        bullish.filled(),
                        bearish.filled(),
                        candle_width,
                    )
                }))
                .map_err(render_err)?;

            for series in &frame.emas {
                let line_color = color(&series.color, foreground);
                let points = range
                    .clone()
                    .filter_map(|i| series.values.get(i).map(|v| (i as f64, *v)))
                    .filter(|(_, v)| v.is_finite());
                chart
                    .draw_series(LineSeries::new(points, line_color.stroke_width(series.line_width)))
                    .map_err(render_err)?
                    .label(series.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2)));
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(background.mix(0.8))
                .border_style(foreground)
                .label_font(("sans-serif", 13).into_font().color(&foreground))
                .draw()
                .map_err(render_err)?;

            root.present().map_err(render_err)?;
        }
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use shared::models::{Bar, IndicatorSeries, PriceHistory, Symbol};
    use std::sync::Arc;

    fn frame(n: usize) -> ChartFrame {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars: Vec<Bar> = (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64).sin() * 5.0;
                Bar {
                    date: start + Days::new(i as u64),
                    open: close - 1.0,
                    high: close + 2.0,
                    low: close - 2.0,
                    close: if i % 2 == 0 { close } else { close - 2.0 },
                    volume: 1_000_000.0 + i as f64 * 1000.0,
                }
            })
            .collect();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let history = Arc::new(PriceHistory::new(Symbol::parse("SPY").unwrap(), bars));
        ChartFrame {
            history,
            emas: vec![
                IndicatorSeries { label: "EMA-10".to_string(), color: "#00FFFF".to_string(), line_width: 2, values: closes.clone() },
                IndicatorSeries { label: "EMA-50".to_string(), color: "#FF0000".to_string(), line_width: 2, values: closes },
            ],
        }
    }

    #[test]
    fn test_render_produces_svg_with_legend() {
        let renderer = ChartRenderer::new(ChartStyle::default(), (1200, 700));
        let svg = renderer.render(&frame(150), Viewport::new(100)).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("EMA-10"));
        assert!(svg.contains("EMA-50"));
        assert!(svg.contains("SPY"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_window_larger_than_series() {
        let renderer = ChartRenderer::new(ChartStyle::default(), (800, 400));
        assert!(renderer.render(&frame(25), Viewport::new(100)).is_ok());
    }

    #[test]
    fn test_render_empty_frame_is_error() {
        let renderer = ChartRenderer::new(ChartStyle::default(), (800, 400));
        let err = renderer.render(&frame(0), Viewport::new(100)).unwrap_err();
        assert!(matches!(err, EngineError::Render(_)));
    }

    #[test]
    fn test_bad_colors_fall_back() {
        let style = ChartStyle { bullish: "not-a-color".to_string(), ..ChartStyle::default() };
        let renderer = ChartRenderer::new(style, (800, 400));
        assert!(renderer.render(&frame(30), Viewport::new(30)).is_ok());
    }
}
