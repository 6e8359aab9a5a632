use crate::domain::Candle;
use plotters::prelude::*;
use std::path::PathBuf;
use tracing::debug;

/// Renders a candle window under a title. The pipeline only talks to this
/// trait, so tests substitute a recording renderer and never touch a drawing
/// backend.
pub trait ChartRenderer {
    fn render(&self, candles: &[Candle], title: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// Candlestick chart writer producing one SVG file per call, named after the
/// title, green for up candles and red for down.
pub struct SvgChart {
    out_dir: PathBuf,
}

impl SvgChart {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    fn chart_path(&self, title: &str) -> PathBuf {
        self.out_dir.join(format!("{}.svg", slug(title)))
    }
}

impl ChartRenderer for SvgChart {
    fn render(&self, candles: &[Candle], title: &str) -> Result<(), Box<dyn std::error::Error>> {
        if candles.is_empty() {
            debug!(title, "nothing to draw for empty window");
            return Ok(());
        }

        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.chart_path(title);

        let y_min = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let y_max = candles
            .iter()
            .map(|c| c.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let pad = ((y_max - y_min) * 0.05).max(y_max.abs() * 1e-4).max(1e-9);

        let root = SVGBackend::new(&path, (1280, 720)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d(-1..candles.len() as i32, (y_min - pad)..(y_max + pad))?;

        chart
            .configure_mesh()
            .light_line_style(&plotters::style::TRANSPARENT)
            .x_label_formatter(&|idx| {
                candles
                    .get(*idx as usize)
                    .map(|c| c.datetime().format("%m-%d %H:%M").to_string())
                    .unwrap_or_default()
            })
            .y_desc("Price")
            .draw()?;

        chart.draw_series(candles.iter().enumerate().map(|(i, c)| {
            CandleStick::new(
                i as i32,
                c.open,
                c.high,
                c.low,
                c.close,
                GREEN.filled(),
                RED.filled(),
                8,
            )
        }))?;

        root.present()?;
        debug!(path = %path.display(), candles = candles.len(), "wrote chart");
        Ok(())
    }
}

fn slug(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open_time: i64, open: f64, close: f64) -> Candle {
        Candle {
            open_time,
            open,
            high: open.max(close) + 2.0,
            low: open.min(close) - 2.0,
            close,
            volume: 100.0,
            close_time: open_time + 999,
            quote_volume: 0.0,
            trades: 0,
        }
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Recent Candles"), "recent_candles");
        assert_eq!(slug("Similar Pattern 2"), "similar_pattern_2");
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SvgChart::new(dir.path());
        let candles: Vec<Candle> = (0..20)
            .map(|i| {
                candle(
                    1_700_000_000_000 + i * 3_600_000,
                    100.0 + i as f64,
                    101.0 + i as f64,
                )
            })
            .collect();

        renderer.render(&candles, "Recent Candles").unwrap();

        let path = dir.path().join("recent_candles.svg");
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_empty_window_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SvgChart::new(dir.path());

        renderer.render(&[], "Recent Candles").unwrap();

        assert!(!dir.path().join("recent_candles.svg").exists());
    }

    #[test]
    fn test_render_single_candle() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SvgChart::new(dir.path());
        let candles = vec![candle(1_700_000_000_000, 100.0, 100.0)];

        renderer.render(&candles, "Similar Pattern 1").unwrap();
        assert!(dir.path().join("similar_pattern_1.svg").exists());
    }

    #[test]
    fn test_render_creates_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("charts").join("run");
        let renderer = SvgChart::new(&nested);
        let candles = vec![candle(0, 100.0, 101.0), candle(3_600_000, 101.0, 99.0)];

        renderer.render(&candles, "Recent Candles").unwrap();
        assert!(nested.join("recent_candles.svg").exists());
    }
}
