use crate::data::fetcher::MarketData;
use crate::domain::Candle;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Save candles to CSV cache
pub fn save_to_csv(candles: &[Candle], path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "open_time",
        "open",
        "high",
        "low",
        "close",
        "volume",
        "close_time",
        "quote_volume",
        "trades",
    ])?;

    for c in candles {
        writer.write_record(&[
            c.open_time.to_string(),
            c.open.to_string(),
            c.high.to_string(),
            c.low.to_string(),
            c.close.to_string(),
            c.volume.to_string(),
            c.close_time.to_string(),
            c.quote_volume.to_string(),
            c.trades.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Load candles from CSV cache
pub fn load_from_csv(path: &Path) -> Result<Vec<Candle>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("Cache file not found: {}", path.display()).into());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut candles = Vec::new();

    for result in reader.records() {
        let record = result?;
        let candle = Candle {
            open_time: record[0].parse()?,
            open: record[1].parse()?,
            high: record[2].parse()?,
            low: record[3].parse()?,
            close: record[4].parse()?,
            volume: record[5].parse()?,
            close_time: record[6].parse()?,
            quote_volume: record[7].parse()?,
            trades: record[8].parse()?,
        };
        candles.push(candle);
    }

    // Verify temporal ordering
    for i in 1..candles.len() {
        if candles[i].open_time < candles[i - 1].open_time {
            return Err("Cache file has non-monotonic timestamps".into());
        }
    }

    Ok(candles)
}

/// Cache path for a symbol and interval
pub fn cache_path(symbol: &str, interval: &str, data_dir: &str) -> String {
    format!("{}/{}_{}.csv", data_dir, symbol.to_lowercase(), interval)
}

/// Offline candle source backed by a CSV file written by `save_to_csv`.
/// Ignores the requested symbol and interval (the file already fixes them)
/// and serves the most recent `limit` bars.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MarketData for CsvSource {
    async fn recent_candles(
        &self,
        _symbol: &str,
        _interval: &str,
        limit: u32,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error>> {
        let candles = load_from_csv(&self.path)?;
        debug!(path = %self.path.display(), total = candles.len(), "loaded cached candles");

        let skip = candles.len().saturating_sub(limit as usize);
        Ok(candles[skip..].to_vec())
    }
}
