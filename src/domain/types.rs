use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candle from Binance spot klines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: i64,
    pub quote_volume: f64,
    pub trades: u64,
}

impl Candle {
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.open_time).unwrap_or_default()
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Percent change between two consecutive closes.
/// `open_time` is the timestamp of the later bar of the pair, so a change
/// series aligns with its source candles shifted by one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangePoint {
    pub open_time: i64,
    pub pct: f64,
}

/// One scored historical window.
/// `offset` is the 0-based start of the window in the change series; user
/// output reports it 1-based.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityMatch {
    pub offset: usize,
    pub similarity_pct: f64,
}

impl std::fmt::Display for SimilarityMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Window {}: Similarity: {:.2}%",
            self.offset + 1,
            self.similarity_pct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, close: f64) -> Candle {
        Candle {
            open_time: 0,
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
            volume: 1000.0,
            close_time: 0,
            quote_volume: 0.0,
            trades: 0,
        }
    }

    #[test]
    fn test_candle_bullish() {
        assert!(candle(100.0, 105.0).is_bullish());
        assert!(!candle(105.0, 95.0).is_bullish());
    }

    #[test]
    fn test_candle_datetime() {
        let mut c = candle(100.0, 101.0);
        c.open_time = 1_700_000_000_000;
        assert!(c.datetime().timestamp() > 0);
    }

    #[test]
    fn test_candle_datetime_zero() {
        let c = candle(100.0, 101.0);
        assert_eq!(c.datetime().timestamp(), 0);
    }

    #[test]
    fn test_match_display_one_based_two_decimals() {
        let m = SimilarityMatch {
            offset: 4,
            similarity_pct: 93.4567,
        };
        assert_eq!(format!("{}", m), "Window 5: Similarity: 93.46%");
    }

    #[test]
    fn test_match_display_full_similarity() {
        let m = SimilarityMatch {
            offset: 0,
            similarity_pct: 100.0,
        };
        assert_eq!(format!("{}", m), "Window 1: Similarity: 100.00%");
    }
}
