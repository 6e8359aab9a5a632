use crate::domain::Candle;
use serde_json::Value;
use tracing::debug;

const BINANCE_SPOT_URL: &str = "https://api.binance.com/api/v3/klines";

/// Source of recent candle data, injected into the pipeline so scans can run
/// against the live exchange, a CSV replay, or synthetic data in tests.
pub trait MarketData {
    fn recent_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Candle>, Box<dyn std::error::Error>>>;
}

/// Live Binance spot client (no API key needed)
pub struct BinanceSpot {
    client: reqwest::Client,
}

impl BinanceSpot {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for BinanceSpot {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketData for BinanceSpot {
    /// Fetch the most recent `limit` klines, oldest first.
    async fn recent_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error>> {
        debug!(symbol, interval, limit, "requesting klines");

        let resp = self
            .client
            .get(BINANCE_SPOT_URL)
            .query(&[
                ("symbol", symbol),
                ("interval", interval),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Binance API error {}: {}", status, body).into());
        }

        let rows: Vec<Vec<Value>> = resp.json().await?;

        let mut candles: Vec<Candle> = rows.iter().filter_map(|row| parse_kline(row)).collect();

        // Ensure temporal ordering
        candles.sort_by_key(|c| c.open_time);

        Ok(candles)
    }
}

/// Decode one kline row from the Binance array-of-arrays format.
/// Rows with fewer than 7 fields are malformed and yield None.
pub fn parse_kline(row: &[Value]) -> Option<Candle> {
    if row.len() < 7 {
        return None;
    }

    Some(Candle {
        open_time: row[0].as_i64().unwrap_or(0),
        open: row[1].as_str().unwrap_or("0").parse().unwrap_or(0.0),
        high: row[2].as_str().unwrap_or("0").parse().unwrap_or(0.0),
        low: row[3].as_str().unwrap_or("0").parse().unwrap_or(0.0),
        close: row[4].as_str().unwrap_or("0").parse().unwrap_or(0.0),
        volume: row[5].as_str().unwrap_or("0").parse().unwrap_or(0.0),
        close_time: row[6].as_i64().unwrap_or(0),
        quote_volume: row
            .get(7)
            .and_then(|v| v.as_str())
            .unwrap_or("0")
            .parse()
            .unwrap_or(0.0),
        trades: row.get(8).and_then(|v| v.as_u64()).unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_kline_full_row() {
        let row = vec![
            json!(1700000000000_i64),
            json!("42567.89"),
            json!("42890.12"),
            json!("42100.45"),
            json!("42750.33"),
            json!("12345.678"),
            json!(1700003599999_i64),
            json!("987654.321"),
            json!(54321),
            json!("6000.0"),
            json!("480000.0"),
            json!("0"),
        ];

        let c = parse_kline(&row).unwrap();
        assert_eq!(c.open_time, 1700000000000);
        assert!((c.open - 42567.89).abs() < 1e-10);
        assert!((c.high - 42890.12).abs() < 1e-10);
        assert!((c.low - 42100.45).abs() < 1e-10);
        assert!((c.close - 42750.33).abs() < 1e-10);
        assert!((c.volume - 12345.678).abs() < 1e-10);
        assert_eq!(c.close_time, 1700003599999);
        assert!((c.quote_volume - 987654.321).abs() < 1e-10);
        assert_eq!(c.trades, 54321);
    }

    #[test]
    fn test_parse_kline_short_row() {
        let row = vec![json!(1700000000000_i64), json!("100.0")];
        assert!(parse_kline(&row).is_none());
    }

    #[test]
    fn test_parse_kline_minimal_row() {
        // 7 fields is the shortest usable row; trailing fields default.
        let row = vec![
            json!(1000_i64),
            json!("1.0"),
            json!("2.0"),
            json!("0.5"),
            json!("1.5"),
            json!("10.0"),
            json!(1999_i64),
        ];
        let c = parse_kline(&row).unwrap();
        assert!((c.close - 1.5).abs() < 1e-10);
        assert_eq!(c.quote_volume, 0.0);
        assert_eq!(c.trades, 0);
    }

    #[test]
    fn test_parse_kline_bad_number_defaults_zero() {
        let row = vec![
            json!(1000_i64),
            json!("not-a-number"),
            json!("2.0"),
            json!("0.5"),
            json!("1.5"),
            json!("10.0"),
            json!(1999_i64),
        ];
        let c = parse_kline(&row).unwrap();
        assert_eq!(c.open, 0.0);
    }
}
