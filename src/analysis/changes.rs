use crate::domain::{Candle, ChangePoint};

/// Percent change between each pair of consecutive closes.
/// Output element i covers candles i and i+1 and carries the later bar's
/// timestamp, so the result is one element shorter than the input. Inputs of
/// length 0 or 1 produce an empty series.
pub fn percent_changes(candles: &[Candle]) -> Vec<ChangePoint> {
    candles
        .windows(2)
        .map(|pair| ChangePoint {
            open_time: pair[1].open_time,
            pct: (pair[1].close - pair[0].close) / pair[0].close * 100.0,
        })
        .collect()
}
