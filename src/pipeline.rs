use crate::analysis::{percent_changes, rank_windows, sliding_windows, tail_window};
use crate::chart::ChartRenderer;
use crate::data::MarketData;
use crate::domain::SimilarityMatch;

/// Parameters for one scan run. The defaults reproduce the standard scan:
/// 200 hourly BTCUSDT bars, 50-candle windows, top 3 matches.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub symbol: String,
    pub interval: String,
    pub limit: u32,
    pub window: usize,
    pub top: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            interval: "1h".to_string(),
            limit: 200,
            window: 50,
            top: 3,
        }
    }
}

/// What a scan produced, for callers that want more than stdout.
#[derive(Debug)]
pub struct ScanOutcome {
    pub candle_count: usize,
    pub matches: Vec<SimilarityMatch>,
}

/// The whole analysis pass: fetch, difference, window, rank, report, draw.
/// Straight-line and fail-fast; any fetch or render error aborts the run.
pub async fn run_scan<S: MarketData, R: ChartRenderer>(
    source: &S,
    renderer: &R,
    cfg: &ScanConfig,
) -> Result<ScanOutcome, Box<dyn std::error::Error>> {
    let candles = source
        .recent_candles(&cfg.symbol, &cfg.interval, cfg.limit)
        .await?;
    println!(
        "Fetched {} candles for {} {}",
        candles.len(),
        cfg.symbol,
        cfg.interval
    );

    let changes = percent_changes(&candles);

    // The first candle has no change value, so candles[1..] pairs one-to-one
    // with the change series and change offset i maps to that slice directly.
    let aligned = if candles.is_empty() {
        &candles[..]
    } else {
        &candles[1..]
    };

    let windows = sliding_windows(&changes, cfg.window);
    let query = tail_window(&changes, cfg.window);

    let matches = rank_windows(query, &windows, cfg.top);
    for m in &matches {
        println!("{}", m);
    }

    renderer.render(tail_window(aligned, cfg.window), "Recent Candles")?;

    for (rank, m) in matches.iter().enumerate() {
        let candle_window = &aligned[m.offset..m.offset + cfg.window];
        renderer.render(candle_window, &format!("Similar Pattern {}", rank + 1))?;
    }

    Ok(ScanOutcome {
        candle_count: candles.len(),
        matches,
    })
}
