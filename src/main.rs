use clap::Parser;
use std::path::PathBuf;

use candlescan::chart::SvgChart;
use candlescan::data::{cache_path, save_to_csv, BinanceSpot, CsvSource, MarketData};
use candlescan::pipeline::{run_scan, ScanConfig};

#[derive(Parser)]
#[command(
    name = "candlescan",
    about = "Finds historical candle windows that echo the most recent price action"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Scan history for windows similar to the latest one and chart them
    Scan(ScanArgs),
    /// Fetch candles and cache them to CSV for offline scans
    Fetch(FetchArgs),
}

#[derive(Parser)]
struct ScanArgs {
    #[arg(short, long, default_value = "BTCUSDT")]
    symbol: String,
    #[arg(short, long, default_value = "1h")]
    interval: String,
    #[arg(short, long, default_value = "200")]
    limit: u32,
    #[arg(short, long, default_value = "50")]
    window: usize,
    #[arg(short, long, default_value = "3")]
    top: usize,
    /// Scan a cached CSV file instead of querying Binance
    #[arg(long)]
    data: Option<PathBuf>,
    /// Directory the SVG charts are written to
    #[arg(long, default_value = "charts")]
    out_dir: PathBuf,
}

#[derive(Parser)]
struct FetchArgs {
    #[arg(short, long, default_value = "BTCUSDT")]
    symbol: String,
    #[arg(short, long, default_value = "1h")]
    interval: String,
    #[arg(short, long, default_value = "200")]
    limit: u32,
    #[arg(long, default_value = "data")]
    data_dir: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Bare invocation runs a scan with all defaults.
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Scan(ScanArgs::parse_from(["scan"])));

    match command {
        Commands::Scan(args) => run_scan_cmd(args).await?,
        Commands::Fetch(args) => run_fetch(args).await?,
    }

    Ok(())
}

async fn run_scan_cmd(args: ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ScanConfig {
        symbol: args.symbol,
        interval: args.interval,
        limit: args.limit,
        window: args.window,
        top: args.top,
    };
    let renderer = SvgChart::new(&args.out_dir);

    let outcome = match &args.data {
        Some(path) => run_scan(&CsvSource::new(path), &renderer, &cfg).await?,
        None => run_scan(&BinanceSpot::new(), &renderer, &cfg).await?,
    };

    if outcome.matches.is_empty() {
        println!(
            "No comparable windows: got {} candles, need more than {}",
            outcome.candle_count,
            cfg.window + 1
        );
    } else {
        println!("Charts written to {}", args.out_dir.display());
    }

    Ok(())
}

async fn run_fetch(args: FetchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let candles = BinanceSpot::new()
        .recent_candles(&args.symbol, &args.interval, args.limit)
        .await?;

    std::fs::create_dir_all(&args.data_dir)?;
    let path = cache_path(&args.symbol, &args.interval, &args.data_dir);
    save_to_csv(&candles, &path)?;

    println!(
        "Fetched and cached {} candles for {} at {}",
        candles.len(),
        args.symbol,
        path
    );
    Ok(())
}
