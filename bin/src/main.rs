//! Faro CLI binary.
//!
//! Provides command-line interface for fetching quarterly fundamentals,
//! deriving return metrics and correlating them.

mod cmd;
mod data;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use faro_quickfs::DEFAULT_PERIOD;
use logging::LogFormat;
use std::{path::PathBuf, process};

#[derive(Parser)]
#[command(name = "faro")]
#[command(about = "Forward-return and fundamental-ratio analytics for equities", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch raw quarterly data from QuickFS
    Fetch {
        /// Ticker list file ({"tickers": [...]})
        #[arg(short, long, default_value = "tickers.json")]
        tickers: PathBuf,

        /// Output JSONL file
        #[arg(short, long, default_value = "data.jsonl")]
        output: PathBuf,

        /// QuickFS period expression
        #[arg(long, default_value = DEFAULT_PERIOD)]
        period: String,

        /// Symbols per batch request
        #[arg(long, default_value = "100")]
        batch_size: usize,

        /// Batch requests in flight
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Derivation config whose inputs should be fetched
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Derive per-quarter metrics from raw data
    Metrics {
        /// Raw JSONL input
        #[arg(short, long, default_value = "data.jsonl")]
        input: PathBuf,

        /// Metrics JSON output
        #[arg(short, long, default_value = "metrics.json")]
        output: PathBuf,

        /// Derivation config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Correlate a feature with a forward-return horizon
    Correlate {
        /// Metrics JSON input
        #[arg(short, long, default_value = "metrics.json")]
        input: PathBuf,

        /// Feature metric
        #[arg(short, long, default_value = "roa")]
        feature: String,

        /// Target metric
        #[arg(short, long, default_value = "forward_return")]
        target: String,

        /// Include fractional rank arrays
        #[arg(long)]
        ranks: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also write the report to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show one company's derived quarters
    Show {
        /// Metrics JSON input
        #[arg(short, long, default_value = "metrics.json")]
        input: PathBuf,

        /// Ticker symbol
        #[arg(short, long)]
        symbol: String,

        /// Forward-return horizon column
        #[arg(short = 'H', long, default_value = "forward_return")]
        horizon: String,

        /// Only quarters ending on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Fetch {
            tickers,
            output,
            period,
            batch_size,
            concurrency,
            config,
        } => {
            let args = cmd::fetch::FetchArgs {
                period,
                batch_size,
                concurrency,
            };
            cmd::fetch::fetch_data(&tickers, &output, config.as_deref(), args).await?;
        }
        Commands::Metrics { input, output, config } => {
            cmd::metrics::calculate_metrics(&input, &output, config.as_deref())?;
        }
        Commands::Correlate {
            input,
            feature,
            target,
            ranks,
            json,
            output,
        } => {
            let args = cmd::correlate::CorrelateArgs {
                feature,
                target,
                ranks,
                json,
            };
            cmd::correlate::correlate_metrics(&input, output.as_deref(), args)?;
        }
        Commands::Show {
            input,
            symbol,
            horizon,
            since,
        } => {
            cmd::show::show_company(&input, &symbol, &horizon, since.as_deref())?;
        }
    }

    Ok(())
}
