//! quantpair CLI - live tick capture and pairs-trading analytics.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use quantpair_lib::Timeframe;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "quantpair")]
#[command(about = "Live tick capture and pairs-trading analytics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Tick database path
    #[arg(long, env = "QUANTPAIR_DB", global = true)]
    db: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream live trades into the tick store until Ctrl-C
    Stream {
        /// Comma-separated symbols
        #[arg(short, long, value_delimiter = ',', default_value = "btcusdt,ethusdt")]
        symbols: Vec<String>,

        /// Delete ticks older than this many hours while streaming
        #[arg(long)]
        retention_hours: Option<u64>,

        /// Seconds between status log lines
        #[arg(long, default_value = "30")]
        status_interval: u64,

        /// Feed WebSocket base URL
        #[arg(long, default_value = quantpair_lib::BinanceTradeFeed::DEFAULT_BASE_URL)]
        feed_url: String,
    },

    /// Show stored tick counts per symbol
    Ticks,

    /// Resample stored ticks into OHLC bars and export them
    Bars {
        /// Comma-separated symbols
        #[arg(short, long, value_delimiter = ',', default_value = "btcusdt,ethusdt")]
        symbols: Vec<String>,

        /// Bar timeframe (1s, 1m, 5m)
        #[arg(short, long, default_value = "1m")]
        timeframe: Timeframe,

        /// Output file path ("-" for stdout). Defaults to price_bars_<timeframe>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Hedge ratio, spread z-score and correlation for the first two symbols
    Analyze {
        /// Comma-separated symbols; the first two form the pair
        #[arg(short, long, value_delimiter = ',', default_value = "btcusdt,ethusdt")]
        symbols: Vec<String>,

        /// Bar timeframe for the correlation (1s, 1m, 5m)
        #[arg(short, long, default_value = "1m")]
        timeframe: Timeframe,

        /// Rolling window length
        #[arg(short, long, default_value_t = quantpair_lib::AnalyticsParams::DEFAULT_WINDOW)]
        window: usize,

        /// Z-score alert threshold
        #[arg(short, long, default_value_t = quantpair_lib::AnalyticsParams::DEFAULT_Z_THRESHOLD)]
        z_threshold: f64,

        /// Also run the ADF stationarity test on the spread
        #[arg(long)]
        adf: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete stored ticks older than the given age
    Prune {
        /// Age in hours
        #[arg(long)]
        older_than_hours: u64,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = if quiet {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let db = display::db_path(cli.db);
    match command {
        Commands::Stream {
            symbols,
            retention_hours,
            status_interval,
            feed_url,
        } => {
            commands::stream::stream(
                &db,
                symbols,
                retention_hours,
                status_interval,
                &feed_url,
                cli.quiet,
            )
            .await
        }
        Commands::Ticks => commands::ticks::show_ticks(&db).await,
        Commands::Bars {
            symbols,
            timeframe,
            output,
            format,
        } => commands::bars::export_bars(&db, &symbols, timeframe, output, format, cli.quiet).await,
        Commands::Analyze {
            symbols,
            timeframe,
            window,
            z_threshold,
            adf,
            json,
        } => {
            commands::analyze::analyze(&db, &symbols, timeframe, window, z_threshold, adf, json)
                .await
        }
        Commands::Prune { older_than_hours } => {
            commands::prune::prune(&db, older_than_hours, cli.quiet).await
        }
    }
}
