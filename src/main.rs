//! Command-line analysis of one symbol.
//!
//! Logs go to stderr so `--json` output on stdout stays machine readable.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use dotenvy::dotenv;
use tracing::error;

use stockscope::analysis::{AnalysisPipeline, AnalysisReport, ForecastStage};
use stockscope::config::{default_start_date, AnalysisSettings, FetchConfig, DEFAULT_SYMBOL};
use stockscope::logging::{self, LogOutput};
use stockscope::services::yahoo::YahooMarketDataProvider;

#[derive(Debug, Parser)]
#[command(
    name = "stockscope",
    version,
    about = "Fetch daily prices, compute MA/RSI and forecast the next closes"
)]
struct Cli {
    /// Ticker symbol, e.g. BBCA.JK or AAPL.
    #[arg(default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// First day of the range (YYYY-MM-DD). Defaults to 2022-01-01.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Day after the last one fetched (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Print the full report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    logging::init_logging("warn", LogOutput::Stderr);

    let cli = Cli::parse();
    let start = cli.start.unwrap_or_else(default_start_date);
    let end = cli.end.unwrap_or_else(|| Utc::now().date_naive());

    let provider = match YahooMarketDataProvider::new(&FetchConfig::from_env()) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!(error = %e, "Failed to build market data client");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let pipeline = AnalysisPipeline::new(provider, &AnalysisSettings::from_env());

    match pipeline.run(&cli.symbol, start, end).await {
        Ok(report) if cli.json => match serde_json::to_string_pretty(&report) {
            Ok(body) => {
                println!("{}", body);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: failed to serialize report: {}", e);
                ExitCode::FAILURE
            }
        },
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_warning() => {
            println!("Warning: {}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &AnalysisReport) {
    let context = &report.context;
    println!(
        "Data for {} fetched successfully ({} trading days, {} to {}).",
        context.symbol, report.record_count, context.start, context.end
    );

    println!();
    println!("Latest data:");
    println!(
        "{:<12} {:>12} {:>12} {:>12} {:>12} {:>16}",
        "date", "open", "high", "low", "close", "volume"
    );
    for row in &report.preview {
        println!(
            "{:<12} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>16.0}",
            row.date, row.open, row.high, row.low, row.close, row.volume
        );
    }

    if let Some(latest) = &report.latest {
        println!();
        println!("Indicators on {}:", latest.date);
        println!("  {:<8} {:.2}", "close", latest.close);
        for (label, value) in &latest.averages {
            println!("  {:<8} {}", label, format_optional(*value));
        }
        println!("  {:<8} {}", "rsi", format_optional(latest.rsi));
    }

    println!();
    match &report.forecast {
        ForecastStage::Ready { series, .. } => {
            println!("ARIMA{} forecast:", series.order);
            for point in &series.points {
                println!("  {}  {:.2}", point.date, point.close);
            }
        }
        ForecastStage::Failed { message } => {
            println!("Forecast unavailable: {}", message);
        }
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}
