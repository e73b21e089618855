//! EquityLens CLI: summarize, chart, fetch, and export backtest results.
//!
//! Commands:
//! - `summary`: headline statistics for a result file
//! - `chart`: chart coordinate series (JSON or SVG path data)
//! - `fetch`: request a backtest from the simulation service and save artifacts
//! - `export`: save the artifact bundle for a local result file
//! - `batch`: summarize many result files in parallel

mod obs;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use equitylens_client::{BacktestRequest, BacktestSource, ClientConfig, HttpBacktestSource};
use equitylens_core::chart::ChartCanvas;
use equitylens_report::{fmt_pct, load_result, save_artifacts, summarize_files, Report};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "equitylens",
    about = "EquityLens CLI: statistics and chart series for backtest results"
)]
struct Cli {
    /// Log filter (overridden by EQUITYLENS_LOG).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format: text or json.
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct CanvasArgs {
    /// Canvas width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Canvas height.
    #[arg(long, default_value_t = 300.0)]
    height: f64,

    /// Inset applied to every edge.
    #[arg(long, default_value_t = 30.0)]
    padding: f64,
}

impl CanvasArgs {
    fn canvas(&self) -> ChartCanvas {
        ChartCanvas::new(self.width, self.height, self.padding)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary statistics for a result file.
    Summary {
        /// Path to a BacktestResult JSON file.
        file: PathBuf,

        /// Print the statistics as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the chart coordinate series for a result file.
    Chart {
        /// Path to a BacktestResult JSON file.
        file: PathBuf,

        #[command(flatten)]
        canvas: CanvasArgs,

        /// Print only SVG path data instead of the full series JSON.
        #[arg(long, default_value_t = false)]
        svg: bool,
    },
    /// Request a backtest from the simulation service and save artifacts.
    Fetch {
        /// Ticker symbol.
        #[arg(long, default_value = "AAPL")]
        ticker: String,

        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,

        /// Short SMA window in bars.
        #[arg(long, default_value_t = 20)]
        short_window: usize,

        /// Long SMA window in bars.
        #[arg(long, default_value_t = 50)]
        long_window: usize,

        /// Starting cash.
        #[arg(long, default_value_t = 10_000.0)]
        initial_cash: f64,

        /// Fee rate in basis points.
        #[arg(long, default_value_t = 0.0)]
        fee_bps: f64,

        /// Slippage in basis points.
        #[arg(long, default_value_t = 0.0)]
        slip_bps: f64,

        /// Client config TOML. Defaults to the platform config dir.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the service base URL from the config.
        #[arg(long)]
        base_url: Option<String>,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Save the artifact bundle for a local result file.
    Export {
        /// Path to a BacktestResult JSON file.
        file: PathBuf,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Summarize many result files in parallel.
    Batch {
        /// BacktestResult JSON files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print one JSON object per file instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    obs::init_tracing(&cli.log_level, &cli.log_format)?;

    match cli.command {
        Commands::Summary { file, json } => run_summary(&file, json),
        Commands::Chart { file, canvas, svg } => run_chart(&file, &canvas.canvas(), svg),
        Commands::Fetch {
            ticker,
            start,
            end,
            short_window,
            long_window,
            initial_cash,
            fee_bps,
            slip_bps,
            config,
            base_url,
            output_dir,
        } => {
            let request = BacktestRequest {
                ticker,
                start,
                end,
                short_window,
                long_window,
                initial_cash,
                fee_bps,
                slip_bps,
            };
            run_fetch(&request, config, base_url, &output_dir)
        }
        Commands::Export { file, output_dir } => run_export(&file, &output_dir),
        Commands::Batch { files, json } => run_batch(&files, json),
    }
}

fn run_summary(file: &Path, json: bool) -> Result<()> {
    let result = load_result(file)?;
    let report = Report::build(&result, &ChartCanvas::default());
    if json {
        println!("{}", serde_json::to_string_pretty(&report.stats)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn run_chart(file: &Path, canvas: &ChartCanvas, svg: bool) -> Result<()> {
    let result = load_result(file)?;
    let series = equitylens_core::to_chart_series(&result.equity_curve, canvas);
    if svg {
        println!("{}", series.svg_path());
    } else {
        println!("{}", serde_json::to_string_pretty(&series)?);
    }
    Ok(())
}

fn run_fetch(
    request: &BacktestRequest,
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    output_dir: &Path,
) -> Result<()> {
    let config = load_client_config(config_path, base_url)?;
    let source = HttpBacktestSource::new(config)?;

    let result = source
        .fetch(request)
        .with_context(|| format!("backtest request for {} failed", request.ticker))?;
    let report = Report::build(&result, &ChartCanvas::default());
    print_summary(&report);

    let dir = save_artifacts(&report, &result, output_dir)?;
    println!("\nArtifacts saved to {}", dir.display());
    Ok(())
}

fn run_export(file: &Path, output_dir: &Path) -> Result<()> {
    let result = load_result(file)?;
    let report = Report::build(&result, &ChartCanvas::default());
    let dir = save_artifacts(&report, &result, output_dir)?;
    println!("Artifacts saved to {}", dir.display());
    Ok(())
}

fn run_batch(files: &[PathBuf], json: bool) -> Result<()> {
    let entries = summarize_files(files, &ChartCanvas::default());

    if json {
        for entry in &entries {
            let line = match &entry.outcome {
                Ok(report) => serde_json::json!({
                    "path": entry.path.display().to_string(),
                    "ticker": report.ticker,
                    "stats": report.stats,
                }),
                Err(err) => serde_json::json!({
                    "path": entry.path.display().to_string(),
                    "error": err,
                }),
            };
            println!("{line}");
        }
    } else {
        println!(
            "{:<32} {:<8} {:>10} {:>10} {:>8} {:>9}",
            "file", "ticker", "return", "max dd", "trips", "win rate"
        );
        for entry in &entries {
            let name = entry.path.display().to_string();
            match &entry.outcome {
                Ok(report) => match &report.stats {
                    Some(s) => println!(
                        "{:<32} {:<8} {:>10} {:>10} {:>8} {:>9}",
                        name,
                        report.ticker,
                        fmt_pct(s.total_return_pct),
                        fmt_pct(s.max_drawdown_pct),
                        s.round_trip_count,
                        fmt_pct(s.win_rate_pct)
                    ),
                    None => println!("{:<32} {:<8} insufficient data", name, report.ticker),
                },
                Err(err) => println!("{name:<32} error: {err}"),
            }
        }
    }

    let failed = entries.iter().filter(|e| !e.is_ok()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) could not be summarized", entries.len());
    }
    Ok(())
}

fn load_client_config(path: Option<PathBuf>, base_url: Option<String>) -> Result<ClientConfig> {
    let config = match path {
        Some(p) => ClientConfig::from_file(&p)?,
        None => match ClientConfig::default_path() {
            Some(p) => ClientConfig::load_or_default(&p)?,
            None => ClientConfig::default(),
        },
    };
    let config = match base_url {
        Some(url) => config.with_base_url(&url)?,
        None => config,
    };
    tracing::debug!(base_url = %config.base_url, "client config loaded");
    Ok(config)
}

fn print_summary(report: &Report) {
    println!("=== {} ===", report.ticker);
    let Some(s) = &report.stats else {
        println!("Insufficient data: fewer than two equity points.");
        return;
    };
    println!("Start value:   {:.2}", s.start_value);
    println!("End value:     {:.2}", s.end_value);
    println!("Total return:  {}", fmt_pct(s.total_return_pct));
    println!("Max drawdown:  {}", fmt_pct(s.max_drawdown_pct));
    println!("Trades:        {}", s.trade_count);
    println!(
        "Round trips:   {} ({} wins / {} losses)",
        s.round_trip_count, s.wins, s.losses
    );
    println!("Win rate:      {}", fmt_pct(s.win_rate_pct));
    println!("Last value:    {:.2}", report.chart.last_value);
    if let Some(idx) = report.halted_at {
        println!("Note: round-trip matching stopped at ledger entry {idx}.");
    }
}
