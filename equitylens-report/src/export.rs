//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! Provides three export formats for reports:
//! - **JSON**: full serialization with schema versioning
//! - **CSV**: round-trip tape and equity curve for external analysis tools
//! - **Markdown**: a human-readable single-result summary
//!
//! Persisted reports carry a `schema_version` field. Newer versions are
//! rejected on load.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use equitylens_core::stats::RoundTrip;
use equitylens_core::{BacktestResult, EquityPoint};

use crate::report::{Report, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `Report` to pretty JSON.
pub fn export_report_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize Report to JSON")
}

/// Deserialize a `Report` from JSON, rejecting newer schema versions.
pub fn import_report_json(json: &str) -> Result<Report> {
    let report: Report =
        serde_json::from_str(json).context("failed to deserialize Report from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export matched round trips as CSV.
///
/// Columns: buy_index, sell_index, quantity, entry_price, exit_price, fees,
/// pnl, outcome
pub fn export_round_trips_csv(round_trips: &[RoundTrip]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "buy_index",
        "sell_index",
        "quantity",
        "entry_price",
        "exit_price",
        "fees",
        "pnl",
        "outcome",
    ])?;

    for rt in round_trips {
        let outcome = rt.outcome.as_str().to_string();
        wtr.write_record([
            &rt.buy_index.to_string(),
            &rt.sell_index.to_string(),
            &format!("{:.6}", rt.quantity),
            &format!("{:.6}", rt.entry_price),
            &format!("{:.6}", rt.exit_price),
            &format!("{:.2}", rt.fees),
            &format!("{:.2}", rt.pnl),
            &outcome,
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export an equity curve as CSV with index, timestamp, and value columns.
/// Values are written at full precision.
pub fn export_equity_csv(equity_curve: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["index", "timestamp", "value"])?;
    for (i, p) in equity_curve.iter().enumerate() {
        wtr.write_record([&i.to_string(), &p.timestamp, &p.value.to_string()])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown ───────────────────────────────────────────────────────

/// Render a single report as Markdown.
pub fn render_markdown(report: &Report) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# Backtest report: {}\n", report.ticker);

    let Some(stats) = &report.stats else {
        md.push_str("_Insufficient data: the equity curve has fewer than two points._\n");
        return md;
    };

    md.push_str("| Metric | Value |\n|---|---|\n");
    let _ = writeln!(md, "| Start value | {:.2} |", stats.start_value);
    let _ = writeln!(md, "| End value | {:.2} |", stats.end_value);
    let _ = writeln!(md, "| Total return | {} |", fmt_pct(stats.total_return_pct));
    let _ = writeln!(md, "| Max drawdown | {} |", fmt_pct(stats.max_drawdown_pct));
    let _ = writeln!(md, "| Trades | {} |", stats.trade_count);
    let _ = writeln!(
        md,
        "| Round trips | {} ({}W / {}L) |",
        stats.round_trip_count, stats.wins, stats.losses
    );
    let _ = writeln!(md, "| Win rate | {} |", fmt_pct(stats.win_rate_pct));

    if let Some(idx) = report.halted_at {
        let _ = writeln!(
            md,
            "\n> Round-trip matching stopped at ledger entry {idx}: a BUY with no later SELL. \
             Later fills are not scored."
        );
    }

    if !report.round_trips.is_empty() {
        md.push_str("\n## Round trips\n\n");
        md.push_str("| # | Buy | Sell | Qty | Entry | Exit | Fees | P&L | Outcome |\n");
        md.push_str("|---|---|---|---|---|---|---|---|---|\n");
        for (n, rt) in report.round_trips.iter().enumerate() {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {} |",
                n + 1,
                rt.buy_index,
                rt.sell_index,
                rt.quantity,
                rt.entry_price,
                rt.exit_price,
                rt.fees,
                rt.pnl,
                rt.outcome.as_str()
            );
        }
    }

    md
}

/// Percentage with two decimals; non-finite values print as "n/a".
pub fn fmt_pct(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}%")
    } else {
        "n/a".to_string()
    }
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one report.
///
/// Creates a directory named `{TICKER}_{timestamp}/` under `output_dir`
/// containing:
/// - `report.json` — the full `Report`
/// - `result.json` — the raw `BacktestResult` it was built from
/// - `round_trips.csv` — matched round trips
/// - `equity.csv` — the equity curve
/// - `chart.svg.txt` — SVG path data for the chart series
/// - `report.md` — Markdown summary
///
/// A second export within the same second gets a `_2`, `_3`, ... suffix
/// rather than overwriting the first. Returns the path to the created
/// directory.
pub fn save_artifacts(
    report: &Report,
    result: &BacktestResult,
    output_dir: &Path,
) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        sanitize(&report.ticker),
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = create_run_dir(output_dir, &dirname)?;

    write(&run_dir.join("report.json"), &export_report_json(report)?)?;
    let raw = serde_json::to_string_pretty(result).context("failed to serialize result")?;
    write(&run_dir.join("result.json"), &raw)?;
    write(
        &run_dir.join("round_trips.csv"),
        &export_round_trips_csv(&report.round_trips)?,
    )?;
    write(&run_dir.join("equity.csv"), &export_equity_csv(&result.equity_curve)?)?;
    write(&run_dir.join("chart.svg.txt"), &report.chart.svg_path())?;
    write(&run_dir.join("report.md"), &render_markdown(report))?;

    tracing::info!(dir = %run_dir.display(), "artifacts saved");
    Ok(run_dir)
}

/// Create `output_dir/dirname`, suffixing `_N` while the name is taken.
fn create_run_dir(output_dir: &Path, dirname: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let mut suffix = 1u32;
    loop {
        let candidate = if suffix == 1 {
            output_dir.join(dirname)
        } else {
            output_dir.join(format!("{dirname}_{suffix}"))
        };
        match std::fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => suffix += 1,
            Err(e) => {
                let msg = format!("failed to create {}", candidate.display());
                return Err(e).context(msg);
            }
        }
    }
}

fn write(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Keep tickers filesystem-safe (e.g. `BRK/B`, `^GSPC`).
fn sanitize(ticker: &str) -> String {
    let cleaned: String = ticker
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "UNKNOWN".to_string()
    } else {
        cleaned
    }
}
