//! Load backtest results from disk.

use anyhow::{Context, Result};
use equitylens_core::BacktestResult;
use std::path::Path;

/// Read a JSON `BacktestResult` as returned by the simulation service.
pub fn load_result(path: &Path) -> Result<BacktestResult> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read result file {}", path.display()))?;
    let result = BacktestResult::from_slice(&bytes)
        .with_context(|| format!("failed to parse result file {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        ticker = %result.ticker,
        points = result.equity_curve.len(),
        trades = result.trades.len(),
        "loaded backtest result"
    );
    Ok(result)
}
