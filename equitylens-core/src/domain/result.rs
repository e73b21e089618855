//! BacktestResult — the raw payload produced by one simulation request.

use super::equity::EquityPoint;
use super::trade::Trade;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultError {
    #[error("malformed backtest result: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Ticker, equity series, and trade ledger of one simulation run.
///
/// Created once per request and never mutated afterwards; both the statistics
/// engine and the chart mapper borrow it.
///
/// Both arrays are required. A payload that names the curve differently is
/// malformed, not empty. The legacy SMA router's `symbol`/`equity` keys are
/// accepted; its other fields are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BacktestResult {
    #[serde(alias = "symbol")]
    pub ticker: String,
    #[serde(alias = "equity")]
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
}

impl BacktestResult {
    pub fn from_json(json: &str) -> Result<Self, ResultError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ResultError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// True when the equity curve is too short to derive anything from.
    pub fn has_insufficient_data(&self) -> bool {
        self.equity_curve.len() < 2
    }
}
