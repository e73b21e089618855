//! BacktestRequest — the body of `POST /api/backtest`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("ticker must not be empty")]
    EmptyTicker,

    #[error("{field} must be at least 1 bar")]
    ZeroWindow { field: &'static str },

    #[error("short_window ({short}) must be smaller than long_window ({long})")]
    WindowOrder { short: usize, long: usize },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("{field} '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { field: &'static str, value: String },

    #[error("start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// Parameters of one SMA-crossover simulation run.
///
/// Windows are integer bar counts; fee and slippage are basis points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRequest {
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub short_window: usize,
    pub long_window: usize,
    pub initial_cash: f64,
    pub fee_bps: f64,
    pub slip_bps: f64,
}

impl Default for BacktestRequest {
    fn default() -> Self {
        Self {
            ticker: "AAPL".into(),
            start: None,
            end: None,
            short_window: 20,
            long_window: 50,
            initial_cash: 10_000.0,
            fee_bps: 0.0,
            slip_bps: 0.0,
        }
    }
}

impl BacktestRequest {
    pub fn for_ticker(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            ..Self::default()
        }
    }

    /// Check the request and return a normalized copy (trimmed, upper-case ticker).
    pub fn validated(&self) -> Result<Self, RequestError> {
        let ticker = self.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(RequestError::EmptyTicker);
        }

        if self.short_window == 0 {
            return Err(RequestError::ZeroWindow {
                field: "short_window",
            });
        }
        if self.long_window == 0 {
            return Err(RequestError::ZeroWindow {
                field: "long_window",
            });
        }
        if self.short_window >= self.long_window {
            return Err(RequestError::WindowOrder {
                short: self.short_window,
                long: self.long_window,
            });
        }

        for (field, value) in [
            ("initial_cash", self.initial_cash),
            ("fee_bps", self.fee_bps),
            ("slip_bps", self.slip_bps),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RequestError::InvalidAmount { field, value });
            }
        }

        let start = parse_date("start", self.start.as_deref())?;
        let end = parse_date("end", self.end.as_deref())?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(RequestError::InvertedRange { start, end });
            }
        }

        Ok(Self {
            ticker,
            ..self.clone()
        })
    }
}

fn parse_date(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, RequestError> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RequestError::InvalidDate {
                field,
                value: s.to_string(),
            })
        })
        .transpose()
}
