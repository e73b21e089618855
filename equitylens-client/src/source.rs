//! BacktestSource trait and structured fetch errors.
//!
//! The trait abstracts over where a `BacktestResult` comes from (the HTTP
//! simulation service, a canned fixture) so callers can swap implementations
//! and mock them in tests.

use crate::request::{BacktestRequest, RequestError};
use equitylens_core::BacktestResult;
use thiserror::Error;

/// Failures while acquiring a backtest result.
///
/// Displayable in both CLI and log contexts.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("service rejected request (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("service error after {attempts} attempt(s): {last}")]
    ServerError { attempts: u32, last: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Anything that can turn a request into a backtest result.
pub trait BacktestSource: Send + Sync {
    fn name(&self) -> &str;

    fn fetch(&self, request: &BacktestRequest) -> Result<BacktestResult, FetchError>;
}

/// Source that always returns the same result. Useful for tests and demos.
#[derive(Debug, Clone)]
pub struct StaticSource {
    result: BacktestResult,
}

impl StaticSource {
    pub fn new(result: BacktestResult) -> Self {
        Self { result }
    }
}

impl BacktestSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, request: &BacktestRequest) -> Result<BacktestResult, FetchError> {
        request.validated()?;
        Ok(self.result.clone())
    }
}
