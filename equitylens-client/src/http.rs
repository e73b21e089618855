//! HTTP simulation-service source.
//!
//! Posts the request body to `{base_url}/api/backtest` and decodes the JSON
//! response. Retries transport errors, 429 and 5xx with exponential backoff;
//! other 4xx responses fail immediately.

use crate::config::ClientConfig;
use crate::request::BacktestRequest;
use crate::source::{BacktestSource, FetchError};
use equitylens_core::BacktestResult;
use std::time::Duration;

/// Longest response-body excerpt carried in an error.
const BODY_EXCERPT_CHARS: usize = 200;

/// Longest single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Failure worth another attempt.
enum Retryable {
    Status(reqwest::StatusCode),
    Transport(String),
}

pub struct HttpBacktestSource {
    client: reqwest::blocking::Client,
    config: ClientConfig,
}

impl HttpBacktestSource {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("equitylens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `retry_base_delay_ms × 2^(attempt−1)`, saturating at [`MAX_BACKOFF`].
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32
            .checked_pow(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        Duration::from_millis(self.config.retry_base_delay_ms)
            .checked_mul(factor)
            .map_or(MAX_BACKOFF, |d| d.min(MAX_BACKOFF))
    }

    fn fetch_with_retry(&self, request: &BacktestRequest) -> Result<BacktestResult, FetchError> {
        let url = self.config.backtest_url();
        let mut last_error = None;
        let mut attempts = 0;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.backoff(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying backtest request"
                );
                std::thread::sleep(delay);
            }
            attempts += 1;

            match self.client.post(&url).json(request).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
                    {
                        last_error = Some(Retryable::Status(status));
                        continue;
                    }

                    if !status.is_success() {
                        let body = resp.text().unwrap_or_default();
                        return Err(FetchError::Rejected {
                            status: status.as_u16(),
                            body: excerpt(&body),
                        });
                    }

                    let bytes = resp
                        .bytes()
                        .map_err(|e| FetchError::NetworkUnreachable(e.to_string()))?;
                    return BacktestResult::from_slice(&bytes)
                        .map_err(|e| FetchError::MalformedResponse(e.to_string()));
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(Retryable::Transport(e.to_string()));
                        continue;
                    }
                    return Err(FetchError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(match last_error {
            Some(Retryable::Status(status)) => FetchError::ServerError {
                attempts,
                last: format!("HTTP {status}"),
            },
            Some(Retryable::Transport(msg)) => FetchError::NetworkUnreachable(msg),
            None => FetchError::NetworkUnreachable("max retries exceeded".into()),
        })
    }
}

impl BacktestSource for HttpBacktestSource {
    fn name(&self) -> &str {
        "simulation_service"
    }

    fn fetch(&self, request: &BacktestRequest) -> Result<BacktestResult, FetchError> {
        let request = request.validated()?;
        tracing::info!(
            ticker = %request.ticker,
            short_window = request.short_window,
            long_window = request.long_window,
            url = %self.config.backtest_url(),
            "requesting backtest"
        );
        let result = self.fetch_with_retry(&request)?;
        tracing::info!(
            ticker = %result.ticker,
            points = result.equity_curve.len(),
            trades = result.trades.len(),
            "backtest received"
        );
        Ok(result)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
