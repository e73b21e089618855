//! EquityLens Core — backtest result model, statistics engine, chart mapper.
//!
//! This crate is a pure transformation from a simulation result
//! (equity curve + trade ledger) to:
//! - Summary statistics: total return, max drawdown, round-trip win rate
//! - A chart-ready coordinate path with axis bounds
//!
//! It does not fetch, persist, or render anything. Both components borrow the
//! same immutable [`domain::BacktestResult`] and are independent of each other.

pub mod chart;
pub mod domain;
pub mod stats;

pub use chart::{to_chart_series, ChartCanvas, ChartPoint, ChartSeries};
pub use domain::{BacktestResult, EquityPoint, ResultError, Side, Trade};
pub use stats::{summarize, summarize_with_scan, RoundTrip, RoundTripScan, SummaryStats};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything handed across threads by callers is
    /// Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<BacktestResult>();
        require_sync::<BacktestResult>();
        require_send::<SummaryStats>();
        require_sync::<SummaryStats>();
        require_send::<RoundTripScan>();
        require_sync::<RoundTripScan>();
        require_send::<ChartSeries>();
        require_sync::<ChartSeries>();
        require_send::<ChartCanvas>();
        require_sync::<ChartCanvas>();
    }

    /// The two components share only the data model: each can run on a
    /// result the other never saw.
    #[test]
    fn components_run_independently_on_same_input() {
        let result = BacktestResult {
            ticker: "SPY".into(),
            equity_curve: vec![
                EquityPoint::new("2024-01-02", 100.0),
                EquityPoint::new("2024-01-03", 200.0),
            ],
            trades: vec![],
        };
        let before = result.clone();

        let chart = to_chart_series(&result.equity_curve, &ChartCanvas::default());
        let stats = summarize(&result.equity_curve, &result.trades).unwrap();

        assert_eq!(result, before, "input must not be mutated");
        assert_eq!(chart.last_value, stats.end_value);
        assert!((stats.total_return_pct - 100.0).abs() < 1e-10);
    }
}
