//! Report — everything the presentation layer needs from one backtest result.

use equitylens_core::chart::{to_chart_series, ChartCanvas, ChartSeries};
use equitylens_core::stats::{summarize_with_scan, RoundTrip, SummaryStats};
use equitylens_core::BacktestResult;
use serde::{Deserialize, Serialize};

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Statistics, round trips, and chart series for one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub ticker: String,
    /// `None` when the equity curve has fewer than two points.
    pub stats: Option<SummaryStats>,
    pub round_trips: Vec<RoundTrip>,
    /// Ledger index of the BUY that stopped round-trip matching.
    pub halted_at: Option<usize>,
    pub chart: ChartSeries,
}

impl Report {
    pub fn build(result: &BacktestResult, canvas: &ChartCanvas) -> Self {
        let chart = to_chart_series(&result.equity_curve, canvas);
        let (stats, round_trips, halted_at) =
            match summarize_with_scan(&result.equity_curve, &result.trades) {
                Some((stats, scan)) => (Some(stats), scan.round_trips, scan.halted_at),
                None => (None, Vec::new(), None),
            };

        tracing::debug!(
            ticker = %result.ticker,
            has_stats = stats.is_some(),
            round_trips = round_trips.len(),
            "report built"
        );

        Self {
            schema_version: SCHEMA_VERSION,
            ticker: result.ticker.clone(),
            stats,
            round_trips,
            halted_at,
            chart,
        }
    }

    pub fn has_stats(&self) -> bool {
        self.stats.is_some()
    }

    /// Realized P&L summed over all matched round trips.
    pub fn net_round_trip_pnl(&self) -> f64 {
        self.round_trips.iter().map(|rt| rt.pnl).sum()
    }
}
