//! Statistics engine — summary performance figures for one backtest result.
//!
//! Every function here is pure: equity curve and/or trade ledger in, figures
//! out. Nothing is cached between calls.

pub mod drawdown;
pub mod round_trip;

pub use drawdown::{max_drawdown_pct, total_return_pct};
pub use round_trip::{match_round_trips, win_rate_pct, Outcome, RoundTrip, RoundTripScan};

use crate::domain::{EquityPoint, Trade};
use serde::{Deserialize, Deserializer, Serialize};

/// Headline statistics for one backtest result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub start_value: f64,
    pub end_value: f64,
    /// `(end / start − 1) × 100`; non-finite when the start value is zero.
    /// JSON has no non-finite numbers, so it is written as `null` and read
    /// back as NaN.
    #[serde(deserialize_with = "null_as_nan")]
    pub total_return_pct: f64,
    pub max_drawdown_pct: f64,
    /// Number of fills in the ledger, matched or not.
    pub trade_count: usize,
    pub round_trip_count: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate_pct: f64,
}

fn null_as_nan<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

/// Summarize an equity curve and trade ledger.
///
/// Returns `None` when the curve has fewer than two points.
pub fn summarize(equity_curve: &[EquityPoint], trades: &[Trade]) -> Option<SummaryStats> {
    summarize_with_scan(equity_curve, trades).map(|(stats, _)| stats)
}

/// Like [`summarize`], also returning the round trips behind the win rate.
pub fn summarize_with_scan(
    equity_curve: &[EquityPoint],
    trades: &[Trade],
) -> Option<(SummaryStats, RoundTripScan)> {
    let (first, last) = match equity_curve {
        [first, .., last] => (first, last),
        _ => return None,
    };

    let values = crate::domain::equity::values(equity_curve);
    let scan = match_round_trips(trades);
    let wins = scan.wins();
    let losses = scan.losses();
    let round_trip_count = wins + losses;

    let stats = SummaryStats {
        start_value: first.value,
        end_value: last.value,
        total_return_pct: total_return_pct(first.value, last.value),
        max_drawdown_pct: max_drawdown_pct(&values),
        trade_count: trades.len(),
        round_trip_count,
        wins,
        losses,
        win_rate_pct: win_rate_pct(wins, round_trip_count),
    };
    Some((stats, scan))
}
