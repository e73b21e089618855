//! Round-trip matching over a trade ledger.
//!
//! A round trip is a BUY paired with the nearest following SELL. Matching is a
//! single greedy left-to-right pass:
//!
//! - SELLs reached at the top level are skipped.
//! - After a match the scan resumes right after the SELL, so any trades between
//!   the BUY and its SELL (e.g. a second BUY) are never matched on their own.
//! - A BUY with no later SELL stops matching for the rest of the ledger.
//! - When quantities differ only `min(buy, sell)` is scored; the remainder is
//!   dropped rather than carried into the next round trip.
//!
//! The last two rules can undercount round trips on some ledgers. They are
//! kept deliberately so results agree with the simulation service's own
//! reporting.

use crate::domain::Trade;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Loss => "LOSS",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matched BUY → SELL pair with its realized P&L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTrip {
    /// Ledger index of the opening BUY.
    pub buy_index: usize,
    /// Ledger index of the closing SELL.
    pub sell_index: usize,
    /// Matched quantity: `min(buy.quantity, sell.quantity)`.
    pub quantity: f64,
    pub entry_price: f64,
    pub exit_price: f64,
    /// Sum of both legs' fees.
    pub fees: f64,
    pub pnl: f64,
    pub outcome: Outcome,
}

impl RoundTrip {
    fn from_legs(buy_index: usize, buy: &Trade, sell_index: usize, sell: &Trade) -> Self {
        let quantity = buy.quantity.min(sell.quantity);
        let fees = buy.fee + sell.fee;
        let pnl = (sell.price - buy.price) * quantity - fees;
        // zero P&L counts as a loss
        let outcome = if pnl > 0.0 {
            Outcome::Win
        } else {
            Outcome::Loss
        };
        Self {
            buy_index,
            sell_index,
            quantity,
            entry_price: buy.price,
            exit_price: sell.price,
            fees,
            pnl,
            outcome,
        }
    }

    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }
}

/// Output of one matching pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTripScan {
    pub round_trips: Vec<RoundTrip>,
    /// Ledger index of the unmatched BUY that stopped the scan, if any.
    pub halted_at: Option<usize>,
}

impl RoundTripScan {
    pub fn wins(&self) -> usize {
        self.round_trips.iter().filter(|rt| rt.is_win()).count()
    }

    pub fn losses(&self) -> usize {
        self.round_trips.len() - self.wins()
    }

    pub fn count(&self) -> usize {
        self.round_trips.len()
    }

    /// Sum of realized P&L across all matched round trips.
    pub fn net_pnl(&self) -> f64 {
        self.round_trips.iter().map(|rt| rt.pnl).sum()
    }
}

/// Pair BUYs with the nearest following SELL.
pub fn match_round_trips(trades: &[Trade]) -> RoundTripScan {
    let mut scan = RoundTripScan::default();
    let mut i = 0;

    while i < trades.len() {
        let buy = &trades[i];
        if !buy.is_buy() {
            i += 1;
            continue;
        }

        let Some(offset) = trades[i + 1..].iter().position(Trade::is_sell) else {
            tracing::debug!(
                buy_index = i,
                unscored = trades.len() - i,
                "unmatched BUY halts round-trip matching"
            );
            scan.halted_at = Some(i);
            break;
        };
        let j = i + 1 + offset;

        scan.round_trips.push(RoundTrip::from_legs(i, buy, j, &trades[j]));
        i = j + 1;
    }

    scan
}

/// Share of winning round trips as a percentage, or 0 when there are none.
pub fn win_rate_pct(wins: usize, round_trips: usize) -> f64 {
    if round_trips == 0 {
        return 0.0;
    }
    wins as f64 / round_trips as f64 * 100.0
}
