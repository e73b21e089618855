//! Trade — one executed fill from the strategy ledger.

use serde::{Deserialize, Serialize};

use super::equity::timestamp_text;

/// Direction of a fill. No other order types exist in a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "BUY", alias = "buy", alias = "Buy")]
    Buy,
    #[serde(rename = "SELL", alias = "sell", alias = "Sell")]
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single executed fill.
///
/// Ledger rows arrive as `{date, side, qty, price, fee}` from the simulation
/// service or `{t, side, shares, price}` from the legacy SMA router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(alias = "t", deserialize_with = "timestamp_text")]
    pub date: String,
    pub side: Side,
    #[serde(alias = "qty", alias = "shares")]
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub fee: f64,
}

impl Trade {
    pub fn buy(date: impl Into<String>, quantity: f64, price: f64, fee: f64) -> Self {
        Self {
            date: date.into(),
            side: Side::Buy,
            quantity,
            price,
            fee,
        }
    }

    pub fn sell(date: impl Into<String>, quantity: f64, price: f64, fee: f64) -> Self {
        Self {
            date: date.into(),
            side: Side::Sell,
            quantity,
            price,
            fee,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.side == Side::Sell
    }

    /// Gross traded value (quantity × price), fees excluded.
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_ledger_row() {
        let t: Trade = serde_json::from_str(
            r#"{"date":"2024-03-01","side":"BUY","qty":12,"price":181.5,"fee":0.21}"#,
        )
        .unwrap();
        assert_eq!(t.side, Side::Buy);
        assert_eq!(t.quantity, 12.0);
        assert_eq!(t.fee, 0.21);
    }

    #[test]
    fn lowercase_side_accepted() {
        let t: Trade = serde_json::from_str(
            r#"{"date":"2024-03-01","side":"sell","quantity":1,"price":1.0}"#,
        )
        .unwrap();
        assert!(t.is_sell());
        assert_eq!(t.fee, 0.0, "missing fee defaults to zero");
    }

    #[test]
    fn parses_router_ledger_row() {
        let t: Trade = serde_json::from_str(
            r#"{"t":1704153600000,"side":"buy","price":185.64,"shares":53}"#,
        )
        .unwrap();
        assert!(t.is_buy());
        assert_eq!(t.date, "1704153600000");
        assert_eq!(t.quantity, 53.0);
        assert_eq!(t.fee, 0.0);
    }

    #[test]
    fn unknown_side_rejected() {
        let r: Result<Trade, _> = serde_json::from_str(
            r#"{"date":"2024-03-01","side":"SHORT","qty":1,"price":1.0,"fee":0}"#,
        );
        assert!(r.is_err());
    }

    #[test]
    fn side_serializes_uppercase() {
        let json = serde_json::to_string(&Trade::sell("d", 1.0, 2.0, 0.0)).unwrap();
        assert!(json.contains(r#""side":"SELL""#));
    }

    #[test]
    fn notional() {
        assert_eq!(Trade::buy("d", 10.0, 50.0, 1.0).notional(), 500.0);
    }
}
