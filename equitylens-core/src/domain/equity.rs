//! EquityPoint — portfolio value at one point in simulated time.

use serde::{Deserialize, Deserializer, Serialize};

/// Total portfolio value at a single timestamp.
///
/// The simulation service emits these as `{"t": ..., "v": ...}`. The legacy
/// SMA router sends `{"t": <epoch ms>, "equity": ...}` instead; both shapes and
/// the long field names are accepted. Timestamps are opaque strings: ordering
/// is taken from the position in the curve, never from parsing the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    #[serde(alias = "t", deserialize_with = "timestamp_text")]
    pub timestamp: String,
    #[serde(alias = "v", alias = "equity")]
    pub value: f64,
}

impl EquityPoint {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

/// Accept a timestamp as either a string or a bare number (epoch millis).
pub(crate) fn timestamp_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

/// Extract the value column of an equity curve.
pub fn values(curve: &[EquityPoint]) -> Vec<f64> {
    curve.iter().map(|p| p.value).collect()
}
