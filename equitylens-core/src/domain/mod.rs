//! Data model shared by the statistics engine and the chart mapper.

pub mod equity;
pub mod result;
pub mod trade;

pub use equity::EquityPoint;
pub use result::{BacktestResult, ResultError};
pub use trade::{Side, Trade};
