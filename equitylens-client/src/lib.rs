//! EquityLens Client — acquiring backtest results from the simulation service.
//!
//! This crate provides:
//! - `BacktestRequest` with validation mirroring the service's parameters
//! - `ClientConfig` loaded from TOML and passed explicitly to the source
//! - The `BacktestSource` trait and its blocking HTTP implementation
//! - Request generations for discarding superseded results

pub mod config;
pub mod generation;
pub mod http;
pub mod request;
pub mod source;

pub use config::{ClientConfig, ConfigError};
pub use generation::{Generation, LatestSlot, RequestGenerations};
pub use http::HttpBacktestSource;
pub use request::{BacktestRequest, RequestError};
pub use source::{BacktestSource, FetchError, StaticSource};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn http_source_is_send_sync() {
        assert_send::<HttpBacktestSource>();
        assert_sync::<HttpBacktestSource>();
    }

    #[test]
    fn generation_types_are_send_sync() {
        assert_send::<RequestGenerations>();
        assert_sync::<RequestGenerations>();
        assert_send::<LatestSlot<equitylens_core::BacktestResult>>();
        assert_sync::<LatestSlot<equitylens_core::BacktestResult>>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<ClientConfig>();
        assert_sync::<ClientConfig>();
        assert_send::<BacktestRequest>();
        assert_sync::<BacktestRequest>();
    }
}
