//! Integration tests for the HTTP source against a mock simulation service.

use equitylens_client::{
    BacktestRequest, BacktestSource, ClientConfig, FetchError, HttpBacktestSource,
    RequestGenerations,
};
use equitylens_core::stats::summarize;
use mockito::{Matcher, Server};

const RESPONSE: &str = r#"{
    "ticker": "AAPL",
    "equity_curve": [
        {"t": "2024-01-02", "v": 10000.0},
        {"t": "2024-01-03", "v": 10400.0},
        {"t": "2024-01-04", "v": 10200.0}
    ],
    "trades": [
        {"date": "2024-01-02", "side": "BUY", "qty": 50, "price": 200.0, "fee": 1.0},
        {"date": "2024-01-04", "side": "SELL", "qty": 50, "price": 204.0, "fee": 1.0}
    ]
}"#;

fn source_for(server: &Server, max_retries: u32) -> HttpBacktestSource {
    let config = ClientConfig {
        max_retries,
        retry_base_delay_ms: 0,
        timeout_secs: 5,
        ..ClientConfig::default()
    }
    .with_base_url(&server.url())
    .unwrap();
    HttpBacktestSource::new(config).unwrap()
}

#[test]
fn fetches_and_decodes_service_payload() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/backtest")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "ticker": "AAPL",
            "short_window": 20,
            "long_window": 50,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESPONSE)
        .create();

    let src = source_for(&server, 0);
    let result = src.fetch(&BacktestRequest::for_ticker("aapl")).unwrap();
    mock.assert();

    assert_eq!(result.ticker, "AAPL");
    assert_eq!(result.equity_curve.len(), 3);
    assert_eq!(result.trades.len(), 2);

    let stats = summarize(&result.equity_curve, &result.trades).unwrap();
    assert_eq!(stats.round_trip_count, 1);
    assert_eq!(stats.win_rate_pct, 100.0);
}

#[test]
fn retries_server_errors_then_gives_up() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/backtest")
        .with_status(503)
        .expect(3)
        .create();

    let src = source_for(&server, 2);
    let err = src.fetch(&BacktestRequest::default()).unwrap_err();
    mock.assert();

    match err {
        FetchError::ServerError { attempts, last } => {
            assert_eq!(attempts, 3);
            assert!(last.contains("503"), "got {last}");
        }
        other => panic!("expected ServerError, got {other:?}"),
    }
}

#[test]
fn client_errors_are_not_retried() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/backtest")
        .with_status(422)
        .with_body("symbol required")
        .expect(1)
        .create();

    let src = source_for(&server, 3);
    let err = src.fetch(&BacktestRequest::default()).unwrap_err();
    mock.assert();

    match err {
        FetchError::Rejected { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, "symbol required");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn malformed_body_is_reported() {
    let mut server = Server::new();
    server
        .mock("POST", "/api/backtest")
        .with_status(200)
        .with_body(r#"{"equity_curve": "nope"}"#)
        .create();

    let src = source_for(&server, 0);
    let err = src.fetch(&BacktestRequest::default()).unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)), "got {err:?}");
}

#[test]
fn misnamed_curve_is_malformed_not_empty() {
    let mut server = Server::new();
    server
        .mock("POST", "/api/backtest")
        .with_status(200)
        .with_body(r#"{"ticker":"AAPL","curve":[{"t":"a","v":1},{"t":"b","v":2}],"trades":[]}"#)
        .create();

    let src = source_for(&server, 0);
    let err = src.fetch(&BacktestRequest::default()).unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)), "got {err:?}");
}

#[test]
fn invalid_request_never_hits_the_network() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/api/backtest").expect(0).create();

    let src = source_for(&server, 0);
    let bad = BacktestRequest {
        short_window: 60,
        ..BacktestRequest::default()
    };
    assert!(matches!(
        src.fetch(&bad),
        Err(FetchError::InvalidRequest(_))
    ));
    mock.assert();
}

#[test]
fn superseded_response_is_discarded() {
    let mut server = Server::new();
    server
        .mock("POST", "/api/backtest")
        .with_status(200)
        .with_body(RESPONSE)
        .create();
    let src = source_for(&server, 0);
    let gens = RequestGenerations::new();

    let first = gens.begin();
    let second = gens.begin();

    // The first request completes after the second was issued.
    let late = src.fetch(&BacktestRequest::default()).unwrap();
    assert!(gens.accept(first, late).is_none());

    let current = src.fetch(&BacktestRequest::default()).unwrap();
    assert!(gens.accept(second, current).is_some());
}
