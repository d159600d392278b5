//! Integration tests for the Yahoo provider against a mocked chart API

use stockscope::services::market_data::{MarketDataError, MarketDataProvider};
use stockscope::services::yahoo::YahooMarketDataProvider;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::date;

const CHART: &str = include_str!("../fixtures/yahoo_chart_bbca.json");
const NOT_FOUND: &str = include_str!("../fixtures/yahoo_chart_not_found.json");

fn provider(server: &MockServer) -> YahooMarketDataProvider {
    YahooMarketDataProvider::with_client(server.uri(), reqwest::Client::new())
}

#[tokio::test]
async fn fetch_requests_daily_chart_for_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/BBCA.JK"))
        .and(query_param("interval", "1d"))
        .and(query_param("period1", "1704067200"))
        .and(query_param("period2", "1704499200"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHART))
        .expect(1)
        .mount(&server)
        .await;

    let series = provider(&server)
        .fetch("BBCA.JK", date(2024, 1, 1), date(2024, 1, 6))
        .await
        .expect("fetch succeeds");

    assert_eq!(series.symbol(), "BBCA.JK");
    assert_eq!(series.len(), 3);
    assert_eq!(series.records()[0].date, date(2024, 1, 2));
}

#[tokio::test]
async fn unknown_symbol_returns_empty_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_string(NOT_FOUND))
        .mount(&server)
        .await;

    let series = provider(&server)
        .fetch("NOPE", date(2024, 1, 1), date(2024, 2, 1))
        .await
        .expect("not found is not an error");
    assert!(series.is_empty());
}

#[tokio::test]
async fn bare_404_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch("BBCA.JK", date(2024, 1, 1), date(2024, 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Status { status: 404 }));
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let err = provider(&server)
        .with_max_retries(1)
        .fetch("BBCA.JK", date(2024, 1, 1), date(2024, 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Status { status: 503 }));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server)
        .with_max_retries(3)
        .fetch("BBCA.JK", date(2024, 1, 1), date(2024, 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Status { status: 400 }));
}

#[tokio::test]
async fn transient_failure_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHART))
        .expect(1)
        .mount(&server)
        .await;

    let series = provider(&server)
        .with_max_retries(2)
        .fetch("BBCA.JK", date(2024, 1, 1), date(2024, 1, 6))
        .await
        .expect("second attempt succeeds");
    assert_eq!(series.len(), 3);
}
