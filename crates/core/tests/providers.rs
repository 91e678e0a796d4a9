//! Provider clients against a mocked HTTP backend.
mod common;

use common::{
    completion_body, dead_base_url, mock_completion, mock_history, mock_spot_quote, settings_for,
    symbol_keyed_body,
};
use goldluck_core::domain::instrument::Instrument;
use goldluck_core::domain::pricing::Premium;
use goldluck_core::domain::signal::Direction;
use goldluck_core::error::AdvisorError;
use goldluck_core::ingest::history::YahooSparkClient;
use goldluck_core::ingest::quotes::{self, GoldApiClient, SpotQuoteProvider};
use goldluck_core::llm::openrouter::OpenRouterClient;
use goldluck_core::llm::LlmClient;
use goldluck_core::trend;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn spot_quote_reads_price_per_gram() {
    let server = MockServer::start().await;
    mock_spot_quote(&server, "XAU", 6000.0).await;

    let client = GoldApiClient::from_settings(&settings_for(&server.uri())).unwrap();
    let quote = client.fetch_quote(Instrument::Gold).await.unwrap();
    assert_eq!(quote.instrument, Instrument::Gold);
    assert_eq!(quote.price_per_gram, 6000.0);
    assert_eq!(quote.currency, "INR");
}

#[tokio::test]
async fn fetch_prices_applies_units_tax_and_premium() {
    let server = MockServer::start().await;
    mock_spot_quote(&server, "XAU", 6000.0).await;
    mock_spot_quote(&server, "XAG", 85.0).await;

    let client = GoldApiClient::from_settings(&settings_for(&server.uri())).unwrap();
    let premium = Premium::try_from(2.5).unwrap();
    let prices = quotes::fetch_prices(&client, 9.2, premium).await.unwrap();

    assert!((prices.landed.gold.value - 6000.0 * 10.0 * 1.092 * 1.025).abs() < 1e-6);
    assert!((prices.landed.silver.value - 85.0 * 1000.0 * 1.092 * 1.025).abs() < 1e-6);
    assert_eq!(prices.spot.silver.price_per_gram, 85.0);
}

#[tokio::test]
async fn spot_quote_server_error_is_provider_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/XAU/INR"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;
    mock_spot_quote(&server, "XAG", 85.0).await;

    let client = GoldApiClient::from_settings(&settings_for(&server.uri())).unwrap();
    let err = quotes::fetch_prices(&client, 9.2, Premium::ZERO)
        .await
        .unwrap_err();
    match &err {
        AdvisorError::Provider { status, detail, .. } => {
            assert_eq!(*status, Some(500));
            assert!(detail.starts_with("Gold:"), "detail was {detail}");
        }
        other => panic!("expected provider failure, got {other:?}"),
    }
    assert_eq!(err.raw_body(), Some("upstream down"));
}

#[tokio::test]
async fn spot_quote_missing_price_field_is_provider_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/XAG/INR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "No data"})))
        .mount(&server)
        .await;

    let client = GoldApiClient::from_settings(&settings_for(&server.uri())).unwrap();
    let err = client.fetch_quote(Instrument::Silver).await.unwrap_err();
    assert!(matches!(err, AdvisorError::Provider { stage: "decode", .. }));
}

#[tokio::test]
async fn spot_quote_unreachable_is_connectivity_failure() {
    let client = GoldApiClient::from_settings(&settings_for(&dead_base_url())).unwrap();
    let err = client.fetch_quote(Instrument::Gold).await.unwrap_err();
    assert!(err.is_connectivity(), "got {err:?}");
}

#[tokio::test]
async fn slow_provider_times_out_as_connectivity_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/XAU/INR"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"price_gram_24k": 6000.0}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut settings = settings_for(&server.uri());
    settings.http_timeout_secs = 1;
    let client = GoldApiClient::from_settings(&settings).unwrap();
    let err = client.fetch_quote(Instrument::Gold).await.unwrap_err();
    assert!(err.is_connectivity(), "got {err:?}");
}

#[tokio::test]
async fn trends_from_symbol_keyed_shape() {
    let server = MockServer::start().await;
    mock_history(&server, symbol_keyed_body()).await;

    let client = YahooSparkClient::from_settings(&settings_for(&server.uri())).unwrap();
    let report = trend::fetch_trends(&client).await;

    assert!(report.warning.is_none());
    assert_eq!(report.signals.gold.direction, Direction::Up);
    assert_eq!(report.signals.gold.rsi, 100.0);
    assert_eq!(report.signals.silver.direction, Direction::Down);
    assert_eq!(report.signals.silver.rsi, 0.0);
    assert_eq!(report.signals.silver.observations, 21);
}

#[tokio::test]
async fn trends_from_spark_envelope_shape() {
    let server = MockServer::start().await;
    let (ts, closes) = common::rising_closes(2400.0, 1.0, 3);
    let chart = json!({
        "timestamp": ts,
        "indicators": {"quote": [{"close": closes}]}
    });
    let body = json!({
        "spark": {
            "result": [
                {"symbol": "GC=F", "response": [chart.clone()]},
                {"symbol": "SI=F", "response": [chart]}
            ],
            "error": null
        }
    });
    mock_history(&server, body).await;

    let client = YahooSparkClient::from_settings(&settings_for(&server.uri())).unwrap();
    let report = trend::fetch_trends(&client).await;

    // Three closes: parsed, but too short for any indicator.
    assert!(report.warning.is_none());
    assert_eq!(report.signals.gold.observations, 3);
    assert_eq!(report.signals.gold.direction, Direction::Neutral);
    assert_eq!(report.signals.gold.rsi, 50.0);
}

#[tokio::test]
async fn trends_unknown_shape_degrades_to_neutral() {
    let server = MockServer::start().await;
    mock_history(&server, json!({"finance": {"result": null}})).await;

    let client = YahooSparkClient::from_settings(&settings_for(&server.uri())).unwrap();
    let report = trend::fetch_trends(&client).await;

    let warning = report.warning.expect("warning surfaced");
    assert!(warning.contains("GC=F"), "warning was {warning}");
    for (_, signal) in report.signals.iter() {
        assert_eq!(signal.direction, Direction::Neutral);
        assert_eq!(signal.rsi, 50.0);
    }
}

#[tokio::test]
async fn trends_connectivity_failure_degrades_to_neutral() {
    let client = YahooSparkClient::from_settings(&settings_for(&dead_base_url())).unwrap();
    let report = trend::fetch_trends(&client).await;

    assert!(report.warning.is_some());
    assert_eq!(report.signals.gold.direction, Direction::Neutral);
    assert_eq!(report.signals.silver.rsi, 50.0);
}

#[tokio::test]
async fn completion_sends_model_prompt_and_token_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "model": "meta-llama/llama-3.1-8b-instruct",
            "max_tokens": 80,
            "messages": [{"role": "user", "content": "ping"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("pong")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenRouterClient::from_settings(&settings_for(&server.uri())).unwrap();
    assert_eq!(client.complete("ping").await.unwrap(), "pong");
}

#[tokio::test]
async fn completion_checks_bearer_auth() {
    let server = MockServer::start().await;
    mock_completion(&server, "Gold Rec: BUY").await;

    let client = OpenRouterClient::from_settings(&settings_for(&server.uri())).unwrap();
    assert_eq!(client.complete("anything").await.unwrap(), "Gold Rec: BUY");
}

#[tokio::test]
async fn completion_http_error_is_provider_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "No auth"}})),
        )
        .mount(&server)
        .await;

    let client = OpenRouterClient::from_settings(&settings_for(&server.uri())).unwrap();
    let err = client.complete("ping").await.unwrap_err();
    assert!(matches!(err, AdvisorError::Provider { status: Some(401), .. }));
}
