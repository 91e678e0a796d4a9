use goldluck_core::config::Settings;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GOLD_API_KEY: &str = "test-gold-key";
pub const OPENROUTER_API_KEY: &str = "test-llm-key";

/// Settings with every provider pointed at `base` (a mock server URI).
#[allow(dead_code)]
pub fn settings_for(base: &str) -> Settings {
    Settings {
        gold_api_key: Some(GOLD_API_KEY.to_string()),
        gold_api_base_url: format!("{base}/api"),
        history_base_url: base.to_string(),
        openrouter_api_key: Some(OPENROUTER_API_KEY.to_string()),
        llm_base_url: format!("{base}/v1"),
        http_timeout_secs: 5,
        llm_timeout_secs: 5,
        ..Settings::default()
    }
}

/// A base URL on which nothing listens.
#[allow(dead_code)]
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[allow(dead_code)]
pub async fn mock_spot_quote(server: &MockServer, code: &str, price_gram_24k: f64) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{code}/INR")))
        .and(header("x-access-token", GOLD_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metal": code,
            "currency": "INR",
            "price_gram_24k": price_gram_24k,
            "price_gram_22k": price_gram_24k * 0.916,
        })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn rising_closes(start: f64, step: f64, n: usize) -> (Vec<i64>, Vec<f64>) {
    let t0 = 1_788_000_000_i64;
    let ts = (0..n).map(|i| t0 + i as i64 * 86_400).collect();
    let closes = (0..n).map(|i| start + step * i as f64).collect();
    (ts, closes)
}

#[allow(dead_code)]
pub fn symbol_keyed_body() -> Value {
    let (gold_ts, gold_close) = rising_closes(2400.0, 5.0, 21);
    let (silver_ts, silver_close) = rising_closes(32.0, -0.1, 21);
    json!({
        "GC=F": {"symbol": "GC=F", "timestamp": gold_ts, "close": gold_close},
        "SI=F": {"symbol": "SI=F", "timestamp": silver_ts, "close": silver_close},
    })
}

#[allow(dead_code)]
pub async fn mock_history(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v7/finance/spark"))
        .and(query_param("symbols", "GC=F,SI=F"))
        .and(query_param("range", "1mo"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "gen-test",
        "model": "meta-llama/llama-3.1-8b-instruct",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": content}
        }]
    })
}

#[allow(dead_code)]
pub async fn mock_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {OPENROUTER_API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(server)
        .await;
}
