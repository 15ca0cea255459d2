use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use medora_router::{
    ai::{AiSettings, AssetSuggester, GeminiSuggester},
    AssetId, Catalog, ClassificationInput, Provenance, Selector,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone)]
enum Reply {
    Text(&'static str),
    Status(StatusCode),
    Garbage,
    Hang,
}

async fn generate(
    State(reply): State<Reply>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
        return (StatusCode::UNAUTHORIZED, "bad key".into());
    }
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    if !prompt.contains("fallback_uncertain") || !prompt.contains("SUMMARY:") {
        return (StatusCode::BAD_REQUEST, "unexpected prompt".into());
    }
    match reply {
        Reply::Text(text) => (
            StatusCode::OK,
            json!({ "candidates": [ { "content": { "parts": [ { "text": text } ] } } ] })
                .to_string(),
        ),
        Reply::Status(status) => (status, "upstream failure".into()),
        Reply::Garbage => (StatusCode::OK, "<html>not json</html>".into()),
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            (StatusCode::OK, String::new())
        }
    }
}

async fn fake_endpoint(reply: Reply) -> SocketAddr {
    let app = Router::new()
        .route("/v1beta/models/:model", post(generate))
        .with_state(reply);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    addr
}

fn suggester(addr: SocketAddr, key: Option<&str>, timeout: Duration) -> GeminiSuggester {
    let settings = AiSettings {
        api_key: key.map(str::to_string),
        endpoint: format!("http://{addr}/v1beta"),
        model: "gemini-test".into(),
        timeout,
    };
    GeminiSuggester::new(settings, Catalog::builtin()).unwrap()
}

fn input() -> ClassificationInput {
    ClassificationInput::new(
        "Patient reports chest pain, exertional, worse with exertion.",
        &["Unstable angina"],
    )
}

#[tokio::test]
async fn valid_answer_is_returned() {
    let addr = fake_endpoint(Reply::Text(" Blood_Vessels\n")).await;
    let ai = suggester(addr, Some("test-key"), Duration::from_secs(5));
    assert_eq!(ai.suggest(&input()).await, Some(AssetId::BloodVessels));
}

#[tokio::test]
async fn fuzzy_answer_is_matched_to_catalog_token() {
    let addr = fake_endpoint(Reply::Text("lung")).await;
    let ai = suggester(addr, Some("test-key"), Duration::from_secs(5));
    assert_eq!(ai.suggest(&input()).await, Some(AssetId::Lungs));
}

#[tokio::test]
async fn noise_answer_is_discarded() {
    let addr = fake_endpoint(Reply::Text("I am unable to help with that.")).await;
    let ai = suggester(addr, Some("test-key"), Duration::from_secs(5));
    assert_eq!(ai.suggest(&input()).await, None);
}

#[tokio::test]
async fn error_status_and_bad_payload_yield_none() {
    let addr = fake_endpoint(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let ai = suggester(addr, Some("test-key"), Duration::from_secs(5));
    assert_eq!(ai.suggest(&input()).await, None);

    let addr = fake_endpoint(Reply::Garbage).await;
    let ai = suggester(addr, Some("test-key"), Duration::from_secs(5));
    assert_eq!(ai.suggest(&input()).await, None);

    let addr = fake_endpoint(Reply::Text("heart")).await;
    let ai = suggester(addr, Some("wrong-key"), Duration::from_secs(5));
    assert_eq!(ai.suggest(&input()).await, None);
}

#[tokio::test]
async fn unreachable_endpoint_yields_none() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let ai = suggester(addr, Some("test-key"), Duration::from_secs(5));
    assert_eq!(ai.suggest(&input()).await, None);
}

#[tokio::test]
async fn missing_key_skips_the_network() {
    let addr = fake_endpoint(Reply::Hang).await;
    let ai = suggester(addr, None, Duration::from_secs(5));
    let started = Instant::now();
    assert_eq!(ai.suggest(&input()).await, None);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let addr = fake_endpoint(Reply::Hang).await;
    let ai = suggester(addr, Some("test-key"), Duration::from_millis(200));
    let started = Instant::now();
    assert_eq!(ai.suggest(&input()).await, None);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn timed_out_ai_matches_rule_path() {
    let addr = fake_endpoint(Reply::Hang).await;
    let ai = Arc::new(suggester(addr, Some("test-key"), Duration::from_millis(100)));
    let selector = Selector::default().with_suggester(ai);
    let cases = [
        input(),
        ClassificationInput::new("Elevated HbA1c.", &["Type 2 Diabetes Mellitus"]),
        ClassificationInput::new("Generalized fatigue.", &["Viral syndrome"]),
    ];
    for case in &cases {
        let with_ai = selector.select_detailed(case, true).await;
        let without_ai = selector.select_detailed(case, false).await;
        assert_eq!(with_ai, without_ai);
        assert_ne!(with_ai.provenance, Provenance::AiOverride);
    }
}

#[tokio::test]
async fn ai_answer_flows_through_selector() {
    let addr = fake_endpoint(Reply::Text("liver")).await;
    let ai = Arc::new(suggester(addr, Some("test-key"), Duration::from_secs(5)));
    let selector = Selector::default().with_suggester(ai);
    let result = selector.select_detailed(&input(), true).await;
    assert_eq!(result.asset, AssetId::Liver);
    assert_eq!(result.provenance, Provenance::AiOverride);
}

#[tokio::test]
async fn abandoned_call_returns_control_promptly() {
    let addr = fake_endpoint(Reply::Hang).await;
    let ai = Arc::new(suggester(addr, Some("test-key"), Duration::from_secs(10)));
    let selector = Selector::default().with_suggester(ai);
    let case = input();
    let started = Instant::now();
    let abandoned =
        tokio::time::timeout(Duration::from_millis(150), selector.select(&case, true)).await;
    assert!(abandoned.is_err());
    assert!(started.elapsed() < Duration::from_secs(2));
}
