use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use http::{Method, Request};
use http_body_util::BodyExt;
use insight_gateway::api::INSIGHT_SOURCE_HEADER;
use insight_gateway::insights::{catalog, Insight, SafetyRating, SeniorScore};
use insight_gateway::{build_app, AppState, GroqClient, ProviderConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Clone)]
enum Reply {
    Content(String),
    Status(u16),
    Slow(Duration),
}

#[derive(Clone)]
struct MockGroq {
    reply: Reply,
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
    last_auth: Arc<Mutex<Option<String>>>,
}

async fn mock_chat_completions(
    State(mock): State<MockGroq>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    *mock.last_body.lock().unwrap() = Some(body);
    *mock.last_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let content = match mock.reply {
        Reply::Content(content) => content,
        Reply::Status(code) => {
            return (
                StatusCode::from_u16(code).unwrap(),
                Json(json!({"error": {"message": "upstream exploded"}})),
            );
        }
        Reply::Slow(delay) => {
            tokio::time::sleep(delay).await;
            "{}".to_string()
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })),
    )
}

async fn spawn_mock_groq(reply: Reply) -> (String, MockGroq) {
    let mock = MockGroq {
        reply,
        hits: Arc::new(AtomicUsize::new(0)),
        last_body: Arc::new(Mutex::new(None)),
        last_auth: Arc::new(Mutex::new(None)),
    };
    let app = Router::new()
        .route("/openai/v1/chat/completions", post(mock_chat_completions))
        .with_state(mock.clone());
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/openai/v1", addr), mock)
}

fn build_test_app(base_url: &str, api_key: Option<&str>) -> Router {
    let client = GroqClient::new(ProviderConfig {
        api_key: api_key.map(str::to_string),
        base_url: base_url.to_string(),
        model: "test-model".to_string(),
        timeout_ms: 500,
    });
    build_app(AppState::new(Arc::new(client), 16 * 1024))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn e2e_valid_model_output_is_returned_unchanged() {
    let model_output = json!({
        "score": 91,
        "justification": "Flat colonial center, excellent private hospitals and a big expat network."
    });
    let (base_url, mock) = spawn_mock_groq(Reply::Content(model_output.to_string())).await;
    let app = build_test_app(&base_url, Some("gsk_test"));

    let response = app
        .oneshot(post_json(SeniorScore::ROUTE, json!({"city": "Merida"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[INSIGHT_SOURCE_HEADER], "model");
    assert_eq!(json_body(response).await, model_output);

    assert_eq!(mock.hits.load(Ordering::SeqCst), 1);
    assert_eq!(
        mock.last_auth.lock().unwrap().as_deref(),
        Some("Bearer gsk_test")
    );
    let sent = mock.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(sent["model"], "test-model");
    assert_eq!(sent["response_format"]["type"], "json_object");
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(
        sent["messages"][1]["content"],
        "Score Merida for Senior Comfort, Accessibility & Safety."
    );
}

#[tokio::test]
async fn e2e_safety_out_of_range_output_returns_fallback() {
    let bad = json!({
        "safetyScore": 150,
        "safetyLevel": "Totally Fine",
        "crimeProfile": "...",
        "recommendations": "..."
    });
    let (base_url, _mock) = spawn_mock_groq(Reply::Content(bad.to_string())).await;
    let app = build_test_app(&base_url, Some("gsk_test"));

    let response = app
        .oneshot(post_json(SafetyRating::ROUTE, json!({"city": "Pitillal"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[INSIGHT_SOURCE_HEADER], "fallback");
    let body = json_body(response).await;
    assert_eq!(body, serde_json::to_value(SafetyRating::fallback()).unwrap());
    assert_eq!(body["safetyScore"], 75);
    assert_eq!(body["safetyLevel"], "Safe");
}

#[tokio::test]
async fn e2e_every_endpoint_rejects_missing_fields_without_calling_upstream() {
    let (base_url, mock) = spawn_mock_groq(Reply::Content("{}".to_string())).await;
    let app = build_test_app(&base_url, Some("gsk_test"));

    for info in catalog() {
        let response = app
            .clone()
            .oneshot(post_json(info.route, json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", info.route);
        let body = json_body(response).await;
        assert_eq!(
            body["error"],
            format!("Missing {} parameter in request body.", info.required[0]),
            "{}",
            info.route
        );
    }

    assert_eq!(mock.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_every_endpoint_falls_back_on_schema_violation() {
    let (base_url, mock) =
        spawn_mock_groq(Reply::Content(r#"{"unexpected": true}"#.to_string())).await;
    let app = build_test_app(&base_url, Some("gsk_test"));

    let catalog = catalog();
    for info in &catalog {
        let body: serde_json::Map<String, Value> = info
            .required
            .iter()
            .map(|field| (field.to_string(), json!("70")))
            .collect();

        let response = app
            .clone()
            .oneshot(post_json(info.route, Value::Object(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", info.route);
        assert_eq!(
            response.headers()[INSIGHT_SOURCE_HEADER],
            "fallback",
            "{}",
            info.route
        );
        let body = json_body(response).await;
        assert!(body.get("unexpected").is_none(), "{}", info.route);
    }

    assert_eq!(mock.hits.load(Ordering::SeqCst), catalog.len());
}

#[tokio::test]
async fn e2e_missing_credential_returns_503_without_calling_upstream() {
    let (base_url, mock) = spawn_mock_groq(Reply::Content("{}".to_string())).await;
    let app = build_test_app(&base_url, None);

    let response = app
        .oneshot(post_json(SeniorScore::ROUTE, json!({"city": "Merida"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("GROQ_API_KEY"));
    assert_eq!(mock.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_non_json_model_output_returns_500() {
    let (base_url, _mock) =
        spawn_mock_groq(Reply::Content("I'd rate Merida about 85/100.".to_string())).await;
    let app = build_test_app(&base_url, Some("gsk_test"));

    let response = app
        .oneshot(post_json(SafetyRating::ROUTE, json!({"city": "Merida"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("AI service returned invalid JSON"));
}

#[tokio::test]
async fn e2e_upstream_error_status_returns_500() {
    let (base_url, _mock) = spawn_mock_groq(Reply::Status(502)).await;
    let app = build_test_app(&base_url, Some("gsk_test"));

    let response = app
        .oneshot(post_json(SeniorScore::ROUTE, json!({"city": "Merida"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("(502)"));
}

#[tokio::test]
async fn e2e_slow_upstream_times_out_with_500() {
    let (base_url, _mock) = spawn_mock_groq(Reply::Slow(Duration::from_secs(3))).await;
    let app = build_test_app(&base_url, Some("gsk_test"));

    let response = app
        .oneshot(post_json(SeniorScore::ROUTE, json!({"city": "Merida"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn e2e_malformed_request_body_returns_400() {
    let app = build_test_app("http://127.0.0.1:1/openai/v1", Some("gsk_test"));

    let request = Request::builder()
        .method(Method::POST)
        .uri(SeniorScore::ROUTE)
        .header("content-type", "application/json")
        .body(Body::from("{\"city\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn e2e_health_and_catalog_routes() {
    let app = build_test_app("http://127.0.0.1:1/openai/v1", None);

    let response = app.clone().oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"status": "ok", "providerConfigured": false})
    );

    let response = app.oneshot(get("/api/insights")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let insights = body["insights"].as_array().unwrap();
    assert_eq!(insights.len(), 12);
    assert!(insights
        .iter()
        .any(|entry| entry["route"] == "/api/safety_rating" && entry["required"] == json!(["city"])));
}

#[tokio::test]
async fn e2e_404_fallback_path_returns_not_found() {
    let app = build_test_app("http://127.0.0.1:1/openai/v1", None);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({"error": "Not found"}));
}
