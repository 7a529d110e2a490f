use super::*;
use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{Request, StatusCode, header::RETRY_AFTER},
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use niagate_application::{Clock, default_tool_spec};
use niagate_domain::{
    RateLimitPolicy, ToolCall, ToolDefinition, ToolError, ToolResult, ToolSpec,
};
use serde_json::{Value, json};
use std::sync::Mutex;
use tower::ServiceExt;

struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn new() -> Self {
        Self(Mutex::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()))
    }

    fn advance(&self, delta: TimeDelta) {
        *self.0.lock().unwrap() += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Executor that answers from the tool name alone.
struct FakeExecutor {
    spec: ToolSpec,
    calls: Mutex<Vec<ToolCall>>,
}

#[async_trait]
impl ToolExecutorPort for FakeExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.calls.lock().unwrap().push(call.clone());
        match self.spec.resolve(&call.tool_name) {
            None => ToolResult::failure(&call.tool_name, ToolError::not_found("tool")),
            Some("grep") => ToolResult::failure("grep", ToolError::upstream("boom")),
            Some("browse") => ToolResult::failure("browse", ToolError::config("no sources")),
            Some(name) if !call.arguments.contains_key("query") && name == "search" => {
                ToolResult::failure(name, ToolError::invalid_argument("query is required"))
            }
            Some(name) => ToolResult::success(name, json!({"ok": true})),
        }
    }
}

struct NameSchema;

impl ToolSchemaPort for NameSchema {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({"name": tool.name})
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        spec.names().into_iter().map(|n| json!({"name": n})).collect()
    }
}

struct Harness {
    clock: Arc<ManualClock>,
    executor: Arc<FakeExecutor>,
    state: AppState,
}

fn harness(max_requests: u32) -> Harness {
    let clock = Arc::new(ManualClock::new());
    let executor = Arc::new(FakeExecutor {
        spec: default_tool_spec(),
        calls: Mutex::new(Vec::new()),
    });
    let limiter = Arc::new(RateLimiter::new(
        RateLimitPolicy::new(60_000, max_requests),
        clock.clone(),
    ));
    let state = AppState::new(executor.clone(), Arc::new(NameSchema), limiter);
    Harness {
        clock,
        executor,
        state,
    }
}

fn post_tool(name: &str, body: &str, client: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/tools/{}", name))
        .header("content-type", "application/json")
        .header("x-forwarded-for", client)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_always_served() {
    let h = harness(1);
    let state = h.state.with_maintenance(Maintenance {
        enabled: true,
        retry_after_secs: 120,
    });
    let router = create_router(state);

    for _ in 0..3 {
        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }
}

#[tokio::test]
async fn test_list_tools() {
    let h = harness(10);
    let response = create_router(h.state)
        .oneshot(Request::get("/api/tools").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-ratelimit-limit"], "10");
    assert_eq!(response.headers()["x-ratelimit-remaining"], "9");

    let tools = json_body(response).await;
    assert_eq!(tools.as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_tool_status_codes() {
    let h = harness(100);
    let router = create_router(h.state);

    let cases = [
        ("search", r#"{"query": "x"}"#, StatusCode::OK),
        ("search", "{}", StatusCode::BAD_REQUEST),
        ("nope", "{}", StatusCode::NOT_FOUND),
        ("browse", "", StatusCode::INTERNAL_SERVER_ERROR),
        ("grep", r#"{"pattern": "x"}"#, StatusCode::BAD_GATEWAY),
        ("search", "[1, 2]", StatusCode::BAD_REQUEST),
        ("search", "{not json", StatusCode::BAD_REQUEST),
    ];
    for (tool, body, expected) in cases {
        let response = router
            .clone()
            .oneshot(post_tool(tool, body, "1.2.3.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), expected, "{} {}", tool, body);
    }
}

#[tokio::test]
async fn test_request_id_becomes_correlation_id() {
    let h = harness(10);
    let mut request = post_tool("semantic_search", r#"{"query": "x"}"#, "1.2.3.4");
    request
        .headers_mut()
        .insert("x-request-id", "req-42".parse().unwrap());

    let response = create_router(h.state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let calls = h.executor.calls.lock().unwrap();
    assert_eq!(calls[0].correlation_id.as_deref(), Some("req-42"));
    assert_eq!(calls[0].tool_name, "semantic_search");
}

#[tokio::test]
async fn test_eleventh_request_is_rejected_then_admitted_after_window() {
    let h = harness(10);
    let router = create_router(h.state);

    for i in 0..10 {
        let response = router
            .clone()
            .oneshot(post_tool("search", r#"{"query": "x"}"#, "1.2.3.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "request {}", i + 1);
    }

    let rejected = router
        .clone()
        .oneshot(post_tool("search", r#"{"query": "x"}"#, "1.2.3.4"))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(rejected.headers()[RETRY_AFTER], "60");
    assert_eq!(rejected.headers()["x-ratelimit-remaining"], "0");
    let reset = rejected.headers()["x-ratelimit-reset"]
        .to_str()
        .unwrap()
        .parse::<i64>()
        .unwrap();
    assert_eq!(reset, h.clock.now().timestamp() + 60);
    let body = json_body(rejected).await;
    assert_eq!(body["retry_after"], 60);
    assert!(body["reset_at"].is_string());

    // Another client is unaffected
    let other = router
        .clone()
        .oneshot(post_tool("search", r#"{"query": "x"}"#, "5.6.7.8"))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::OK);

    h.clock.advance(TimeDelta::seconds(61));
    let admitted = router
        .oneshot(post_tool("search", r#"{"query": "x"}"#, "1.2.3.4"))
        .await
        .unwrap();
    assert_eq!(admitted.status(), StatusCode::OK);
    assert_eq!(admitted.headers()["x-ratelimit-remaining"], "9");
}

#[tokio::test]
async fn test_peer_address_used_without_proxy_headers() {
    let h = harness(1);
    let router = create_router(h.state);
    let peer: SocketAddr = "10.1.1.1:5000".parse().unwrap();

    let request = |peer: SocketAddr| {
        let mut request = Request::get("/api/tools").body(Body::empty()).unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));
        request
    };

    let first = router.clone().oneshot(request(peer)).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let second = router.clone().oneshot(request(peer)).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    let other: SocketAddr = "10.1.1.2:5000".parse().unwrap();
    let third = router.oneshot(request(other)).await.unwrap();
    assert_eq!(third.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_maintenance_blocks_api_without_counting() {
    let h = harness(1);
    let limiter = h.state.limiter.clone();
    let state = h.state.with_maintenance(Maintenance {
        enabled: true,
        retry_after_secs: 120,
    });

    let response = create_router(state)
        .oneshot(post_tool("search", r#"{"query": "x"}"#, "1.2.3.4"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.headers()[RETRY_AFTER], "120");
    assert!(json_body(response).await["error"].is_string());
    assert_eq!(limiter.tracked_clients(), 0);
    assert!(h.executor.calls.lock().unwrap().is_empty());
}
