//! Admission middleware: maintenance gate, then the per-client rate limiter.

use super::AppState;
use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::RETRY_AFTER},
    middleware::Next,
    response::{IntoResponse, Response},
};
use niagate_domain::{ClientKey, RateLimitDecision};
use serde_json::json;
use std::net::SocketAddr;

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Reject everything with 503 while maintenance mode is on.
pub async fn maintenance_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.maintenance.enabled {
        return next.run(request).await;
    }

    let mut response = (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "error": "The service is temporarily down for maintenance. Please try again later.",
            "retry_after": state.maintenance.retry_after_secs,
        })),
    )
        .into_response();
    response
        .headers_mut()
        .insert(RETRY_AFTER, HeaderValue::from(state.maintenance.retry_after_secs));
    response
}

/// Client identity: first `X-Forwarded-For` hop, then `X-Real-IP`, then the peer.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> ClientKey {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    ClientKey::resolve(header(X_FORWARDED_FOR), header(X_REAL_IP), peer)
}

fn insert_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(
        X_RATELIMIT_RESET,
        HeaderValue::from(decision.reset_at.timestamp().max(0)),
    );
}

/// Admit or reject the request against the client's current window.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(request.headers(), peer);
    let decision = state.limiter.check(&key);

    if decision.allowed {
        let mut response = next.run(request).await;
        insert_limit_headers(response.headers_mut(), &decision);
        return response;
    }

    let retry_after = decision.retry_after_secs(state.limiter.now());
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({
            "error": "Too many requests. Please wait before trying again.",
            "retry_after": retry_after,
            "reset_at": decision.reset_at.to_rfc3339(),
        })),
    )
        .into_response();
    let headers = response.headers_mut();
    headers.insert(RETRY_AFTER, HeaderValue::from(retry_after));
    insert_limit_headers(headers, &decision);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("1.2.3.4, 10.0.0.1"));
        headers.insert(X_REAL_IP, HeaderValue::from_static("5.6.7.8"));
        let peer: SocketAddr = "9.9.9.9:1234".parse().unwrap();
        assert_eq!(client_key(&headers, Some(peer)).as_str(), "1.2.3.4");
    }

    #[test]
    fn test_client_key_falls_back_to_peer() {
        let peer: SocketAddr = "9.9.9.9:1234".parse().unwrap();
        assert_eq!(client_key(&HeaderMap::new(), Some(peer)).as_str(), "9.9.9.9");
        assert_eq!(client_key(&HeaderMap::new(), None).as_str(), "unknown");
    }
}
