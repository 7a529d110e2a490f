//! Route handlers

use super::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use niagate_domain::tool::{
    entities::ToolCall,
    value_objects::{ToolError, ToolResult},
};
use serde_json::{Value, json};

/// Incoming header reused as the tool call's correlation id
const X_REQUEST_ID: &str = "x-request-id";

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<Value>> {
    Json(state.schema.all_tools_schema(state.executor.tool_spec()))
}

/// HTTP status for a tool outcome.
pub fn status_for(result: &ToolResult) -> StatusCode {
    match result.error() {
        None => StatusCode::OK,
        Some(error) => match error.code.as_str() {
            ToolError::INVALID_ARGUMENT => StatusCode::BAD_REQUEST,
            ToolError::NOT_FOUND => StatusCode::NOT_FOUND,
            ToolError::UPSTREAM_ERROR => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

fn respond(result: ToolResult) -> Response {
    (status_for(&result), Json(result)).into_response()
}

pub async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => value,
            Err(e) => {
                return respond(ToolResult::failure(
                    &name,
                    ToolError::invalid_argument(format!("Request body is not valid JSON: {}", e)),
                ));
            }
        }
    };

    let mut call = match ToolCall::from_json(&name, arguments) {
        Ok(call) => call,
        Err(message) => {
            return respond(ToolResult::failure(
                &name,
                ToolError::invalid_argument(message),
            ));
        }
    };
    if let Some(id) = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        call = call.with_correlation_id(id);
    }

    respond(state.executor.execute(&call).await)
}
