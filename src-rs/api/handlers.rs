use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::aggregator::TaskAggregator;
use crate::result::TaskAggregationResult;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<TaskAggregator>,
    pub default_user: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TasksQuery {
    pub user_email: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TasksRequest {
    pub user_email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksResponse {
    pub user_email: String,
    #[serde(flatten)]
    pub result: TaskAggregationResult,
}

pub async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

pub async fn handle_tasks(State(state): State<AppState>, Query(query): Query<TasksQuery>) -> Response {
    let user_email = resolve_user(query.user_email.as_deref(), None, &state.default_user);
    respond(&state, user_email).await
}

pub async fn handle_tasks_post(
    State(state): State<AppState>,
    Query(query): Query<TasksQuery>,
    body: Option<Json<TasksRequest>>,
) -> Response {
    let from_body = body.as_ref().and_then(|Json(req)| req.user_email.as_deref());
    let user_email = resolve_user(query.user_email.as_deref(), from_body, &state.default_user);
    respond(&state, user_email).await
}

async fn respond(state: &AppState, user_email: String) -> Response {
    let outcome = state.aggregator.aggregate(&user_email).await;
    match outcome {
        Ok(result) => (StatusCode::OK, Json(TasksResponse { user_email, result })).into_response(),
        Err(err) => {
            tracing::error!(user_email = %user_email, error = %err, "failed to aggregate workspace tasks");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": err.to_string()})),
            )
                .into_response()
        }
    }
}

/// Query parameter first, then request body, then the delegated user.
fn resolve_user(from_query: Option<&str>, from_body: Option<&str>, default_user: &str) -> String {
    [from_query, from_body]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(default_user)
        .to_string()
}
