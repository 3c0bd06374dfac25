#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use workspace_tasks_rs::auth::StaticTokenCredentials;
use workspace_tasks_rs::config::ApiEndpoints;
use workspace_tasks_rs::providers::WorkspaceClient;

pub const ACCESS_TOKEN: &str = "fake-token";
pub const USER: &str = "ana@example.com";
pub const SERVICE_ACCOUNT_KEY: &str = include_str!("../fixtures/service_account_key.pem");

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub body: String,
}

/// Canned Google API responses keyed by request path.
#[derive(Clone, Default)]
pub struct FakeGoogle {
    routes: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeGoogle {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.respond(
            "/token",
            json!({"access_token": ACCESS_TOKEN, "expires_in": 3600, "token_type": "Bearer"}),
        );
        fake
    }

    pub fn respond(&self, path: &str, body: Value) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (StatusCode::OK, body));
        self
    }

    pub fn fail(&self, path: &str, status: u16, message: &str) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        let body = json!({"error": {"code": status.as_u16(), "message": message}});
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_to(&self, path: &str) -> Option<RecordedRequest> {
        self.requests().into_iter().find(|req| req.path == path)
    }

    /// Starts the fake on an ephemeral port and returns its base URL.
    pub async fn serve(&self) -> String {
        let app = Router::new().fallback(dispatch).with_state(self.clone());
        serve_router(app).await
    }
}

pub async fn serve_router(app: Router) -> String {
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    format!("http://{}", addr)
}

async fn dispatch(
    State(fake): State<FakeGoogle>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    fake.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        query: uri.query().unwrap_or_default().to_string(),
        body,
    });

    if path != "/token" {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {}", ACCESS_TOKEN));
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"code": 401, "message": "Request had invalid authentication credentials."}})),
            )
                .into_response();
        }
    }

    let route = fake.routes.lock().unwrap().get(&path).cloned();
    match route {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": 404, "message": format!("no route for {}", path)}})),
        )
            .into_response(),
    }
}

pub fn static_credentials(base_url: &str) -> StaticTokenCredentials {
    StaticTokenCredentials::new(
        reqwest::Client::new(),
        ACCESS_TOKEN.to_string(),
        ApiEndpoints::single_host(base_url),
    )
}

pub fn client(base_url: &str) -> WorkspaceClient {
    WorkspaceClient::new(reqwest::Client::new(), ACCESS_TOKEN, ApiEndpoints::single_host(base_url))
}

/// A populated fake where every source yields tasks for [`USER`].
pub fn populated() -> FakeGoogle {
    let fake = FakeGoogle::new();
    fake.respond(
        "/tasks/v1/users/@me/lists",
        json!({"items": [{"id": "work", "title": "Work"}]}),
    )
    .respond(
        "/tasks/v1/lists/work/tasks",
        json!({"items": [
            {"id": "t1", "title": "Send invoice", "status": "needsAction", "due": "2000-01-01T00:00:00.000Z"},
            {"id": "t2", "title": "Plan offsite", "status": "needsAction"}
        ]}),
    )
    .respond(
        "/drive/v3/files",
        json!({"files": [{"id": "doc1", "name": "Roadmap", "webViewLink": "https://docs.google.com/document/d/doc1/edit"}]}),
    )
    .respond(
        "/drive/v3/files/doc1/comments",
        json!({"comments": [{
            "id": "c1",
            "htmlContent": "<a data-user-email=\"ana@example.com\">+ana</a> update the timeline",
            "resolved": false
        }]}),
    )
    .respond(
        "/v1/spaces",
        json!({"spaces": [{"name": "spaces/AAA", "displayName": "Launch"}]}),
    )
    .respond(
        "/v1/spaces/AAA/tasks",
        json!({"tasks": [{"name": "spaces/AAA/tasks/x1", "title": "Book venue"}]}),
    )
    .respond(
        "/calendar/v3/calendars/primary/events",
        json!({"items": [{
            "id": "ev1",
            "summary": "Design review",
            "end": {"date": "2999-01-01"},
            "attendees": [{"email": "ana@example.com", "responseStatus": "needsAction"}]
        }]}),
    );
    fake
}
