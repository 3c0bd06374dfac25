use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::aggregator::TaskAggregator;
use crate::api::handlers::{handle_health, handle_tasks, handle_tasks_post, AppState};

pub struct TaskServer {
    pub port: u16,
    pub state: AppState,
}

impl TaskServer {
    pub fn new(port: u16, aggregator: Arc<TaskAggregator>, default_user: &str) -> Self {
        Self {
            port,
            state: AppState {
                aggregator,
                default_user: default_user.to_string(),
            },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handle_health))
            .route("/tasks", get(handle_tasks).post(handle_tasks_post))
            .with_state(self.state.clone())
    }

    pub async fn start(&self) -> Result<(), String> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!(%addr, "workspace-tasks listening");
        axum::Server::bind(&addr)
            .serve(self.router().into_make_service())
            .await
            .map_err(|err| err.to_string())
    }
}
