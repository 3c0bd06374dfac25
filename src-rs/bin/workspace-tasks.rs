use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use workspace_tasks_rs::api::server::TaskServer;
use workspace_tasks_rs::helpers::build_aggregator;
use workspace_tasks_rs::WorkspaceConfig;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_env("WORKSPACE_TASKS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match WorkspaceConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            process::exit(1);
        }
    };
    let aggregator = match build_aggregator(&config) {
        Ok(aggregator) => Arc::new(aggregator),
        Err(err) => {
            tracing::error!(error = %err, "failed to build http client");
            process::exit(1);
        }
    };

    let server = TaskServer::new(config.port, aggregator, &config.delegated_user);
    if let Err(err) = server.start().await {
        tracing::error!(error = %err, "server error");
        process::exit(1);
    }
}
