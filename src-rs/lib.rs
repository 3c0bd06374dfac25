pub mod aggregator;
pub mod config;
pub mod helpers;
pub mod result;

#[path = "task/lib.rs"]
pub mod task;
#[path = "providers/lib.rs"]
pub mod providers;
#[path = "auth/lib.rs"]
pub mod auth;
#[path = "api/lib.rs"]
pub mod api;

pub use aggregator::{ProviderSet, TaskAggregator};
pub use config::WorkspaceConfig;
pub use result::{AggregationError, TaskAggregationResult};
