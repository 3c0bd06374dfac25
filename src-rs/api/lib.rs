pub use crate::aggregator::{ProviderSet, TaskAggregator};
pub use crate::result::{AggregationError, TaskAggregationResult};
pub use crate::task::{TaskSource, TaskSummary, WorkspaceTask};

pub mod handlers;
pub mod server;
