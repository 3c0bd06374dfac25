use serde::{Deserialize, Serialize};

use crate::task::{TaskSource, TaskSummary, WorkspaceTask};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationError {
    pub provider: TaskSource,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskAggregationResult {
    pub tasks: Vec<WorkspaceTask>,
    pub summary: TaskSummary,
    pub errors: Vec<AggregationError>,
}
