pub mod summary;
pub mod types;

pub use summary::{parse_due, summarize, summarize_at};
pub use types::{TaskSource, TaskSummary, WorkspaceTask};
