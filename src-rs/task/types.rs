use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskSource {
    TaskList,
    DocumentActionItem,
    ChatTask,
    CalendarTask,
}

impl TaskSource {
    /// Declared order; merged results and summaries follow it.
    pub const ALL: [TaskSource; 4] = [
        TaskSource::TaskList,
        TaskSource::DocumentActionItem,
        TaskSource::ChatTask,
        TaskSource::CalendarTask,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskSource::TaskList => "TaskList",
            TaskSource::DocumentActionItem => "DocumentActionItem",
            TaskSource::ChatTask => "ChatTask",
            TaskSource::CalendarTask => "CalendarTask",
        }
    }
}

impl fmt::Display for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceTask {
    pub id: String,
    pub title: String,
    pub source: TaskSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl WorkspaceTask {
    pub fn new(id: impl Into<String>, title: impl Into<String>, source: TaskSource) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source,
            link: None,
            due: None,
            created_time: None,
            updated_time: None,
            status: None,
            description: None,
            metadata: None,
        }
    }

    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|map| map.get(key))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub by_source: BTreeMap<TaskSource, usize>,
    pub overdue: usize,
    pub due_soon: usize,
}
