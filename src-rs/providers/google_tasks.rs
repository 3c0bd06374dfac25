use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Map};

use super::client::WorkspaceClient;
use super::types::{ProviderError, TaskProvider};
use crate::task::{TaskSource, WorkspaceTask};

const TASK_LINK_BASE: &str = "https://tasks.google.com/embed/list";
const MAX_LISTS: u32 = 50;
const MAX_TASKS_PER_LIST: u32 = 200;

#[derive(Debug, Deserialize)]
struct TaskListsResponse {
    #[serde(default)]
    items: Vec<TaskListRecord>,
}

#[derive(Debug, Deserialize)]
struct TaskListRecord {
    id: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TasksResponse {
    #[serde(default)]
    items: Vec<TaskRecord>,
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    id: Option<String>,
    title: Option<String>,
    notes: Option<String>,
    status: Option<String>,
    due: Option<String>,
    updated: Option<String>,
    parent: Option<String>,
    position: Option<String>,
    #[serde(default)]
    deleted: bool,
}

/// Incomplete, visible tasks from every Google Tasks list of the delegated user.
pub struct GoogleTasksProvider;

#[async_trait]
impl TaskProvider for GoogleTasksProvider {
    async fn fetch(
        &self,
        client: &WorkspaceClient,
        _user_email: &str,
    ) -> Result<Vec<WorkspaceTask>, ProviderError> {
        let base = &client.endpoints().tasks;
        let lists: TaskListsResponse = client
            .get_json(
                base,
                "/tasks/v1/users/@me/lists",
                &[("maxResults", MAX_LISTS.to_string())],
            )
            .await?;

        let per_list = lists
            .items
            .iter()
            .filter_map(|list| {
                list.id
                    .as_deref()
                    .filter(|id| !id.is_empty())
                    .map(|id| (id, list.title.as_deref()))
            })
            .map(|(list_id, list_title)| async move {
                let path = format!("/tasks/v1/lists/{}/tasks", urlencoding::encode(list_id));
                let query = [
                    ("showCompleted", "false".to_string()),
                    ("showHidden", "false".to_string()),
                    ("maxResults", MAX_TASKS_PER_LIST.to_string()),
                ];
                match client.get_json::<TasksResponse>(base, &path, &query).await {
                    Ok(resp) => map_tasks(list_id, list_title, resp.items),
                    Err(err) => {
                        tracing::debug!(list_id, error = %err, "skipping task list");
                        Vec::new()
                    }
                }
            });

        Ok(join_all(per_list).await.into_iter().flatten().collect())
    }
}

fn map_tasks(list_id: &str, list_title: Option<&str>, items: Vec<TaskRecord>) -> Vec<WorkspaceTask> {
    items
        .into_iter()
        .filter(|task| !task.deleted)
        .filter_map(|task| {
            let task_id = task.id.filter(|id| !id.is_empty())?;
            let mut out = WorkspaceTask::new(
                format!("{}:{}", list_id, task_id),
                task.title.unwrap_or_else(|| "Untitled Task".to_string()),
                TaskSource::TaskList,
            );
            out.link = Some(task_link(list_id, &task_id));
            out.due = task.due;
            out.created_time = task.updated.clone();
            out.updated_time = task.updated;
            out.status = task.status;
            out.description = task.notes;

            let mut metadata = Map::new();
            metadata.insert("tasklist".to_string(), json!(list_title));
            metadata.insert("parentTaskId".to_string(), json!(task.parent));
            metadata.insert("position".to_string(), json!(task.position));
            out.metadata = Some(metadata);
            Some(out)
        })
        .collect()
}

fn task_link(list_id: &str, task_id: &str) -> String {
    format!(
        "{}/{}?task={}",
        TASK_LINK_BASE,
        urlencoding::encode(list_id),
        urlencoding::encode(task_id)
    )
}
