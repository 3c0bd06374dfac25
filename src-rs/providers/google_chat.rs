use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::client::WorkspaceClient;
use super::types::{ProviderError, TaskProvider};
use crate::task::{TaskSource, WorkspaceTask};

const CHAT_WEB_BASE: &str = "https://chat.google.com/";
const MAX_SPACES: u32 = 50;

#[derive(Debug, Deserialize)]
struct SpacesResponse {
    #[serde(default)]
    spaces: Vec<SpaceRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpaceRecord {
    name: Option<String>,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatTasksResponse {
    #[serde(default)]
    tasks: Vec<ChatTaskRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatTaskRecord {
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    state: Option<String>,
    due_date_time: Option<String>,
    create_time: Option<String>,
    update_time: Option<String>,
    thread: Option<ThreadRef>,
    assignee: Option<Value>,
    creator: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ThreadRef {
    name: Option<String>,
}

/// Chat tasks assigned to the target user, gathered space by space.
pub struct GoogleChatProvider;

#[async_trait]
impl TaskProvider for GoogleChatProvider {
    async fn fetch(
        &self,
        client: &WorkspaceClient,
        user_email: &str,
    ) -> Result<Vec<WorkspaceTask>, ProviderError> {
        let base = &client.endpoints().chat;
        let spaces: SpacesResponse = client
            .get_json(base, "/v1/spaces", &[("pageSize", MAX_SPACES.to_string())])
            .await?;

        let assignee = format!("users/{}", user_email);
        let mut tasks = Vec::new();
        for space in &spaces.spaces {
            let space_name = match space.name.as_deref() {
                Some(name) if !name.is_empty() => name,
                _ => continue,
            };
            let path = format!("/v1/{}/tasks", space_name);
            let query = [("assignee", assignee.clone())];
            // Spaces without the tasks API or without access contribute nothing.
            match client.get_json::<ChatTasksResponse>(base, &path, &query).await {
                Ok(resp) => tasks.extend(map_tasks(space, resp.tasks)),
                Err(err) => {
                    tracing::debug!(space = space_name, error = %err, "skipping chat space");
                }
            }
        }
        Ok(tasks)
    }
}

fn map_tasks(space: &SpaceRecord, records: Vec<ChatTaskRecord>) -> Vec<WorkspaceTask> {
    records
        .into_iter()
        .filter_map(|record| {
            let name = record.name.filter(|name| !name.is_empty())?;
            let mut task = WorkspaceTask::new(
                name,
                record.title.unwrap_or_else(|| "Chat task".to_string()),
                TaskSource::ChatTask,
            );
            task.link = record
                .thread
                .and_then(|thread| thread.name)
                .filter(|name| !name.is_empty())
                .map(|name| thread_link(&name));
            task.due = record.due_date_time;
            task.created_time = record.create_time;
            task.updated_time = record.update_time;
            task.status = record.state;
            task.description = record.description;

            let mut metadata = Map::new();
            metadata.insert(
                "space".to_string(),
                json!({ "name": space.name, "displayName": space.display_name }),
            );
            metadata.insert("assignee".to_string(), record.assignee.unwrap_or(Value::Null));
            metadata.insert("creator".to_string(), record.creator.unwrap_or(Value::Null));
            task.metadata = Some(metadata);
            Some(task)
        })
        .collect()
}

/// `spaces/AAA/threads/BBB` becomes `https://chat.google.com/AAA/BBB`.
fn thread_link(thread_name: &str) -> String {
    let path = thread_name.replacen("spaces/", "", 1).replacen("/threads/", "/", 1);
    format!("{}{}", CHAT_WEB_BASE, path)
}
