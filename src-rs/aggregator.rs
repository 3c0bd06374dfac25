use std::sync::Arc;

use crate::auth::{AuthError, CredentialProvider};
use crate::providers::{
    GoogleCalendarProvider, GoogleChatProvider, GoogleDocsProvider, GoogleTasksProvider, ProviderError,
    TaskProvider,
};
use crate::result::{AggregationError, TaskAggregationResult};
use crate::task::{summarize, TaskSource, WorkspaceTask};

/// One provider per source; the slot, not the provider, decides which source an error is filed under.
#[derive(Clone)]
pub struct ProviderSet {
    pub task_list: Arc<dyn TaskProvider>,
    pub document_action_item: Arc<dyn TaskProvider>,
    pub chat_task: Arc<dyn TaskProvider>,
    pub calendar_task: Arc<dyn TaskProvider>,
}

impl ProviderSet {
    pub fn google() -> Self {
        Self {
            task_list: Arc::new(GoogleTasksProvider),
            document_action_item: Arc::new(GoogleDocsProvider),
            chat_task: Arc::new(GoogleChatProvider),
            calendar_task: Arc::new(GoogleCalendarProvider),
        }
    }
}

pub struct TaskAggregator {
    credentials: Arc<dyn CredentialProvider>,
    providers: ProviderSet,
}

impl TaskAggregator {
    pub fn new(credentials: Arc<dyn CredentialProvider>, providers: ProviderSet) -> Self {
        Self {
            credentials,
            providers,
        }
    }

    /// Collects tasks for `user_email` from every source.
    ///
    /// Only a credential failure fails the call. Each provider failure is
    /// reported in `errors` while the other sources still contribute.
    pub async fn aggregate(&self, user_email: &str) -> Result<TaskAggregationResult, AuthError> {
        tracing::info!(user_email, "aggregating workspace tasks");
        let client = self.credentials.authorized_client().await?;

        let (task_list, docs, chat, calendar) = tokio::join!(
            self.providers.task_list.fetch(&client, user_email),
            self.providers.document_action_item.fetch(&client, user_email),
            self.providers.chat_task.fetch(&client, user_email),
            self.providers.calendar_task.fetch(&client, user_email),
        );

        let outcomes = [
            (TaskSource::TaskList, task_list),
            (TaskSource::DocumentActionItem, docs),
            (TaskSource::ChatTask, chat),
            (TaskSource::CalendarTask, calendar),
        ];
        let (tasks, errors) = merge(outcomes);
        let summary = summarize(&tasks);

        tracing::info!(
            user_email,
            count = tasks.len(),
            failed = errors.len(),
            "aggregation finished"
        );
        Ok(TaskAggregationResult {
            tasks,
            summary,
            errors,
        })
    }
}

fn merge<I>(outcomes: I) -> (Vec<WorkspaceTask>, Vec<AggregationError>)
where
    I: IntoIterator<Item = (TaskSource, Result<Vec<WorkspaceTask>, ProviderError>)>,
{
    let mut tasks = Vec::new();
    let mut errors = Vec::new();
    for (provider, outcome) in outcomes {
        match outcome {
            Ok(items) => {
                tracing::debug!(%provider, count = items.len(), "provider succeeded");
                tasks.extend(items);
            }
            Err(err) => {
                tracing::warn!(%provider, error = %err, "provider failed");
                errors.push(AggregationError {
                    provider,
                    message: err.to_string(),
                });
            }
        }
    }
    (tasks, errors)
}
