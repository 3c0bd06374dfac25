use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Map};

use super::client::WorkspaceClient;
use super::types::{ProviderError, TaskProvider};
use crate::task::{TaskSource, WorkspaceTask};

const DOCS_QUERY: &str = "mimeType='application/vnd.google-apps.document' and trashed=false";
const FILE_FIELDS: &str = "files(id,name,webViewLink)";
const COMMENT_FIELDS: &str = "comments(id,htmlContent,createdTime,modifiedTime,resolved,author(displayName,emailAddress),replies(id,htmlContent,createdTime,author(displayName,emailAddress)))";
const MAX_FILES: u32 = 30;
const MAX_COMMENTS: u32 = 100;
static ASSIGNEE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-user-email="([^"]+)""#).expect("valid assignee marker regex"));
static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid html tag regex"));

#[derive(Debug, Deserialize)]
struct FilesResponse {
    #[serde(default)]
    files: Vec<FileRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileRecord {
    id: Option<String>,
    name: Option<String>,
    web_view_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: Vec<CommentRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentRecord {
    id: Option<String>,
    html_content: Option<String>,
    created_time: Option<String>,
    modified_time: Option<String>,
    #[serde(default)]
    resolved: bool,
    #[serde(default)]
    replies: Vec<ReplyRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRecord {
    html_content: Option<String>,
}

/// Unresolved Docs comments that assign the target user as an action item.
pub struct GoogleDocsProvider;

#[async_trait]
impl TaskProvider for GoogleDocsProvider {
    async fn fetch(
        &self,
        client: &WorkspaceClient,
        user_email: &str,
    ) -> Result<Vec<WorkspaceTask>, ProviderError> {
        let base = &client.endpoints().drive;
        let files: FilesResponse = client
            .get_json(
                base,
                "/drive/v3/files",
                &[
                    ("q", DOCS_QUERY.to_string()),
                    ("fields", FILE_FIELDS.to_string()),
                    ("orderBy", "modifiedTime desc".to_string()),
                    ("pageSize", MAX_FILES.to_string()),
                ],
            )
            .await?;

        let target = user_email.to_lowercase();
        let mut tasks = Vec::new();
        for file in &files.files {
            let file_id = match file.id.as_deref() {
                Some(id) if !id.is_empty() => id,
                _ => continue,
            };
            let path = format!("/drive/v3/files/{}/comments", urlencoding::encode(file_id));
            let query = [
                ("fields", COMMENT_FIELDS.to_string()),
                ("includeDeleted", "false".to_string()),
                ("pageSize", MAX_COMMENTS.to_string()),
            ];
            let comments = match client.get_json::<CommentsResponse>(base, &path, &query).await {
                Ok(resp) => resp.comments,
                Err(err) => {
                    tracing::debug!(file_id, error = %err, "skipping document comments");
                    continue;
                }
            };
            tasks.extend(action_items(file_id, file, comments, &target));
        }
        Ok(tasks)
    }
}

fn action_items(
    file_id: &str,
    file: &FileRecord,
    comments: Vec<CommentRecord>,
    target: &str,
) -> Vec<WorkspaceTask> {
    let mut out = Vec::new();
    for comment in comments {
        let comment_id = match comment.id {
            Some(id) if !id.is_empty() => id,
            _ => continue,
        };
        let assigned_from_comment = mentions(comment.html_content.as_deref(), target);
        let assigned_from_reply = comment
            .replies
            .iter()
            .any(|reply| mentions(reply.html_content.as_deref(), target));
        if !(assigned_from_comment || assigned_from_reply) || comment.resolved {
            continue;
        }

        let title = comment
            .html_content
            .as_deref()
            .map(strip_tags)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "Action item".to_string());

        let mut task = WorkspaceTask::new(
            format!("{}:{}", file_id, comment_id),
            title,
            TaskSource::DocumentActionItem,
        );
        task.link = file.web_view_link.clone();
        task.created_time = comment.created_time;
        task.updated_time = comment.modified_time;
        task.status = Some(if comment.resolved { "completed" } else { "open" }.to_string());

        let mut metadata = Map::new();
        metadata.insert("documentName".to_string(), json!(file.name));
        metadata.insert("commentId".to_string(), json!(comment_id));
        metadata.insert("assignedFromComment".to_string(), json!(assigned_from_comment));
        metadata.insert("assignedFromReply".to_string(), json!(assigned_from_reply));
        task.metadata = Some(metadata);
        out.push(task);
    }
    out
}

fn mentions(html: Option<&str>, target: &str) -> bool {
    html.map(|content| {
        assignee_emails(content)
            .iter()
            .any(|email| email.to_lowercase() == target)
    })
    .unwrap_or(false)
}

/// Collects every `data-user-email="..."` value in rendered comment HTML.
pub fn assignee_emails(html: &str) -> Vec<&str> {
    ASSIGNEE_MARKER_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Drops every `<...>` tag and trims the remaining text.
pub fn strip_tags(html: &str) -> String {
    HTML_TAG_RE.replace_all(html, "").trim().to_string()
}
