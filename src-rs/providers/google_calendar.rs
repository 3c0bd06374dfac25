use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::client::WorkspaceClient;
use super::types::{ProviderError, TaskProvider};
use crate::task::{TaskSource, WorkspaceTask};

const WINDOW_DAYS: i64 = 30;
const MAX_EVENTS: u32 = 100;
const PENDING_RESPONSE: &str = "needsAction";

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    items: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    status: Option<String>,
    html_link: Option<String>,
    created: Option<String>,
    updated: Option<String>,
    organizer: Option<Organizer>,
    start: Option<Value>,
    end: Option<EventTime>,
    #[serde(default)]
    attendees: Vec<Attendee>,
}

#[derive(Debug, Deserialize)]
struct Organizer {
    email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Attendee {
    email: Option<String>,
    response_status: Option<String>,
}

/// Upcoming primary-calendar invitations the target user has not answered.
pub struct GoogleCalendarProvider;

#[async_trait]
impl TaskProvider for GoogleCalendarProvider {
    async fn fetch(
        &self,
        client: &WorkspaceClient,
        user_email: &str,
    ) -> Result<Vec<WorkspaceTask>, ProviderError> {
        let now = Utc::now();
        let events: EventsResponse = client
            .get_json(
                &client.endpoints().calendar,
                "/calendar/v3/calendars/primary/events",
                &window_query(now),
            )
            .await?;
        Ok(pending_invitations(events.items, user_email))
    }
}

fn window_query(now: DateTime<Utc>) -> [(&'static str, String); 5] {
    let time_max = now + Duration::days(WINDOW_DAYS);
    [
        ("timeMin", now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ("timeMax", time_max.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ("singleEvents", "true".to_string()),
        ("orderBy", "startTime".to_string()),
        ("maxResults", MAX_EVENTS.to_string()),
    ]
}

fn pending_invitations(events: Vec<EventRecord>, user_email: &str) -> Vec<WorkspaceTask> {
    let target = user_email.to_lowercase();
    events
        .into_iter()
        .filter(|event| {
            event.attendees.iter().any(|attendee| {
                attendee
                    .email
                    .as_deref()
                    .is_some_and(|email| email.to_lowercase() == target)
                    && attendee.response_status.as_deref() == Some(PENDING_RESPONSE)
            })
        })
        .filter_map(|event| {
            let id = event.id.filter(|id| !id.is_empty())?;
            let mut task = WorkspaceTask::new(
                id,
                event.summary.unwrap_or_else(|| "Calendar task".to_string()),
                TaskSource::CalendarTask,
            );
            task.link = event.html_link;
            task.due = event.end.as_ref().and_then(end_as_due);
            task.created_time = event.created;
            task.updated_time = event.updated;
            task.status = event.status;
            task.description = event.description;

            let mut metadata = Map::new();
            metadata.insert(
                "organizer".to_string(),
                json!(event.organizer.and_then(|o| o.email)),
            );
            metadata.insert("start".to_string(), event.start.unwrap_or(Value::Null));
            metadata.insert("end".to_string(), json!(event.end));
            task.metadata = Some(metadata);
            Some(task)
        })
        .collect()
}

/// Timed events end at `dateTime`; all-day events at UTC midnight of `date`.
fn end_as_due(end: &EventTime) -> Option<String> {
    if let Some(date_time) = end.date_time.as_ref().filter(|v| !v.is_empty()) {
        return Some(date_time.clone());
    }
    let date = NaiveDate::parse_from_str(end.date.as_deref()?, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(midnight.to_rfc3339_opts(SecondsFormat::Millis, true))
}
