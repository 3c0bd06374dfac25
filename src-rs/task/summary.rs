use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::types::{TaskSource, TaskSummary, WorkspaceTask};

const DUE_SOON_DAYS: i64 = 3;

/// Summarizes against the current time, read once for the whole batch.
pub fn summarize(tasks: &[WorkspaceTask]) -> TaskSummary {
    summarize_at(tasks, Utc::now())
}

pub fn summarize_at(tasks: &[WorkspaceTask], now: DateTime<Utc>) -> TaskSummary {
    let mut by_source: BTreeMap<TaskSource, usize> =
        TaskSource::ALL.iter().map(|source| (*source, 0)).collect();
    let horizon = now + Duration::days(DUE_SOON_DAYS);
    let mut overdue = 0;
    let mut due_soon = 0;

    for task in tasks {
        *by_source.entry(task.source).or_insert(0) += 1;

        let due = match task.due.as_deref().and_then(parse_due) {
            Some(due) => due,
            None => continue,
        };
        if due < now {
            overdue += 1;
        } else if due <= horizon {
            due_soon += 1;
        }
    }

    TaskSummary {
        total: tasks.len(),
        by_source,
        overdue,
        due_soon,
    }
}

/// Accepts RFC 3339 timestamps and bare dates (UTC midnight).
pub fn parse_due(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
