pub mod client;
pub mod google_calendar;
pub mod google_chat;
pub mod google_docs;
pub mod google_tasks;
pub mod types;

pub use client::WorkspaceClient;
pub use google_calendar::GoogleCalendarProvider;
pub use google_chat::GoogleChatProvider;
pub use google_docs::GoogleDocsProvider;
pub use google_tasks::GoogleTasksProvider;
pub use types::{ProviderError, TaskProvider};
