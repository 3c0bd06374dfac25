pub mod service_account;
pub mod static_token;
pub mod types;

pub use service_account::{ServiceAccountCredentials, SCOPES};
pub use static_token::StaticTokenCredentials;
pub use types::{AuthError, CredentialProvider};
