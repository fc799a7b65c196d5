//! Helpernote Client
//!
//! HTTP client library for the Helpernote job-matching API.
//!
//! # Features
//!
//! - **Authentication**: login, registration, password reset
//! - **Session**: token persistence and a single shared refresh on 401
//! - **Resources**: customers, job postings, job seekings, matchings, tags, files
//! - **Settlements**: fee collection view derived from postings
//! - **Retry**: exponential backoff for reads on network errors and 5xx
//!
//! # Example
//!
//! ```ignore
//! use helpernote_client::{ClientConfig, HelpernoteClient};
//! use helpernote_core::MatchingQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HelpernoteClient::new(ClientConfig::new("https://api.helpernote.example"))?;
//!
//!     let user = client.login("manager", "password").await?;
//!     println!("Logged in as {}", user.username);
//!
//!     let matchings = client.matchings().list(&MatchingQuery::default()).await?;
//!     for matching in matchings {
//!         let fees = matching.fees()?;
//!         println!("#{}: {}", matching.id, fees.total());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod customers;
mod envelope;
mod error;
mod files;
mod job_postings;
mod job_seekings;
mod matchings;
mod profile;
mod retry;
mod session;
mod settlements;
mod tags;
mod transport;
mod types;

// Re-export main types
pub use client::HelpernoteClient;
pub use error::{ClientError, Result};
pub use retry::{retry_with_backoff, retry_with_backoff_if, RetryPolicy};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionEvent, TokenStore};
pub use types::{
    AuthResponse, ClientConfig, ForgotPasswordRequest, LoginRequest, MessageResponse,
    RefreshTokenRequest, RegisterRequest, TokenPair,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use customers::CustomersClient;
pub use files::FilesClient;
pub use job_postings::JobPostingsClient;
pub use job_seekings::JobSeekingsClient;
pub use matchings::MatchingsClient;
pub use profile::ProfileClient;
pub use settlements::SettlementsClient;
pub use tags::TagsClient;
