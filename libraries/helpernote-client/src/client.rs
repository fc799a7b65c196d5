//! Main Helpernote client.

use crate::auth::AuthClient;
use crate::customers::CustomersClient;
use crate::envelope::item;
use crate::error::{ClientError, Result};
use crate::files::FilesClient;
use crate::job_postings::JobPostingsClient;
use crate::job_seekings::JobSeekingsClient;
use crate::matchings::MatchingsClient;
use crate::profile::ProfileClient;
use crate::session::{Session, SessionEvent, TokenStore};
use crate::settlements::SettlementsClient;
use crate::tags::TagsClient;
use crate::transport::Transport;
use crate::types::{AuthResponse, ClientConfig, ForgotPasswordRequest, RegisterRequest};
use helpernote_core::User;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Main client for the Helpernote API.
///
/// Owns the HTTP connection pool and the session. Resource clients borrow
/// from it and share its token refresh.
///
/// # Example
///
/// ```ignore
/// use helpernote_client::{ClientConfig, HelpernoteClient};
///
/// let client = HelpernoteClient::new(ClientConfig::new("https://api.helpernote.example"))?;
/// let user = client.login("manager", "password").await?;
///
/// let customers = client.customers().list(&Default::default()).await?;
/// println!("{} has {} customers", user.username, customers.total);
/// ```
pub struct HelpernoteClient {
    transport: Transport,
}

impl HelpernoteClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let session = Session::new(config.tokens.clone());
        Self::build(config, session)
    }

    /// Create a client whose session is restored from and saved to `store`.
    ///
    /// Tokens passed in `config` take precedence over stored ones.
    pub async fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let session = Session::with_store(store).await?;
        if let Some(tokens) = config.tokens.clone() {
            session.set_tokens(tokens).await;
        }
        Self::build(config, session)
    }

    fn build(config: ClientConfig, session: Session) -> Result<Self> {
        let url = normalize_url(&config.url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Helpernote/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            transport: Transport::new(http, url, Arc::new(session), config.retry),
        })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn session(&self) -> &Arc<Session> {
        self.transport.session()
    }

    /// Check if the client holds an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.session().is_authenticated().await
    }

    /// Subscribe to login, logout and expiry.
    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.session().subscribe()
    }

    fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self.transport.http(), self.transport.base_url())
    }

    /// Login with username and password.
    ///
    /// On success the token pair is stored for subsequent requests.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let response = self.auth().login(username, password).await?;
        Ok(self.start_session(response).await)
    }

    /// Register a new account and sign in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let response = self.auth().register(request).await?;
        Ok(self.start_session(response).await)
    }

    async fn start_session(&self, response: AuthResponse) -> User {
        self.session().set_tokens(response.token_pair()).await;
        response.user
    }

    /// Reset a password using the security question.
    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<String> {
        self.auth().forgot_password(request).await
    }

    /// Log out. The server is told once, on a best-effort basis and without
    /// refreshing a rejected token; the local session is cleared regardless.
    pub async fn logout(&self) {
        if self.is_authenticated().await {
            if let Err(e) = self.transport.post_without_refresh("/api/auth/logout").await {
                debug!(error = %e, "Server logout failed, clearing session anyway");
            }
        }
        self.session().clear().await;
    }

    /// The signed-in user.
    pub async fn me(&self) -> Result<User> {
        let value = self.transport.get("/api/auth/me").await?;
        if value.get("user").is_some() {
            item(value, "user")
        } else {
            serde_json::from_value(value)
                .map_err(|e| ClientError::Parse(format!("Failed to parse user: {}", e)))
        }
    }

    /// Refresh the access token now instead of waiting for a 401.
    pub async fn refresh_token(&self) -> Result<()> {
        let refresh_token = self
            .session()
            .tokens()
            .await
            .and_then(|t| t.refresh_token)
            .ok_or(ClientError::AuthRequired)?;
        let response = self.auth().refresh_token(&refresh_token).await?;
        self.session().set_tokens(response.token_pair()).await;
        info!("Access token refreshed");
        Ok(())
    }

    pub fn customers(&self) -> CustomersClient<'_> {
        CustomersClient::new(&self.transport)
    }

    pub fn job_postings(&self) -> JobPostingsClient<'_> {
        JobPostingsClient::new(&self.transport)
    }

    pub fn job_seekings(&self) -> JobSeekingsClient<'_> {
        JobSeekingsClient::new(&self.transport)
    }

    pub fn matchings(&self) -> MatchingsClient<'_> {
        MatchingsClient::new(&self.transport)
    }

    pub fn settlements(&self) -> SettlementsClient<'_> {
        SettlementsClient::new(&self.transport)
    }

    pub fn tags(&self) -> TagsClient<'_> {
        TagsClient::new(&self.transport)
    }

    pub fn files(&self) -> FilesClient<'_> {
        FilesClient::new(&self.transport)
    }

    pub fn profile(&self) -> ProfileClient<'_> {
        ProfileClient::new(&self.transport)
    }
}

fn normalize_url(url: &str) -> Result<String> {
    if url.trim().is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = url.trim().trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

    Ok(url)
}
