//! Session state shared by every request of a client.
//!
//! The session owns the token pair and serializes refreshes: when several
//! requests hit 401 at once only the first performs a refresh, the rest wait
//! for it and retry with the new access token.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::types::TokenPair;

/// Session lifecycle, broadcast to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Tokens are present
    Active,
    /// The user logged out
    SignedOut,
    /// The refresh token was rejected; the user has to log in again
    Expired,
}

/// Persistence for the token pair.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<TokenPair>>;
    async fn save(&self, tokens: &TokenPair) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Keeps tokens for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<TokenPair>> {
        Ok(self.tokens.lock().await.clone())
    }

    async fn save(&self, tokens: &TokenPair) -> Result<()> {
        *self.tokens.lock().await = Some(tokens.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.tokens.lock().await = None;
        Ok(())
    }
}

/// Stores the token pair as JSON in a file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<TokenPair>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let tokens = serde_json::from_str(&contents).map_err(|e| {
            ClientError::Parse(format!(
                "Invalid session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(tokens))
    }

    async fn save(&self, tokens: &TokenPair) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json =
            serde_json::to_vec_pretty(tokens).map_err(|e| ClientError::Parse(e.to_string()))?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Access token as seen by a request, tagged with the session generation.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub access_token: Option<String>,
    pub generation: u64,
}

/// Shared token state with single-flight refresh.
pub struct Session {
    tokens: RwLock<Option<TokenPair>>,
    /// Bumped on every token change
    generation: AtomicU64,
    refresh_lock: Mutex<()>,
    events: watch::Sender<SessionEvent>,
    store: Option<Arc<dyn TokenStore>>,
}

impl Session {
    pub fn new(tokens: Option<TokenPair>) -> Self {
        let initial = if tokens.is_some() {
            SessionEvent::Active
        } else {
            SessionEvent::SignedOut
        };
        let (events, _) = watch::channel(initial);
        Self {
            tokens: RwLock::new(tokens),
            generation: AtomicU64::new(0),
            refresh_lock: Mutex::new(()),
            events,
            store: None,
        }
    }

    /// Restore the session from `store` and keep it in sync from now on.
    pub async fn with_store(store: Arc<dyn TokenStore>) -> Result<Self> {
        let tokens = store.load().await?;
        if tokens.is_some() {
            debug!("Restored saved session");
        }
        let mut session = Self::new(tokens);
        session.store = Some(store);
        Ok(session)
    }

    /// Watch session changes (e.g. to send the user back to login on expiry).
    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    pub async fn tokens(&self) -> Option<TokenPair> {
        self.tokens.read().await.clone()
    }

    pub(crate) async fn snapshot(&self) -> Snapshot {
        let tokens = self.tokens.read().await;
        Snapshot {
            access_token: tokens.as_ref().map(|t| t.access_token.clone()),
            generation: self.generation.load(Ordering::Acquire),
        }
    }

    /// Install a new token pair (login, register, refresh).
    pub async fn set_tokens(&self, tokens: TokenPair) {
        self.persist(Some(&tokens)).await;
        {
            let mut current = self.tokens.write().await;
            *current = Some(tokens);
            self.generation.fetch_add(1, Ordering::AcqRel);
        }
        self.events.send_replace(SessionEvent::Active);
    }

    /// Drop the tokens after a logout.
    pub async fn clear(&self) {
        self.drop_tokens(SessionEvent::SignedOut).await;
        info!("Logged out");
    }

    async fn expire(&self) {
        self.drop_tokens(SessionEvent::Expired).await;
    }

    async fn drop_tokens(&self, event: SessionEvent) {
        {
            let mut current = self.tokens.write().await;
            *current = None;
            self.generation.fetch_add(1, Ordering::AcqRel);
        }
        self.persist(None).await;
        self.events.send_replace(event);
    }

    // Store failures never break the in-memory session.
    async fn persist(&self, tokens: Option<&TokenPair>) {
        let Some(store) = &self.store else {
            return;
        };
        let result = match tokens {
            Some(tokens) => store.save(tokens).await,
            None => store.clear().await,
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist session");
        }
    }

    /// Refresh the access token after a request sent with `seen_generation`
    /// was rejected with 401.
    ///
    /// If the tokens changed since that request was sent, another request
    /// already refreshed (or the session ended) and `refresh` is not called.
    /// When the refresh fails, or there is no refresh token, the session is
    /// expired and the error returned.
    pub(crate) async fn refresh_after_unauthorized<F, Fut>(
        &self,
        seen_generation: u64,
        refresh: F,
    ) -> Result<()>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<TokenPair>>,
    {
        let _guard = self.refresh_lock.lock().await;

        if self.generation.load(Ordering::Acquire) != seen_generation {
            debug!("Tokens changed while waiting, skipping refresh");
            return if self.is_authenticated().await {
                Ok(())
            } else {
                Err(ClientError::AuthRequired)
            };
        }

        let refresh_token = self
            .tokens
            .read()
            .await
            .as_ref()
            .and_then(|t| t.refresh_token.clone());
        let Some(refresh_token) = refresh_token else {
            warn!("Access token rejected and no refresh token available");
            self.expire().await;
            return Err(ClientError::AuthRequired);
        };

        match refresh(refresh_token).await {
            Ok(tokens) => {
                self.set_tokens(tokens).await;
                info!("Access token refreshed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, session expired");
                self.expire().await;
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .field("state", &*self.events.borrow())
            .finish_non_exhaustive()
    }
}
