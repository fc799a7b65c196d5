//! Authenticated request path.
//!
//! Every request carries the current access token. A 401 triggers one
//! refresh through the [`Session`] and one retry of the original request; a
//! second 401, or a failed refresh, surfaces the original error.

use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::{check_status, AuthClient};
use crate::error::{ClientError, Result};
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::session::Session;
use crate::types::TokenPair;

pub(crate) struct Transport {
    http: Client,
    base_url: String,
    session: Arc<Session>,
    retry: RetryPolicy,
}

impl Transport {
    pub(crate) fn new(
        http: Client,
        base_url: String,
        session: Arc<Session>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            base_url,
            session,
            retry,
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request produced by `build` with the bearer token attached.
    ///
    /// `build` runs once per attempt, so it must be able to recreate the
    /// request (multipart bodies included).
    pub(crate) async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> Result<RequestBuilder>,
    {
        let mut retried = false;
        loop {
            let snapshot = self.session.snapshot().await;
            let access_token = snapshot.access_token.ok_or(ClientError::AuthRequired)?;

            let response = build(&self.http)?
                .bearer_auth(&access_token)
                .send()
                .await
                .map_err(ClientError::from_transport)?;

            if response.status() != StatusCode::UNAUTHORIZED {
                return check_status(response).await;
            }

            let rejected = match check_status(response).await {
                Err(e) => e,
                Ok(_) => ClientError::Unauthorized(String::new()),
            };

            if retried {
                warn!("Request rejected again after token refresh");
                return Err(rejected);
            }
            retried = true;

            warn!("Access token rejected, attempting refresh");
            let refreshed = self
                .session
                .refresh_after_unauthorized(snapshot.generation, |refresh_token| {
                    self.refresh(refresh_token)
                })
                .await;
            if refreshed.is_err() {
                return Err(rejected);
            }
        }
    }

    async fn refresh(&self, refresh_token: String) -> Result<TokenPair> {
        let response = AuthClient::new(&self.http, &self.base_url)
            .refresh_token(&refresh_token)
            .await?;
        Ok(response.token_pair())
    }

    /// GET with retry on network errors and 5xx.
    pub(crate) async fn get(&self, path: &str) -> Result<Value> {
        self.get_with(path, |request| request).await
    }

    /// GET with `query` serialized into the query string.
    pub(crate) async fn get_query<Q>(&self, path: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized + Sync,
    {
        self.get_with(path, |request| request.query(query)).await
    }

    async fn get_with<F>(&self, path: &str, apply: F) -> Result<Value>
    where
        F: Fn(RequestBuilder) -> RequestBuilder + Sync,
    {
        let url = self.url(path);
        debug!(method = "GET", path = %path, "Request");
        let url = &url;
        let apply = &apply;
        retry_with_backoff(&self.retry, || async move {
            let response = self.send(|http| Ok(apply(http.get(url)))).await?;
            read_json(response).await
        })
        .await
    }

    pub(crate) async fn post<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!(method = "POST", path = %path, "Request");
        let response = self.send(|http| Ok(http.post(&url).json(body))).await?;
        read_json(response).await
    }

    /// POST without a body (toggles, state transitions).
    pub(crate) async fn post_empty(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!(method = "POST", path = %path, "Request");
        let response = self.send(|http| Ok(http.post(&url))).await?;
        read_json(response).await
    }

    /// POST once with the current token, skipping the 401 refresh path.
    pub(crate) async fn post_without_refresh(&self, path: &str) -> Result<()> {
        let access_token = self
            .session
            .snapshot()
            .await
            .access_token
            .ok_or(ClientError::AuthRequired)?;
        debug!(method = "POST", path = %path, "Request");
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&access_token)
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        check_status(response).await?;
        Ok(())
    }

    pub(crate) async fn put<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!(method = "PUT", path = %path, "Request");
        let response = self.send(|http| Ok(http.put(&url).json(body))).await?;
        read_json(response).await
    }

    /// POST a multipart form; `form` is rebuilt if the request is retried.
    pub(crate) async fn post_multipart<F>(&self, path: &str, form: F) -> Result<Value>
    where
        F: Fn() -> Result<Form>,
    {
        let url = self.url(path);
        debug!(method = "POST", path = %path, "Multipart request");
        let response = self
            .send(|http| Ok(http.post(&url).multipart(form()?)))
            .await?;
        read_json(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(method = "DELETE", path = %path, "Request");
        self.send(|http| Ok(http.delete(&url))).await?;
        Ok(())
    }
}

/// Body as JSON; empty bodies (204) read as `null`.
pub(crate) async fn read_json(response: Response) -> Result<Value> {
    let text = response.text().await.map_err(ClientError::from_transport)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))
}
