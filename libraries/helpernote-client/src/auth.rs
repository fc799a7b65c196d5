//! Unauthenticated auth endpoints.
//!
//! These bypass the refresh interceptor: a 401 here means bad credentials
//! or a dead refresh token, never an expired access token.

use crate::error::{ClientError, Result};
use crate::types::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, RefreshTokenRequest,
    RegisterRequest,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Authentication client for the Helpernote API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with username and password.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        debug!(username = %username, "Attempting login");

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self.post("/api/auth/login", &request).await?;
        info!(
            username = %response.user.username,
            user_id = response.user.id,
            "Login successful"
        );
        Ok(response)
    }

    /// Create an account; the server signs the new user in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        helpernote_core::validation::validate_registration(
            &request.username,
            &request.password,
            &request.security_answer,
        )?;
        debug!(username = %request.username, "Registering");

        let response: AuthResponse = self.post("/api/auth/register", request).await?;
        info!(username = %response.user.username, "Registered");
        Ok(response)
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// A 401 from this endpoint becomes [`ClientError::TokenRefreshFailed`].
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResponse> {
        debug!("Refreshing access token");

        let request = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };

        match self.post("/api/auth/refresh", &request).await {
            Err(ClientError::Unauthorized(message)) => {
                warn!("Refresh token expired or invalid");
                Err(ClientError::TokenRefreshFailed(message))
            }
            other => other,
        }
    }

    /// Reset a password by answering the security question.
    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<String> {
        let response: MessageResponse = self.post("/api/auth/forgot-password", request).await?;
        info!(username = %request.username, "Password reset");
        Ok(response.message)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to parse {} response: {}", path, e)))
    }
}

/// Turn a non-success response into a classified error.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = if status == StatusCode::TOO_MANY_REQUESTS {
        response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    } else {
        None
    };
    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let err = ClientError::from_status(status, &body, retry_after);

    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), path = %url, error = %err, "Server error");
    } else {
        debug!(status = status.as_u16(), path = %url, error = %err, "Request failed");
    }
    Err(err)
}
