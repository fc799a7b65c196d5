//! Error types for the Helpernote client.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the Helpernote API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// 400
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 401, after the refresh path has been exhausted
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 409
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 422
    #[error("Unprocessable entity: {0}")]
    Unprocessable(String),

    /// 429
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// 5xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The refresh endpoint rejected the refresh token
    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    /// No session available for an authenticated call
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error (uploads, session file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input rejected before sending
    #[error(transparent)]
    Core(#[from] helpernote_core::CoreError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ClientError {
    /// Classify a non-success response.
    ///
    /// `body` is the raw response text; the `{"error": "..."}` envelope is
    /// unwrapped when present.
    pub fn from_status(status: StatusCode, body: &str, retry_after: Option<u64>) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or_else(|| body.trim().to_string());

        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            422 => Self::Unprocessable(message),
            429 => Self::RateLimited {
                retry_after_secs: retry_after.unwrap_or(60),
            },
            code @ 500..=599 => Self::Server {
                status: code,
                message,
            },
            code => Self::Api {
                status: code,
                message,
            },
        }
    }

    /// Map a transport failure, separating timeouts and unreachable hosts.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Network(err.to_string())
        } else {
            Self::Request(err)
        }
    }

    /// HTTP status this error stands for, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::Unprocessable(_) => Some(422),
            Self::RateLimited { .. } => Some(429),
            Self::Server { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Network errors, timeouts and 5xx responses are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout | Self::Server { .. } => true,
            Self::Request(e) => {
                e.is_connect()
                    || e.is_timeout()
                    || e.status().is_some_and(|s| s.is_server_error())
            }
            _ => false,
        }
    }

    /// Whether the session is gone and the user has to sign in again.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::AuthRequired | Self::TokenRefreshFailed(_)
        )
    }

    /// Message shown to the user.
    ///
    /// The server's own message wins for 400, 404 and 409 since it names the
    /// offending record or field.
    pub fn user_message(&self) -> String {
        let server_or = |message: &str, fallback: &str| {
            if message.is_empty() {
                fallback.to_string()
            } else {
                message.to_string()
            }
        };

        match self {
            Self::Network(_) => "네트워크 연결을 확인해주세요.".into(),
            Self::Timeout => "요청 시간이 초과되었습니다. 다시 시도해주세요.".into(),
            Self::BadRequest(m) => server_or(m, "잘못된 요청입니다. 입력 정보를 확인해주세요."),
            Self::Unauthorized(_) | Self::AuthRequired | Self::TokenRefreshFailed(_) => {
                "로그인이 필요합니다.".into()
            }
            Self::Forbidden(_) => "접근 권한이 없습니다.".into(),
            Self::NotFound(m) => server_or(m, "요청한 데이터를 찾을 수 없습니다."),
            Self::Conflict(m) => server_or(m, "이미 존재하는 데이터입니다."),
            Self::Unprocessable(_) => "입력 데이터가 올바르지 않습니다.".into(),
            Self::RateLimited { .. } => {
                "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.".into()
            }
            Self::Server { .. } => "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.".into(),
            Self::Request(e) if e.is_timeout() => {
                "요청 시간이 초과되었습니다. 다시 시도해주세요.".into()
            }
            Self::Request(e) if e.is_connect() => "네트워크 연결을 확인해주세요.".into(),
            Self::Core(e) => e.to_string(),
            _ => "알 수 없는 오류가 발생했습니다.".into(),
        }
    }

    /// Short title for the error dialog.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Timeout => "연결 오류",
            Self::Request(e) if e.status().is_none() => "연결 오류",
            _ => match self.status() {
                Some(400) => "잘못된 요청",
                Some(401) => "인증 필요",
                Some(403) => "접근 거부",
                Some(404) => "찾을 수 없음",
                Some(409) => "중복 데이터",
                Some(500..=599) => "서버 오류",
                _ if self.is_auth_error() => "인증 필요",
                _ => "오류",
            },
        }
    }
}
