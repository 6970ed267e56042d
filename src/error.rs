use thiserror::Error;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Failures talking to the usuario collection endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    #[error("{method} {url} returned an unexpected body: {reason}")]
    Decode {
        method: &'static str,
        url: String,
        reason: String,
    },
}

impl ApiError {
    /// HTTP status reported by the server, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// One-line message for the status bar.
    pub fn short_message(&self) -> String {
        match self {
            ApiError::InvalidBaseUrl { url, .. } => format!("invalid base url {url}"),
            ApiError::Client(_) => "http client unavailable".to_string(),
            ApiError::Transport { method, source, .. } => {
                if source.is_timeout() {
                    format!("{method} timed out")
                } else {
                    format!("{method} failed: server unreachable")
                }
            }
            ApiError::Status { method, status, .. } => format!("{method} rejected by server ({status})"),
            ApiError::Decode { method, .. } => format!("{method}: unexpected response from server"),
        }
    }
}
