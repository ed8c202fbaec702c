use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacklogError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("server error (HTTP {0})")]
    Server(u16),

    #[error("request rejected (HTTP {status}): {message}")]
    Validation { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid assignee filter '{0}': expected 'all', 'unassigned', or a user id")]
    InvalidAssigneeFilter(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Transport-level classification. Responses that arrived with an error
/// status are classified per-resource in the API client; this covers
/// failures where no usable response arrived at all.
impl From<reqwest::Error> for BacklogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            return BacklogError::Network(err.to_string());
        }
        if err.is_decode() {
            return BacklogError::Other(format!("malformed response body: {}", err));
        }
        match err.status() {
            Some(status) if status.is_server_error() => BacklogError::Server(status.as_u16()),
            Some(status) => BacklogError::Validation {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => BacklogError::Network(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BacklogError>;
