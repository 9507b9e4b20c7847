use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain a match record from upstream
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("anti-bot challenge served for {url} (status {status})")]
    Challenge { url: String, status: StatusCode },

    #[error("upstream returned {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("failed to parse match page: {0}")]
    Parse(String),

    #[error("fetch task ended abnormally: {0}")]
    Task(String),
}

impl FetchError {
    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Challenge { .. } => "challenge",
            FetchError::Status { .. } => "status",
            FetchError::Parse(_) => "parse",
            FetchError::Task(_) => "task",
        }
    }
}
