use thiserror::Error;

/// Errors talking to the crash-reporting service
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Rollbar rejected item: HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Reporter used before init")]
    NotInitialized,

    #[error("No async runtime available to dispatch report")]
    NoRuntime,
}

impl TransportError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}
