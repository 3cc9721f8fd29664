use thiserror::Error;

/// quest-audio's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// quest-audio's crate-wide error type.
///
/// Binaries wrap this in `anyhow` for context; the library keeps a concrete enum so the batch
/// runner can tell a skippable service failure apart from a fatal local one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} not set")]
    MissingCredential(&'static str),

    /// The synthesis service answered with a non-success status.
    #[error("synthesis failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("synthesis request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Whether the batch runner should record this error and move on to the next entry.
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Transport(_))
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}
