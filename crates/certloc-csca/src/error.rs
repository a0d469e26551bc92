//! Error types for trust anchor resolution.

/// Failure of a single SKI-PEM fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not complete (DNS, connect, TLS, body read, timeout).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The server answered with a non-success status.
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Body is not JSON or lacks an object-valued `data` field of strings.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl FetchError {
    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// The client itself never retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Http { status } => *status == 429 || *status >= 500,
            Self::MalformedResponse { .. } => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Trust anchor errors.
#[derive(Debug, thiserror::Error)]
pub enum CscaError {
    /// No certificate for the key identifier in the applicable table(s).
    #[error("CSCA not found for key identifier {ski} (override table supplied: {override_supplied})")]
    NotFound { ski: String, override_supplied: bool },

    /// Remote SKI-PEM fetch failed.
    #[error("failed to fetch SKI-PEM table from {url}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// A static table could not be read or decoded.
    #[error("trust anchor table error: {message}")]
    Table { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl CscaError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 1,
            Self::Table { .. } | Self::Config { .. } => 2,
            Self::Fetch { .. } => 3,
        }
    }

    /// The underlying fetch failure, if this is one.
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            Self::Fetch { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for trust anchor operations.
pub type CscaResult<T> = Result<T, CscaError>;
