use std::fmt;

/// Closed taxonomy of error kinds the SDK can report.
///
/// Every error returned by this crate maps to exactly one kind via
/// [`CoralogixError::kind`]; remote failures are classified from the HTTP
/// status code with [`ErrorKind::from_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400, or any 4xx without a more specific mapping.
    BadRequest,
    /// 401 — missing or invalid API key.
    Unauthorized,
    /// 403 — the key lacks permission for the resource.
    Forbidden,
    /// 404 — unknown resource or id.
    NotFound,
    /// 429 — rate limited; retried by the transport.
    RateLimited,
    /// 5xx — upstream failure; retried by the transport.
    ServerError,
    /// Connection-level failure, body-read failure, or a status outside
    /// the classified ranges.
    NetworkError,
    /// Local validation or payload serialization failure; never retried.
    InvalidInput,
    /// The caller's cancellation token fired.
    ContextCanceled,
    /// The per-request timeout elapsed.
    ContextDeadlineExceeded,
}

impl ErrorKind {
    /// Maps an HTTP status code to an error kind.
    ///
    /// Total over `u16`: exact 4xx lookups first, then the 4xx default,
    /// then 5xx, and anything else (including codes below 400 reaching the
    /// error path) falls through to [`ErrorKind::NetworkError`].
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            400..=499 => Self::BadRequest,
            500..=u16::MAX => Self::ServerError,
            _ => Self::NetworkError,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limit",
            Self::ServerError => "server_error",
            Self::NetworkError => "network_error",
            Self::InvalidInput => "invalid_input",
            Self::ContextCanceled => "context_canceled",
            Self::ContextDeadlineExceeded => "context_deadline_exceeded",
        };
        f.write_str(name)
    }
}

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum CoralogixError {
    /// Non-success HTTP status code with its classified kind and raw body.
    #[error("api error ({kind}), status {status}: {body}")]
    Api {
        kind: ErrorKind,
        status: u16,
        body: String,
    },
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response arrived but its body could not be read.
    #[error("failed to read response body (status {status})")]
    BodyRead {
        status: u16,
        #[source]
        source: reqwest::Error,
    },
    /// Request payload could not be serialized to JSON.
    #[error("failed to serialize request payload")]
    Serialize(#[source] serde_json::Error),
    /// A 2xx response body did not decode as the expected JSON shape.
    #[error("failed to decode response body (status {status}): {body}")]
    Decode {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
    /// The caller's cancellation token fired during backoff or mid-flight.
    #[error("request canceled")]
    Canceled,
    /// Every permitted attempt failed with a retry-eligible error.
    #[error("failed after {retries} retries")]
    RetriesExhausted {
        retries: u32,
        #[source]
        source: Box<CoralogixError>,
    },
}

impl CoralogixError {
    /// Classified kind of this error.
    ///
    /// [`CoralogixError::RetriesExhausted`] reports the kind of the last
    /// attempt so callers can still distinguish rate limiting from upstream
    /// failure after exhaustion.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { kind, .. } => *kind,
            Self::Transport(err) => {
                if err.is_timeout() {
                    ErrorKind::ContextDeadlineExceeded
                } else {
                    ErrorKind::NetworkError
                }
            }
            Self::BodyRead { .. } => ErrorKind::NetworkError,
            Self::Serialize(_) => ErrorKind::InvalidInput,
            Self::Decode { .. } => ErrorKind::ServerError,
            Self::Canceled => ErrorKind::ContextCanceled,
            Self::RetriesExhausted { source, .. } => source.kind(),
        }
    }

    /// HTTP status code, when the failure carries one.
    ///
    /// Absent for connection-level and local failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. }
            | Self::BodyRead { status, .. }
            | Self::Decode { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::RetriesExhausted { source, .. } => source.status(),
            Self::Serialize(_) | Self::Canceled => None,
        }
    }

    /// Raw response body, when one was read before the failure.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } | Self::Decode { body, .. } => Some(body),
            Self::RetriesExhausted { source, .. } => source.body(),
            _ => None,
        }
    }
}
