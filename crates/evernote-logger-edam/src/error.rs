use std::fmt;
use thiserror::Error;

/// `EDAMErrorCode` from the Evernote API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const INVALID_AUTH: ErrorCode = ErrorCode(8);
    pub const AUTH_EXPIRED: ErrorCode = ErrorCode(9);
    pub const RATE_LIMIT_REACHED: ErrorCode = ErrorCode(19);

    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "UNKNOWN",
            2 => "BAD_DATA_FORMAT",
            3 => "PERMISSION_DENIED",
            4 => "INTERNAL_ERROR",
            5 => "DATA_REQUIRED",
            6 => "LIMIT_REACHED",
            7 => "QUOTA_REACHED",
            8 => "INVALID_AUTH",
            9 => "AUTH_EXPIRED",
            10 => "DATA_CONFLICT",
            11 => "ENML_VALIDATION",
            12 => "SHARD_UNAVAILABLE",
            13 => "LEN_TOO_SHORT",
            14 => "LEN_TOO_LONG",
            15 => "TOO_FEW",
            16 => "TOO_MANY",
            17 => "UNSUPPORTED_OPERATION",
            18 => "TAKEN_DOWN",
            19 => "RATE_LIMIT_REACHED",
            _ => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.0)
    }
}

#[derive(Debug, Error)]
pub enum EdamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid service URL: {0}")]
    Url(#[from] url::ParseError),

    /// Malformed or unexpected Thrift data
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("application exception {kind}: {message}")]
    Application { kind: i32, message: String },

    #[error("EDAMUserException {code} (parameter: {})", .parameter.as_deref().unwrap_or("-"))]
    User {
        code: ErrorCode,
        parameter: Option<String>,
    },

    #[error("EDAMSystemException {code}: {}", .message.as_deref().unwrap_or("-"))]
    System {
        code: ErrorCode,
        message: Option<String>,
        /// Seconds to wait when the code is RATE_LIMIT_REACHED
        rate_limit_duration: Option<i32>,
    },

    #[error("EDAMNotFoundException (identifier: {}, key: {})", .identifier.as_deref().unwrap_or("-"), .key.as_deref().unwrap_or("-"))]
    NotFound {
        identifier: Option<String>,
        key: Option<String>,
    },
}

pub type Result<T, E = EdamError> = std::result::Result<T, E>;
