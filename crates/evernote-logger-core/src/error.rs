use thiserror::Error;

/// Boxed error coming out of a [`crate::NoteService`] implementation.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum LoggerError {
    /// The target day is not an 8-character `YYYYMMDD` calendar date.
    #[error("invalid day '{0}', expected YYYYMMDD")]
    InvalidDay(String),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("config has no label for weekday {0}")]
    MissingDayLabel(u32),

    #[error("notebook '{0}' not found")]
    NotebookNotFound(String),

    /// The remote service handed back data that breaks its own contract.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    #[error("note service error: {0}")]
    Service(#[source] ServiceError),
}

impl LoggerError {
    pub fn service<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        LoggerError::Service(Box::new(err))
    }
}

pub type Result<T, E = LoggerError> = std::result::Result<T, E>;
