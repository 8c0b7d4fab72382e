use thiserror::Error;

/// Rejections raised while decoding persisted shapes, scenes or config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersistError {
    #[error("invalid json: {0}")]
    InvalidJson(String),
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("unknown shape type '{0}'")]
    UnknownType(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("limit exceeded: {0}")]
    LimitExceeded(&'static str),
    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),
    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl PersistError {
    /// Stable machine-readable code for host error objects.
    pub fn code(&self) -> &'static str {
        match self {
            PersistError::InvalidJson(_) => "invalid_json",
            PersistError::MissingField(_) => "missing_field",
            PersistError::UnknownType(_) => "unknown_type",
            PersistError::InvalidPath(_) => "invalid_path",
            PersistError::LimitExceeded(_) => "limit_exceeded",
            PersistError::NonFinite(_) => "non_finite",
            PersistError::InvalidField { .. } => "invalid_field",
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::InvalidJson(e.to_string())
    }
}
