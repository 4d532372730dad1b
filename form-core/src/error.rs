use thiserror::Error;

/// Failure reported by an external collaborator (backend, delivery channel).
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String, Option<u64>),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for FormError {
    fn from(err: config::ConfigError) -> Self {
        FormError::ConfigError(anyhow::Error::new(err))
    }
}

impl FormError {
    /// Seconds the caller should wait before retrying, if known.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            FormError::TooManyRequests(_, retry) => *retry,
            _ => None,
        }
    }

    /// Message suitable for showing to the person filling the form.
    pub fn user_message(&self) -> String {
        match self {
            FormError::ValidationError(_) => "Please fix the highlighted fields".to_string(),
            FormError::BadRequest(msg)
            | FormError::Conflict(msg)
            | FormError::TooManyRequests(msg, _) => msg.clone(),
            FormError::Collaborator(_) => "Something went wrong. Please try again.".to_string(),
            FormError::ConfigError(_) => "Configuration error".to_string(),
        }
    }
}
