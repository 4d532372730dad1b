use form_core::error::FormError;
use form_core::validation::FieldErrors;
use thiserror::Error;

use crate::models::SignupField;

/// Display strings are the messages shown to the person filling the form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignupError {
    #[error("Please fix the highlighted fields")]
    Invalid(FieldErrors<SignupField>),

    #[error("Please wait for the current request to finish")]
    Busy,

    #[error("Signup failed. Please try again later.")]
    CreationFailed,

    #[error("This form has already been submitted")]
    AlreadySubmitted,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Please enter your phone number")]
    PhoneRequired,

    #[error("Please enter your password")]
    PasswordRequired,

    #[error("Please request an OTP first")]
    CodeNotRequested,

    #[error("Please enter the OTP")]
    CodeRequired,

    #[error("Switch to OTP login to request a code")]
    CodeNotAvailable,

    #[error("Please wait {retry_after_secs} seconds before requesting another code")]
    ResendCooldown { retry_after_secs: u64 },

    #[error("Please wait for the current request to finish")]
    Busy,

    #[error("Failed to send OTP. Please try again later.")]
    CodeDeliveryFailed,

    #[error("Something went wrong. Please try again.")]
    LoginFailed,

    #[error("You are already logged in")]
    AlreadyLoggedIn,
}

impl LoginError {
    /// Local input problems the person can fix without retrying later.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LoginError::PhoneRequired
                | LoginError::PasswordRequired
                | LoginError::CodeNotRequested
                | LoginError::CodeRequired
        )
    }
}

impl From<SignupError> for FormError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::Invalid(errors) => FormError::ValidationError((&errors).into()),
            SignupError::Busy => FormError::TooManyRequests(err.to_string(), None),
            SignupError::CreationFailed => FormError::Conflict(err.to_string()),
            SignupError::AlreadySubmitted => FormError::BadRequest(err.to_string()),
        }
    }
}

impl From<LoginError> for FormError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::ResendCooldown { retry_after_secs } => {
                FormError::TooManyRequests(err.to_string(), Some(retry_after_secs))
            }
            LoginError::Busy => FormError::TooManyRequests(err.to_string(), None),
            LoginError::CodeDeliveryFailed | LoginError::LoginFailed => {
                FormError::Conflict(err.to_string())
            }
            _ => FormError::BadRequest(err.to_string()),
        }
    }
}
