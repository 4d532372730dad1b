use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use super::Country;

/// How the person proves who they are on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    #[default]
    Password,
    OneTimeCode,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Password => "password",
            AuthMethod::OneTimeCode => "otp",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login form fields plus the one-time-code flow state.
///
/// `auth_method`, `code_requested` and `submitting` are only changed by the
/// login controller.
#[derive(Debug)]
pub struct LoginForm {
    /// National number, without calling code.
    pub phone: String,
    pub country: Country,
    pub password: SecretString,
    pub one_time_code: SecretString,
    pub(crate) auth_method: AuthMethod,
    pub(crate) code_requested: bool,
    pub(crate) submitting: bool,
}

impl LoginForm {
    pub fn new(country: Country) -> Self {
        Self {
            phone: String::new(),
            country,
            password: SecretString::new(String::new()),
            one_time_code: SecretString::new(String::new()),
            auth_method: AuthMethod::default(),
            code_requested: false,
            submitting: false,
        }
    }

    pub fn auth_method(&self) -> AuthMethod {
        self.auth_method
    }

    pub fn code_requested(&self) -> bool {
        self.code_requested
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn international_phone(&self) -> String {
        self.country.international(&self.phone)
    }

    /// Credential for the active method, copied out of the form.
    pub fn credential(&self) -> Credential {
        match self.auth_method {
            AuthMethod::Password => {
                Credential::Password(SecretString::new(self.password.expose_secret().clone()))
            }
            AuthMethod::OneTimeCode => Credential::OneTimeCode(SecretString::new(
                self.one_time_code.expose_secret().clone(),
            )),
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(Country::default())
    }
}

#[derive(Debug)]
pub enum Credential {
    Password(SecretString),
    OneTimeCode(SecretString),
}

impl Credential {
    pub fn method(&self) -> AuthMethod {
        match self {
            Credential::Password(_) => AuthMethod::Password,
            Credential::OneTimeCode(_) => AuthMethod::OneTimeCode,
        }
    }

    pub fn secret(&self) -> &SecretString {
        match self {
            Credential::Password(s) | Credential::OneTimeCode(s) => s,
        }
    }
}

/// Payload for the authentication collaborator.
#[derive(Debug)]
pub struct LoginRequest {
    /// International form, `+<calling code><national number>`.
    pub phone: String,
    pub credential: Credential,
}

impl LoginRequest {
    pub fn method(&self) -> AuthMethod {
        self.credential.method()
    }
}

/// Payload for the code-delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRequest {
    pub phone: String,
    /// True when a code was already delivered to this form.
    pub resend: bool,
}

/// Authenticated session returned by the authentication collaborator.
#[derive(Debug)]
pub struct Session {
    pub user_id: String,
    pub access_token: SecretString,
}
