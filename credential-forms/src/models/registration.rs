//! Signup form model and its validation rules.

use form_core::validation::{patterns, FieldErrors, FieldName, FieldRules, RuleSet};
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};
use validator::{Validate, ValidationErrors};

use super::Country;

pub const PASSWORD_MIN_CHARS: usize = 6;

/// Signup fields in error-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignupField {
    Username,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl FieldName for SignupField {
    fn as_str(&self) -> &'static str {
        match self {
            SignupField::Username => "username",
            SignupField::Email => "email",
            SignupField::Phone => "phone",
            SignupField::Password => "password",
            SignupField::ConfirmPassword => "confirmPassword",
        }
    }
}

static REGISTRATION_RULES: Lazy<RuleSet<SignupField>> = Lazy::new(|| {
    RuleSet::new()
        .field(FieldRules::new(SignupField::Username).not_blank("Username is required"))
        .field(
            FieldRules::new(SignupField::Email)
                .not_blank("Email is required")
                .pattern(&patterns::EMAIL, "Enter a valid email address"),
        )
        .field(
            FieldRules::new(SignupField::Phone)
                .not_blank("Phone number is required")
                .pattern(
                    &patterns::NATIONAL_PHONE,
                    "Enter a valid 10-digit phone number",
                ),
        )
        .field(
            FieldRules::new(SignupField::Password)
                .required("Password is required")
                .min_chars(
                    PASSWORD_MIN_CHARS,
                    "Password must be at least 6 characters long",
                ),
        )
        .field(
            FieldRules::new(SignupField::ConfirmPassword)
                .required("Confirm your password")
                .equals(SignupField::Password, "Passwords do not match"),
        )
});

#[derive(Debug)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    /// National number, without calling code.
    pub phone: String,
    pub country: Country,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegistrationForm {
    pub fn new(country: Country) -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            country,
            password: SecretString::new(String::new()),
            confirm_password: SecretString::new(String::new()),
        }
    }

    pub fn value(&self, field: SignupField) -> &str {
        match field {
            SignupField::Username => &self.username,
            SignupField::Email => &self.email,
            SignupField::Phone => &self.phone,
            SignupField::Password => self.password.expose_secret(),
            SignupField::ConfirmPassword => self.confirm_password.expose_secret(),
        }
    }

    /// Evaluate every field; empty result means the form may be submitted.
    pub fn field_errors(&self) -> FieldErrors<SignupField> {
        REGISTRATION_RULES.evaluate(|field| self.value(field))
    }

    pub fn international_phone(&self) -> String {
        self.country.international(&self.phone)
    }

    /// Payload for the account-creation collaborator.
    pub fn to_new_account(&self) -> NewAccount {
        NewAccount {
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.international_phone(),
            password: SecretString::new(self.password.expose_secret().clone()),
        }
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new(Country::default())
    }
}

impl Validate for RegistrationForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err((&errors).into())
        }
    }
}

/// Account details handed off on a valid signup.
#[derive(Debug)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    /// International form, `+<calling code><national number>`.
    pub phone: String,
    pub password: SecretString,
}
