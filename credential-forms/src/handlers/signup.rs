//! Signup screen controller.

use form_core::error::{CollaboratorError, FormError};
use form_core::validation::{patterns, FieldErrors};
use secrecy::SecretString;

use super::error::SignupError;
use crate::config::FormsConfig;
use crate::models::{Country, NewAccount, RegistrationForm, Route, SignupField};
use crate::services::{AccountCreator, Navigator};

/// What the presentation layer needs to render the signup screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupView {
    pub errors: Vec<(SignupField, &'static str)>,
    pub calling_code: String,
    pub show_password: bool,
    pub show_confirm_password: bool,
    pub editable: bool,
    pub submit_enabled: bool,
    pub submit_error: Option<&'static str>,
}

/// Owns one signup screen's form state.
///
/// Field errors are empty until the first submit attempt; from then on every
/// edit re-validates so the shown errors always match the form. Once an
/// account has been created the controller accepts no further submits.
#[derive(Debug)]
pub struct SignupController {
    form: RegistrationForm,
    errors: FieldErrors<SignupField>,
    attempted: bool,
    show_password: bool,
    show_confirm_password: bool,
    submitting: bool,
    completed: bool,
    submit_error: Option<&'static str>,
}

impl SignupController {
    pub fn new(config: &FormsConfig) -> Self {
        Self {
            form: RegistrationForm::new(config.default_country.clone()),
            errors: FieldErrors::default(),
            attempted: false,
            show_password: false,
            show_confirm_password: false,
            submitting: false,
            completed: false,
            submit_error: None,
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.form.username = value.into();
        self.revalidate();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.form.email = value.into();
        self.revalidate();
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.form.phone = value.into();
        self.revalidate();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.form.password = SecretString::new(value.into());
        self.revalidate();
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.form.confirm_password = SecretString::new(value.into());
        self.revalidate();
    }

    pub fn select_country(&mut self, country: Country) -> Result<(), FormError> {
        if !patterns::CALLING_CODE.is_match(&country.calling_code) {
            return Err(FormError::BadRequest(format!(
                "Invalid calling code: {}",
                country.calling_code
            )));
        }
        tracing::debug!(country = %country.iso_code, "Signup country selected");
        self.form.country = country;
        Ok(())
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn toggle_confirm_password_visibility(&mut self) {
        self.show_confirm_password = !self.show_confirm_password;
    }

    /// Errors currently shown to the person.
    pub fn field_errors(&self) -> &FieldErrors<SignupField> {
        &self.errors
    }

    pub fn field_error(&self, field: SignupField) -> Option<&'static str> {
        self.errors.get(field)
    }

    /// Live check, independent of what is currently shown.
    pub fn is_valid(&self) -> bool {
        self.form.field_errors().is_empty()
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// True once the account-creation collaborator has accepted the form.
    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn editable(&self) -> bool {
        !self.submitting && !self.completed
    }

    pub fn submit_error(&self) -> Option<&'static str> {
        self.submit_error
    }

    pub fn view(&self) -> SignupView {
        SignupView {
            errors: self.errors.iter().collect(),
            calling_code: format!("+{}", self.form.country.calling_code),
            show_password: self.show_password,
            show_confirm_password: self.show_confirm_password,
            editable: self.editable(),
            submit_enabled: self.editable(),
            submit_error: self.submit_error,
        }
    }

    /// Validate and, if the form is clean, mark it as submitting and return
    /// the payload for the account-creation collaborator.
    pub fn begin_submit(&mut self) -> Result<NewAccount, SignupError> {
        if self.completed {
            tracing::debug!("Signup submit ignored after the account was created");
            return Err(SignupError::AlreadySubmitted);
        }
        if self.submitting {
            tracing::debug!("Signup submit ignored while a request is pending");
            return Err(SignupError::Busy);
        }

        self.attempted = true;
        self.errors = self.form.field_errors();
        if !self.errors.is_empty() {
            tracing::info!(
                invalid_fields = ?self.errors.fields().collect::<Vec<_>>(),
                "Signup rejected by validation"
            );
            return Err(SignupError::Invalid(self.errors.clone()));
        }

        self.submitting = true;
        self.submit_error = None;
        let account = self.form.to_new_account();
        tracing::info!(
            country = %self.form.country.iso_code,
            "Signup submitted"
        );
        Ok(account)
    }

    /// Apply the collaborator's answer. On success the host is sent to code
    /// verification with the international phone number.
    pub fn complete_submit(
        &mut self,
        result: Result<(), CollaboratorError>,
        navigator: &dyn Navigator,
    ) -> Result<Route, SignupError> {
        match result {
            Ok(()) => {
                self.submitting = false;
                self.completed = true;
                let route = Route::VerifyCode {
                    phone: self.form.international_phone(),
                };
                tracing::info!("Account created, moving to code verification");
                navigator.navigate(route.clone());
                Ok(route)
            }
            Err(e) => Err(self.report_failure(e)),
        }
    }

    /// Failure slot for the account-creation collaborator. Re-enables editing
    /// and records a generic message.
    pub fn report_failure(&mut self, error: CollaboratorError) -> SignupError {
        tracing::warn!(error = %error, "Account creation failed");
        self.submitting = false;
        self.submit_error = Some("Signup failed. Please try again later.");
        SignupError::CreationFailed
    }

    #[tracing::instrument(skip_all)]
    pub async fn submit(
        &mut self,
        accounts: &dyn AccountCreator,
        navigator: &dyn Navigator,
    ) -> Result<Route, SignupError> {
        let account = self.begin_submit()?;
        let result = accounts.create_account(&account).await;
        self.complete_submit(result, navigator)
    }

    /// "Already have an account?" link.
    pub fn go_to_login(&self, navigator: &dyn Navigator) {
        navigator.navigate(Route::Login);
    }

    fn revalidate(&mut self) {
        if self.attempted {
            self.errors = self.form.field_errors();
        }
    }
}
