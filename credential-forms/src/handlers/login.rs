//! Login screen controller: password or one-time-code authentication.

use form_core::error::{CollaboratorError, FormError};
use form_core::rate_limit::{check_unkeyed, UnkeyedRateLimiter};
use form_core::validation::patterns;
use secrecy::{ExposeSecret, SecretString};

use super::error::LoginError;
use crate::config::FormsConfig;
use crate::models::{
    AuthMethod, CodeRequest, Country, LoginForm, LoginRequest, Notice, Route, Session,
};
use crate::services::{Authenticator, CodeSender, Navigator};

const SUBMIT_LABEL: &str = "Login";
const SUBMIT_LABEL_BUSY: &str = "Please wait...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeAction {
    Send,
    Resend,
}

impl CodeAction {
    pub fn label(&self) -> &'static str {
        match self {
            CodeAction::Send => "Send OTP",
            CodeAction::Resend => "Resend OTP",
        }
    }
}

/// What the presentation layer needs to render the login screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub auth_method: AuthMethod,
    pub calling_code: String,
    pub show_password_input: bool,
    pub show_code_input: bool,
    pub code_action: Option<CodeAction>,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
}

#[derive(Debug)]
pub struct LoginOutcome {
    pub session: Session,
    pub notice: Notice,
}

/// Owns one login screen's form state. The auth method lives here rather
/// than in any shared store. After a successful login no further code
/// requests or submits are accepted.
pub struct LoginController {
    form: LoginForm,
    resend_limiter: Option<UnkeyedRateLimiter>,
    logged_in: bool,
}

impl LoginController {
    pub fn new(config: &FormsConfig) -> Self {
        Self {
            form: LoginForm::new(config.default_country.clone()),
            resend_limiter: config.resend_limit.as_ref().map(|limit| limit.build()),
            logged_in: false,
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.form.phone = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.form.password = SecretString::new(value.into());
    }

    pub fn set_one_time_code(&mut self, value: impl Into<String>) {
        self.form.one_time_code = SecretString::new(value.into());
    }

    pub fn select_country(&mut self, country: Country) -> Result<(), FormError> {
        if !patterns::CALLING_CODE.is_match(&country.calling_code) {
            return Err(FormError::BadRequest(format!(
                "Invalid calling code: {}",
                country.calling_code
            )));
        }
        tracing::debug!(country = %country.iso_code, "Login country selected");
        self.form.country = country;
        Ok(())
    }

    /// Switch authentication method.
    ///
    /// Any switch forgets a previously requested code. Entering one-time-code
    /// mode clears the password; entering password mode keeps the typed code.
    /// Selecting the active method does nothing.
    pub fn select_auth_method(&mut self, method: AuthMethod) {
        if self.form.auth_method == method {
            return;
        }

        if method == AuthMethod::OneTimeCode {
            self.form.password = SecretString::new(String::new());
        }
        self.form.auth_method = method;
        self.form.code_requested = false;
        tracing::debug!(method = %method, "Login method switched");
    }

    pub fn toggle_auth_method(&mut self) {
        let next = match self.form.auth_method {
            AuthMethod::Password => AuthMethod::OneTimeCode,
            AuthMethod::OneTimeCode => AuthMethod::Password,
        };
        self.select_auth_method(next);
    }

    pub fn view(&self) -> LoginView {
        let otp_mode = self.form.auth_method == AuthMethod::OneTimeCode;
        LoginView {
            auth_method: self.form.auth_method,
            calling_code: format!("+{}", self.form.country.calling_code),
            show_password_input: !otp_mode,
            show_code_input: otp_mode && self.form.code_requested,
            code_action: otp_mode.then(|| {
                if self.form.code_requested {
                    CodeAction::Resend
                } else {
                    CodeAction::Send
                }
            }),
            submit_label: if self.form.submitting {
                SUBMIT_LABEL_BUSY
            } else {
                SUBMIT_LABEL
            },
            submit_enabled: !self.form.submitting && !self.logged_in,
        }
    }

    /// Start a send or resend of the one-time code. Only offered in
    /// one-time-code mode.
    ///
    /// A request counts against the resend limit as soon as it is accepted,
    /// even if delivery later fails.
    pub fn begin_code_request(&mut self) -> Result<CodeRequest, LoginError> {
        if self.logged_in {
            return Err(LoginError::AlreadyLoggedIn);
        }
        if self.form.submitting {
            return Err(LoginError::Busy);
        }
        if self.form.auth_method != AuthMethod::OneTimeCode {
            return Err(LoginError::CodeNotAvailable);
        }
        if self.form.phone.is_empty() {
            return Err(LoginError::PhoneRequired);
        }
        if let Some(limiter) = &self.resend_limiter {
            if let Err(err) = check_unkeyed(limiter, "Too many code requests") {
                let retry_after_secs = err.retry_after().unwrap_or(1);
                tracing::warn!(
                    error = %err,
                    retry_after_secs,
                    "One-time code request rate limited"
                );
                return Err(LoginError::ResendCooldown { retry_after_secs });
            }
        }

        self.form.submitting = true;
        let request = CodeRequest {
            phone: self.form.international_phone(),
            resend: self.form.code_requested,
        };
        tracing::info!(resend = request.resend, "One-time code requested");
        Ok(request)
    }

    pub fn complete_code_request(
        &mut self,
        result: Result<(), CollaboratorError>,
    ) -> Result<Notice, LoginError> {
        self.form.submitting = false;
        match result {
            Ok(()) => {
                self.form.code_requested = true;
                Ok(Notice::code_sent())
            }
            Err(e) => {
                tracing::error!(error = %e, "Send OTP failed");
                Err(LoginError::CodeDeliveryFailed)
            }
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn request_code(&mut self, sender: &dyn CodeSender) -> Result<Notice, LoginError> {
        let request = self.begin_code_request()?;
        let result = sender.send_code(&request).await;
        self.complete_code_request(result)
    }

    /// Check the form in order and, if it passes, mark it as submitting and
    /// return the payload for the authentication collaborator.
    pub fn begin_submit(&mut self) -> Result<LoginRequest, LoginError> {
        if self.logged_in {
            return Err(LoginError::AlreadyLoggedIn);
        }
        if self.form.submitting {
            tracing::debug!("Login submit ignored while a request is pending");
            return Err(LoginError::Busy);
        }
        if self.form.phone.is_empty() {
            return Err(LoginError::PhoneRequired);
        }
        match self.form.auth_method {
            AuthMethod::Password => {
                if self.form.password.expose_secret().is_empty() {
                    return Err(LoginError::PasswordRequired);
                }
            }
            AuthMethod::OneTimeCode => {
                if !self.form.code_requested {
                    return Err(LoginError::CodeNotRequested);
                }
                if self.form.one_time_code.expose_secret().is_empty() {
                    return Err(LoginError::CodeRequired);
                }
            }
        }

        self.form.submitting = true;
        tracing::info!(method = %self.form.auth_method, "Login submitted");
        Ok(LoginRequest {
            phone: self.form.international_phone(),
            credential: self.form.credential(),
        })
    }

    /// Apply the collaborator's answer. `submitting` is cleared either way; on
    /// success the host replaces the login screen with home.
    pub fn complete_submit(
        &mut self,
        result: Result<Session, CollaboratorError>,
        navigator: &dyn Navigator,
    ) -> Result<LoginOutcome, LoginError> {
        self.form.submitting = false;
        match result {
            Ok(session) => {
                let method = self.form.auth_method;
                self.logged_in = true;
                tracing::info!(user_id = %session.user_id, method = %method, "Login succeeded");
                navigator.replace(Route::Home);
                Ok(LoginOutcome {
                    session,
                    notice: Notice::logged_in(method),
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Login failed");
                Err(LoginError::LoginFailed)
            }
        }
    }

    #[tracing::instrument(skip_all, fields(method = %self.form.auth_method))]
    pub async fn submit(
        &mut self,
        authenticator: &dyn Authenticator,
        navigator: &dyn Navigator,
    ) -> Result<LoginOutcome, LoginError> {
        let request = self.begin_submit()?;
        let result = authenticator.authenticate(&request).await;
        self.complete_submit(result, navigator)
    }

    /// "Don't have an account?" link.
    pub fn go_to_signup(&self, navigator: &dyn Navigator) {
        navigator.replace(Route::Signup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MockNavigator, NavigationEvent};

    fn controller() -> LoginController {
        LoginController::new(&FormsConfig::default())
    }

    #[test]
    fn test_entering_code_mode_clears_password_only() {
        let mut login = controller();
        login.set_password("pw123456");
        login.set_one_time_code("111111");

        login.select_auth_method(AuthMethod::OneTimeCode);
        assert_eq!(login.form().password.expose_secret(), "");

        login.set_one_time_code("222222");
        login.select_auth_method(AuthMethod::Password);
        assert_eq!(login.form().one_time_code.expose_secret(), "222222");
    }

    #[test]
    fn test_switch_resets_code_requested() {
        let mut login = controller();
        login.select_auth_method(AuthMethod::OneTimeCode);
        login.set_phone("9876543210");
        login.begin_code_request().expect("accepted");
        login.complete_code_request(Ok(())).expect("sent");
        assert!(login.form().code_requested());

        login.toggle_auth_method();
        assert_eq!(login.form().auth_method(), AuthMethod::Password);
        assert!(!login.form().code_requested());

        login.form.code_requested = true;
        login.toggle_auth_method();
        assert_eq!(login.form().auth_method(), AuthMethod::OneTimeCode);
        assert!(!login.form().code_requested());
    }

    #[test]
    fn test_reselecting_active_method_is_noop() {
        let mut login = controller();
        login.select_auth_method(AuthMethod::OneTimeCode);
        login.form.code_requested = true;
        login.select_auth_method(AuthMethod::OneTimeCode);
        assert!(login.form().code_requested());
    }

    #[test]
    fn test_submit_validation_order() {
        let mut login = controller();
        assert_eq!(login.begin_submit().unwrap_err(), LoginError::PhoneRequired);

        login.set_phone("9876543210");
        assert_eq!(login.begin_submit().unwrap_err(), LoginError::PasswordRequired);

        login.select_auth_method(AuthMethod::OneTimeCode);
        login.set_one_time_code("123456");
        assert_eq!(login.begin_submit().unwrap_err(), LoginError::CodeNotRequested);

        login.form.code_requested = true;
        login.set_one_time_code("");
        assert_eq!(login.begin_submit().unwrap_err(), LoginError::CodeRequired);
        assert!(!login.form().submitting());
    }

    #[test]
    fn test_double_submit_is_refused() {
        let mut login = controller();
        login.set_phone("9876543210");
        login.set_password("pw123456");

        let request = login.begin_submit().expect("valid");
        assert_eq!(request.phone, "+919876543210");
        assert_eq!(request.method(), AuthMethod::Password);
        assert!(login.form().submitting());
        assert_eq!(login.begin_submit().unwrap_err(), LoginError::Busy);
        assert_eq!(login.begin_code_request().unwrap_err(), LoginError::Busy);

        let navigator = MockNavigator::new();
        let err = login
            .complete_submit(Err(CollaboratorError::Rejected("nope".to_string())), &navigator)
            .unwrap_err();
        assert_eq!(err, LoginError::LoginFailed);
        assert!(!login.form().submitting());
        assert_eq!(navigator.count(), 0);
    }

    #[test]
    fn test_success_replaces_with_home() {
        let mut login = controller();
        login.set_phone("9876543210");
        login.set_password("pw123456");
        login.begin_submit().expect("valid");

        let navigator = MockNavigator::new();
        let outcome = login
            .complete_submit(
                Ok(Session {
                    user_id: "u-1".to_string(),
                    access_token: SecretString::new("t".to_string()),
                }),
                &navigator,
            )
            .expect("logged in");
        assert_eq!(outcome.notice.title, "Login Successful");
        assert_eq!(outcome.notice.message, "Logged in using password");
        assert_eq!(navigator.last(), Some(NavigationEvent::Replace(Route::Home)));

        assert!(login.logged_in());
        assert!(!login.view().submit_enabled);
        assert_eq!(login.begin_submit().unwrap_err(), LoginError::AlreadyLoggedIn);
        login.select_auth_method(AuthMethod::OneTimeCode);
        assert_eq!(
            login.begin_code_request().unwrap_err(),
            LoginError::AlreadyLoggedIn
        );
        assert_eq!(navigator.count(), 1);
    }

    #[test]
    fn test_code_request_refused_in_password_mode() {
        let mut login = controller();
        login.set_phone("9876543210");
        assert_eq!(
            login.begin_code_request().unwrap_err(),
            LoginError::CodeNotAvailable
        );
        assert!(!login.form().submitting());
        assert!(!login.form().code_requested());
    }

    #[test]
    fn test_code_request_failure_keeps_state() {
        let mut login = controller();
        login.select_auth_method(AuthMethod::OneTimeCode);
        login.set_phone("9876543210");
        login.begin_code_request().expect("accepted");

        let err = login
            .complete_code_request(Err(CollaboratorError::Unavailable("sms down".to_string())))
            .unwrap_err();
        assert_eq!(err, LoginError::CodeDeliveryFailed);
        assert!(!login.form().code_requested());
        assert!(!login.form().submitting());
    }

    #[test]
    fn test_view_hints() {
        let mut login = controller();
        let view = login.view();
        assert!(view.show_password_input);
        assert_eq!(view.code_action, None);
        assert_eq!(view.submit_label, "Login");

        login.select_auth_method(AuthMethod::OneTimeCode);
        let view = login.view();
        assert!(!view.show_password_input);
        assert!(!view.show_code_input);
        assert_eq!(view.code_action, Some(CodeAction::Send));
        assert_eq!(view.code_action.map(|a| a.label()), Some("Send OTP"));

        login.set_phone("9876543210");
        login.begin_code_request().expect("accepted");
        assert_eq!(login.view().submit_label, "Please wait...");
        assert!(!login.view().submit_enabled);

        login.complete_code_request(Ok(())).expect("sent");
        let view = login.view();
        assert!(view.show_code_input);
        assert_eq!(view.code_action, Some(CodeAction::Resend));
        assert!(view.submit_enabled);
    }

    #[test]
    fn test_go_to_signup_replaces() {
        let navigator = MockNavigator::new();
        controller().go_to_signup(&navigator);
        assert_eq!(navigator.last(), Some(NavigationEvent::Replace(Route::Signup)));
    }
}
