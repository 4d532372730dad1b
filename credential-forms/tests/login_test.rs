mod common;

use credential_forms::handlers::CodeAction;
use credential_forms::models::{AuthMethod, Route};
use credential_forms::services::{
    MockAuthenticator, MockCodeSender, MockNavigator, NavigationEvent,
};
use credential_forms::{LoginController, LoginError};
use secrecy::ExposeSecret;

#[tokio::test]
async fn test_password_login() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let auth = MockAuthenticator::new("123456").with_password("+919876543210", "pw123456");
    let navigator = MockNavigator::new();

    login.set_phone("9876543210");
    login.set_password("pw123456");

    let outcome = login.submit(&auth, &navigator).await.expect("logged in");
    assert_eq!(outcome.notice.message, "Logged in using password");
    assert!(outcome.session.access_token.expose_secret().starts_with("mock-"));
    assert_eq!(navigator.last(), Some(NavigationEvent::Replace(Route::Home)));
    assert!(!login.form().submitting());
}

#[tokio::test]
async fn test_wrong_password_reports_generic_failure() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let auth = MockAuthenticator::new("123456").with_password("+919876543210", "pw123456");
    let navigator = MockNavigator::new();

    login.set_phone("9876543210");
    login.set_password("wrong-password");

    let err = login.submit(&auth, &navigator).await.unwrap_err();
    assert_eq!(err, LoginError::LoginFailed);
    assert_eq!(err.to_string(), "Something went wrong. Please try again.");
    assert!(!login.form().submitting());
    assert_eq!(auth.attempt_count(), 1);
    assert_eq!(navigator.count(), 0);
}

#[tokio::test]
async fn test_one_time_code_login() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let sender = MockCodeSender::new();
    let auth = MockAuthenticator::new("654321");
    let navigator = MockNavigator::new();

    login.select_auth_method(AuthMethod::OneTimeCode);
    login.set_phone("9876543210");

    let notice = login.request_code(&sender).await.expect("code sent");
    assert_eq!(notice.title, "OTP Sent");
    assert!(login.form().code_requested());
    assert_eq!(login.view().code_action, Some(CodeAction::Resend));

    let sent = sender.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].phone, "+919876543210");
    assert!(!sent[0].resend);

    login.set_one_time_code("654321");
    let outcome = login.submit(&auth, &navigator).await.expect("logged in");
    assert_eq!(outcome.notice.message, "Logged in using otp");
    assert_eq!(navigator.last(), Some(NavigationEvent::Replace(Route::Home)));
}

#[tokio::test]
async fn test_code_mode_without_request_always_fails() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let auth = MockAuthenticator::new("654321");
    let navigator = MockNavigator::new();

    login.select_auth_method(AuthMethod::OneTimeCode);
    login.set_phone("9876543210");

    for code in ["", "654321", "000000", "not-a-code"] {
        login.set_one_time_code(code);
        let err = login.submit(&auth, &navigator).await.unwrap_err();
        assert_eq!(err.to_string(), "Please request an OTP first");
    }
    assert_eq!(auth.attempt_count(), 0);
}

#[tokio::test]
async fn test_request_code_requires_phone() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let sender = MockCodeSender::new();

    login.select_auth_method(AuthMethod::OneTimeCode);
    let err = login.request_code(&sender).await.unwrap_err();
    assert_eq!(err.to_string(), "Please enter your phone number");
    assert_eq!(sender.sent_count(), 0);
    assert!(!login.form().code_requested());
}

#[tokio::test]
async fn test_resend_marks_request_and_is_limited() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let sender = MockCodeSender::new();

    login.select_auth_method(AuthMethod::OneTimeCode);
    login.set_phone("9876543210");

    for _ in 0..3 {
        login.request_code(&sender).await.expect("within limit");
    }
    let sent = sender.sent.lock().unwrap().clone();
    assert_eq!(sent.iter().filter(|r| r.resend).count(), 2);

    let err = login.request_code(&sender).await.unwrap_err();
    assert!(matches!(err, LoginError::ResendCooldown { retry_after_secs } if retry_after_secs >= 1));
    assert_eq!(sender.sent_count(), 3);
    assert!(login.form().code_requested());
    assert!(!login.form().submitting());
}

#[tokio::test]
async fn test_resend_unlimited_when_disabled() {
    let config = common::setup_unlimited();
    let mut login = LoginController::new(&config);
    let sender = MockCodeSender::new();

    login.select_auth_method(AuthMethod::OneTimeCode);
    login.set_phone("9876543210");

    for _ in 0..10 {
        login.request_code(&sender).await.expect("no limit");
    }
    assert_eq!(sender.sent_count(), 10);
}

#[tokio::test]
async fn test_delivery_failure_then_success() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let sender = MockCodeSender::new();

    login.select_auth_method(AuthMethod::OneTimeCode);
    login.set_phone("9876543210");
    sender.fail_next("sms gateway down");

    let err = login.request_code(&sender).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to send OTP. Please try again later.");
    assert!(!login.form().code_requested());

    login.request_code(&sender).await.expect("second attempt");
    assert!(login.form().code_requested());
}

#[tokio::test]
async fn test_toggle_round_trip_forces_new_code() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let sender = MockCodeSender::new();
    let auth = MockAuthenticator::new("654321");
    let navigator = MockNavigator::new();

    login.select_auth_method(AuthMethod::OneTimeCode);
    login.set_phone("9876543210");
    login.request_code(&sender).await.expect("code sent");
    login.set_one_time_code("654321");

    login.toggle_auth_method();
    assert!(!login.form().code_requested());
    login.toggle_auth_method();
    assert!(!login.form().code_requested());

    // the typed code survives, but a new request is required
    assert_eq!(login.form().one_time_code.expose_secret(), "654321");
    let err = login.submit(&auth, &navigator).await.unwrap_err();
    assert_eq!(err, LoginError::CodeNotRequested);
}

#[tokio::test]
async fn test_no_second_login_after_success() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let auth = MockAuthenticator::new("123456").with_password("+919876543210", "pw123456");
    let navigator = MockNavigator::new();

    login.set_phone("9876543210");
    login.set_password("pw123456");
    login.submit(&auth, &navigator).await.expect("logged in");

    let err = login.submit(&auth, &navigator).await.unwrap_err();
    assert_eq!(err, LoginError::AlreadyLoggedIn);
    assert_eq!(auth.attempt_count(), 1);
    assert_eq!(navigator.count(), 1);
}

#[tokio::test]
async fn test_password_mode_cannot_request_code() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let sender = MockCodeSender::new();

    login.set_phone("9876543210");
    let err = login.request_code(&sender).await.unwrap_err();
    assert_eq!(err, LoginError::CodeNotAvailable);
    assert_eq!(sender.sent_count(), 0);
}

#[tokio::test]
async fn test_failed_delivery_counts_against_resend_limit() {
    let config = common::setup();
    let mut login = LoginController::new(&config);
    let sender = MockCodeSender::new();

    login.select_auth_method(AuthMethod::OneTimeCode);
    login.set_phone("9876543210");

    sender.fail_next("sms gateway down");
    login.request_code(&sender).await.unwrap_err();
    login.request_code(&sender).await.expect("second attempt");
    login.request_code(&sender).await.expect("third attempt");

    let err = login.request_code(&sender).await.unwrap_err();
    assert!(matches!(err, LoginError::ResendCooldown { .. }));
}
