use async_trait::async_trait;
use form_core::error::CollaboratorError;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::{Credential, LoginRequest, Session};

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, request: &LoginRequest) -> Result<Session, CollaboratorError>;
}

/// Accepts registered phone/password pairs and a single one-time code.
pub struct MockAuthenticator {
    passwords: Mutex<HashMap<String, String>>,
    code: String,
    pub attempts: Mutex<Vec<String>>,
}

impl MockAuthenticator {
    pub fn new(code: &str) -> Self {
        Self {
            passwords: Mutex::new(HashMap::new()),
            code: code.to_string(),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_password(self, phone: &str, password: &str) -> Self {
        if let Ok(mut passwords) = self.passwords.lock() {
            passwords.insert(phone.to_string(), password.to_string());
        }
        self
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().map(|a| a.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, request: &LoginRequest) -> Result<Session, CollaboratorError> {
        self.attempts
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock authenticator mutex poisoned: {}", e))?
            .push(request.phone.clone());

        let accepted = match &request.credential {
            Credential::Password(password) => self
                .passwords
                .lock()
                .map_err(|e| anyhow::anyhow!("Mock authenticator mutex poisoned: {}", e))?
                .get(&request.phone)
                .is_some_and(|known| known == password.expose_secret()),
            Credential::OneTimeCode(code) => code.expose_secret() == &self.code,
        };

        if !accepted {
            return Err(CollaboratorError::Rejected("Invalid credentials".to_string()));
        }

        Ok(Session {
            user_id: Uuid::new_v4().to_string(),
            access_token: SecretString::new(format!("mock-{}", Uuid::new_v4())),
        })
    }
}
