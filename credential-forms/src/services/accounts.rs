use async_trait::async_trait;
use form_core::error::CollaboratorError;
use secrecy::ExposeSecret;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::models::NewAccount;

#[async_trait]
pub trait AccountCreator: Send + Sync {
    async fn create_account(&self, account: &NewAccount) -> Result<(), CollaboratorError>;
}

/// Records created accounts; rejects a phone or email seen before.
#[derive(Default)]
pub struct MockAccountCreator {
    pub created: Mutex<Vec<(String, String, String)>>,
    taken: Mutex<HashSet<String>>,
    fail_next: Mutex<Option<String>>,
}

impl MockAccountCreator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail as unavailable with `reason`.
    pub fn fail_next(&self, reason: &str) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some(reason.to_string());
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl AccountCreator for MockAccountCreator {
    async fn create_account(&self, account: &NewAccount) -> Result<(), CollaboratorError> {
        if let Some(reason) = self
            .fail_next
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock accounts mutex poisoned: {}", e))?
            .take()
        {
            return Err(CollaboratorError::Unavailable(reason));
        }

        if account.password.expose_secret().is_empty() {
            return Err(CollaboratorError::Rejected("Password is required".to_string()));
        }

        {
            let mut taken = self
                .taken
                .lock()
                .map_err(|e| anyhow::anyhow!("Mock accounts mutex poisoned: {}", e))?;
            if taken.contains(&account.phone) || taken.contains(&account.email) {
                return Err(CollaboratorError::Conflict(
                    "Account already exists".to_string(),
                ));
            }
            taken.insert(account.phone.clone());
            taken.insert(account.email.clone());
        }

        self.created
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock accounts mutex poisoned: {}", e))?
            .push((
                account.username.clone(),
                account.email.clone(),
                account.phone.clone(),
            ));
        Ok(())
    }
}
