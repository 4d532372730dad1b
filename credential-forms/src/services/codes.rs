use async_trait::async_trait;
use form_core::error::CollaboratorError;
use std::sync::Mutex;

use crate::models::CodeRequest;

#[async_trait]
pub trait CodeSender: Send + Sync {
    async fn send_code(&self, request: &CodeRequest) -> Result<(), CollaboratorError>;
}

#[derive(Default)]
pub struct MockCodeSender {
    pub sent: Mutex<Vec<CodeRequest>>,
    fail_next: Mutex<Option<String>>,
}

impl MockCodeSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, reason: &str) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some(reason.to_string());
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CodeSender for MockCodeSender {
    async fn send_code(&self, request: &CodeRequest) -> Result<(), CollaboratorError> {
        if let Some(reason) = self
            .fail_next
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock code sender mutex poisoned: {}", e))?
            .take()
        {
            return Err(CollaboratorError::Unavailable(reason));
        }

        self.sent
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock code sender mutex poisoned: {}", e))?
            .push(request.clone());
        Ok(())
    }
}
