//! Mock auth backend. Implements AuthPort without any real identity provider.
//!
//! Anonymous sign-in mints a random id; token sign-in derives the id from the token's
//! first 8 characters. The initial auth state resolves once, after a delay, to the demo
//! user with a configurable probability.

use crate::domain::{AuthUser, DomainError};
use crate::ports::{AuthPort, EntropySource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, oneshot};
use tracing::info;

pub const DEMO_USER_ID: &str = "demo-user-12345";
pub const DEMO_DISPLAY_NAME: &str = "Demo Student";
pub const DEMO_EMAIL: &str = "student@example.edu";

/// Length of the random suffix of anonymous ids (`user-xxxxxxxxx`).
const ANONYMOUS_ID_LEN: usize = 9;
/// Characters of the token that make up a token-derived id.
const TOKEN_ID_PREFIX_LEN: usize = 8;

pub struct MockAuthAdapter {
    current: Arc<Mutex<Option<AuthUser>>>,
    entropy: Arc<dyn EntropySource>,
    /// Delay before the one-shot auth state notification fires.
    resolve_delay: Duration,
    /// Probability that the initial session resolves to the demo user.
    signed_in_probability: f64,
}

impl MockAuthAdapter {
    pub fn new(entropy: Arc<dyn EntropySource>) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            entropy,
            resolve_delay: Duration::from_millis(1000),
            signed_in_probability: 0.7,
        }
    }

    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay = delay;
        self
    }

    pub fn with_signed_in_probability(mut self, p: f64) -> Self {
        self.signed_in_probability = p;
        self
    }

    pub fn demo_user() -> AuthUser {
        AuthUser {
            uid: DEMO_USER_ID.to_string(),
            display_name: Some(DEMO_DISPLAY_NAME.to_string()),
            email: Some(DEMO_EMAIL.to_string()),
        }
    }

    async fn set_current(&self, user: Option<AuthUser>) {
        *self.current.lock().await = user;
    }
}

#[async_trait::async_trait]
impl AuthPort for MockAuthAdapter {
    async fn sign_in_anonymously(&self) -> Result<AuthUser, DomainError> {
        let user = AuthUser {
            uid: format!("user-{}", self.entropy.token(ANONYMOUS_ID_LEN)),
            display_name: None,
            email: None,
        };
        self.set_current(Some(user.clone())).await;
        info!(uid = %user.uid, "[MOCK] anonymous sign-in");
        Ok(user)
    }

    async fn sign_in_with_token(&self, token: &str) -> Result<AuthUser, DomainError> {
        if token.is_empty() {
            return Err(DomainError::Auth("empty sign-in token".into()));
        }
        let prefix: String = token.chars().take(TOKEN_ID_PREFIX_LEN).collect();
        let user = AuthUser {
            uid: format!("user-{}", prefix),
            display_name: None,
            email: None,
        };
        self.set_current(Some(user.clone())).await;
        info!(uid = %user.uid, "[MOCK] token sign-in");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        self.set_current(None).await;
        info!("[MOCK] signed out");
        Ok(())
    }

    async fn current_user(&self) -> Option<AuthUser> {
        self.current.lock().await.clone()
    }

    async fn on_auth_state_changed(
        &self,
    ) -> Result<oneshot::Receiver<Option<AuthUser>>, DomainError> {
        let (tx, rx) = oneshot::channel();
        let current = Arc::clone(&self.current);
        let delay = self.resolve_delay;
        let signed_in = self.entropy.chance(self.signed_in_probability);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let user = signed_in.then(Self::demo_user);
            *current.lock().await = user.clone();
            info!(signed_in = user.is_some(), "[MOCK] auth state resolved");
            // Receiver may be gone if the app already shut down.
            let _ = tx.send(user);
        });

        Ok(rx)
    }
}
