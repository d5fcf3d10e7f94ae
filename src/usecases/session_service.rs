//! Sign-in / sign-out flow. Delegates to AuthPort and loads the user's progress.

use crate::domain::{AuthUser, DomainError, ProgressMap, User};
use crate::ports::{AuthPort, DataStorePort};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{info, warn};

pub const DEFAULT_DISPLAY_NAME: &str = "Demo Student";
pub const DEFAULT_EMAIL: &str = "student@example.edu";

pub struct SessionService {
    auth: Arc<dyn AuthPort>,
    store: Arc<dyn DataStorePort>,
    /// When set, sign-in uses the token instead of an anonymous session.
    token: Option<String>,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthPort>, store: Arc<dyn DataStorePort>) -> Self {
        Self {
            auth,
            store,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Starts a session and returns the user with display defaults filled in.
    pub async fn sign_in(&self) -> Result<User, DomainError> {
        let auth_user = match self.token {
            Some(ref token) => self.auth.sign_in_with_token(token).await?,
            None => self.auth.sign_in_anonymously().await?,
        };
        let user = user_from_auth(auth_user);
        info!(uid = %user.uid, "signed in");
        Ok(user)
    }

    /// Ends the backend session. Returns the uid that was signed out, if any.
    pub async fn sign_out(&self) -> Result<Option<String>, DomainError> {
        let uid = self.auth.current_user().await.map(|u| u.uid);
        self.auth.sign_out().await?;
        info!(uid = ?uid, "signed out");
        Ok(uid)
    }

    /// Progress of `user_id`. Failures are logged and yield `None` so the caller keeps
    /// its current map.
    pub async fn load_progress(&self, user_id: &str) -> Option<ProgressMap> {
        match self.store.get_progress(user_id).await {
            Ok(progress) => {
                info!(user_id, courses = progress.len(), "loaded progress");
                Some(progress)
            }
            Err(e) => {
                warn!(user_id, error = %e, "failed to load user progress");
                None
            }
        }
    }

    /// Subscribes to the initial session resolution.
    pub async fn watch_initial_session(
        &self,
    ) -> Result<oneshot::Receiver<Option<AuthUser>>, DomainError> {
        self.auth.on_auth_state_changed().await
    }
}

pub fn user_from_auth(auth_user: AuthUser) -> User {
    User {
        uid: auth_user.uid,
        display_name: auth_user
            .display_name
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        email: auth_user.email.unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
    }
}
