use crate::{UserPermissions, WardenClient};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use warden_authz::EnforceRequest;

const FETCH_FAILED: &str = "Failed to fetch permission";

/// A signed-in user. The username is the Casbin subject.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            roles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub permissions: Option<UserPermissions>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Shared session that asks the server for every decision.
///
/// Clones share state, so one handle can be passed to each view that needs
/// to check permissions.
#[derive(Debug, Clone)]
pub struct AuthSession {
    client: WardenClient,
    state: Arc<RwLock<SessionState>>,
}

impl AuthSession {
    pub fn new(client: WardenClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// Replace the user, dropping any previous permissions and error.
    ///
    /// Permissions are refreshed when a user is present.
    pub async fn set_user(&self, user: Option<User>) {
        let has_user = user.is_some();
        {
            let mut state = self.state.write().await;
            state.user = user;
            state.permissions = None;
            state.error = None;
            state.loading = false;
        }
        if has_user {
            self.refresh_permissions().await;
        }
    }

    /// Re-fetch the current user's roles and permissions.
    ///
    /// A result that arrives after the user changed is discarded.
    pub async fn refresh_permissions(&self) {
        let username = {
            let mut state = self.state.write().await;
            let Some(user) = state.user.as_ref() else {
                return;
            };
            let username = user.username.clone();
            state.loading = true;
            state.error = None;
            username
        };

        let result = self.client.user_permissions(&username).await;

        let mut state = self.state.write().await;
        if state.user.as_ref().map(|user| user.username.as_str()) != Some(username.as_str()) {
            tracing::debug!(user = %username, "discarding permissions for replaced user");
            return;
        }
        state.loading = false;
        match result {
            Ok(permissions) => state.permissions = Some(permissions),
            Err(err) => {
                tracing::warn!(user = %username, error = %err, "failed to fetch permissions");
                state.error = Some(err.user_message(FETCH_FAILED));
            }
        }
    }

    /// Ask the server whether the current user may `action` on `object`.
    ///
    /// Denies without a user and on any request failure.
    pub async fn can(&self, object: &str, action: &str) -> bool {
        let Some(user) = self.current_user().await else {
            return false;
        };
        let request = EnforceRequest::new(user.username, object, action);
        match self.client.enforce(&request).await {
            Ok(response) => response.allowed,
            Err(err) => {
                tracing::warn!(error = %err, object, action, "permission check failed");
                false
            }
        }
    }

    /// The negation of [`AuthSession::can`]: `true` without a user and on any
    /// request failure.
    pub async fn cannot(&self, object: &str, action: &str) -> bool {
        !self.can(object, action).await
    }

    pub async fn logout(&self) {
        *self.state.write().await = SessionState::default();
    }
}
