//! Local permission checks against a server-produced permission map.
//!
//! # Purpose and responsibility
//! Mirrors the browser SDK's authorizer: in `Auto` mode the map is fetched
//! from `/api/casbin/{user}` when the user is set; in `Manual` mode the caller
//! supplies it. Checks are exact `(action, object)` lookups.
//!
//! # Key invariants and assumptions
//! - Without a loaded map every `can` is `false` and every `cannot` is `true`.
//! - Changing the user drops the previous user's map before fetching.
use crate::{ClientResult, WardenClient};
use warden_authz::PermissionMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizerMode {
    Auto,
    Manual,
}

#[derive(Debug, Clone)]
pub struct Authorizer {
    client: Option<WardenClient>,
    user: Option<String>,
    permissions: Option<PermissionMap>,
}

impl Authorizer {
    pub fn auto(client: WardenClient) -> Self {
        Self {
            client: Some(client),
            user: None,
            permissions: None,
        }
    }

    pub fn manual() -> Self {
        Self {
            client: None,
            user: None,
            permissions: None,
        }
    }

    pub fn mode(&self) -> AuthorizerMode {
        if self.client.is_some() {
            AuthorizerMode::Auto
        } else {
            AuthorizerMode::Manual
        }
    }

    /// Set the current user; in `Auto` mode this fetches their map.
    ///
    /// On fetch failure the user stays set with no permissions loaded, so all
    /// checks deny.
    pub async fn set_user(&mut self, user: &str) -> ClientResult<()> {
        self.user = Some(user.to_string());
        self.permissions = None;
        if let Some(client) = &self.client {
            let map = client.permission_map(user).await?;
            tracing::debug!(user, actions = map.len(), "loaded permission map");
            self.permissions = Some(map);
        }
        Ok(())
    }

    pub fn set_permissions(&mut self, permissions: PermissionMap) {
        self.permissions = Some(permissions);
    }

    pub fn can(&self, action: &str, object: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|map| map.allows(action, object))
    }

    pub fn cannot(&self, action: &str, object: &str) -> bool {
        !self.can(action, object)
    }

    pub fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn permissions(&self) -> Option<&PermissionMap> {
        self.permissions.as_ref()
    }

    /// Forget the user and permissions and fall back to manual mode.
    pub fn clear(&mut self) {
        self.client = None;
        self.user = None;
        self.permissions = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> PermissionMap {
        let mut map = PermissionMap::new();
        for (action, object) in entries {
            map.insert(action, object);
        }
        map
    }

    #[test]
    fn empty_authorizer_denies_everything() {
        let authorizer = Authorizer::manual();
        assert_eq!(authorizer.mode(), AuthorizerMode::Manual);
        assert!(!authorizer.can("read", "users"));
        assert!(authorizer.cannot("read", "users"));
        assert!(authorizer.current_user().is_none());
    }

    #[tokio::test]
    async fn manual_mode_uses_supplied_map() {
        let mut authorizer = Authorizer::manual();
        authorizer.set_user("bob").await.expect("set user");
        assert_eq!(authorizer.current_user(), Some("bob"));
        assert!(authorizer.permissions().is_none());

        authorizer.set_permissions(map(&[("read", "users"), ("read", "settings")]));
        assert!(authorizer.can("read", "settings"));
        assert!(!authorizer.can("write", "settings"));
        assert!(authorizer.cannot("read", "profile"));
    }

    #[tokio::test]
    async fn changing_user_drops_previous_map() {
        let mut authorizer = Authorizer::manual();
        authorizer.set_permissions(map(&[("write", "users")]));
        assert!(authorizer.can("write", "users"));

        authorizer.set_user("charlie").await.expect("set user");
        assert!(!authorizer.can("write", "users"));
    }

    #[test]
    fn clear_resets_to_manual() {
        let client = WardenClient::from_parts(reqwest::Client::new(), "http://localhost:5001/api")
            .expect("client");
        let mut authorizer = Authorizer::auto(client);
        assert_eq!(authorizer.mode(), AuthorizerMode::Auto);
        authorizer.set_permissions(map(&[("read", "users")]));

        authorizer.clear();
        assert_eq!(authorizer.mode(), AuthorizerMode::Manual);
        assert!(authorizer.permissions().is_none());
        assert!(!authorizer.can("read", "users"));
    }
}
