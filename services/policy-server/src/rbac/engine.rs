//! Shared Casbin enforcer behind an async read/write lock.
//!
//! # Purpose and responsibility
//! Owns the single enforcer the HTTP handlers query, and serializes policy
//! mutations against concurrent reads.
//!
//! # Key invariants and assumptions
//! - Every decision and role lookup is answered by Casbin; the engine only
//!   reshapes results.
//! - Reads take the read lock; add/remove take the write lock and, when
//!   persistence is enabled, save the policy before releasing it.
//!
//! # Security considerations
//! - Mutation endpoints are unauthenticated; deployments must front the
//!   service with their own access control.
use casbin::{CoreApi, Enforcer, MgmtApi, RbacApi};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use warden_authz::{
    build_enforcer, AuthzError, EnforceRequest, GroupingRule, PermissionMap, PolicyRule,
    PolicySource,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Casbin(#[from] casbin::Error),
    #[error(transparent)]
    Authz(#[from] AuthzError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Direct and inherited grants for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserGrants {
    pub roles: Vec<String>,
    pub permissions: Vec<Vec<String>>,
    pub implicit_permissions: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySnapshot {
    pub policies: Vec<Vec<String>>,
    pub grouping_policies: Vec<Vec<String>>,
}

#[derive(Clone)]
pub struct PolicyEngine {
    enforcer: Arc<RwLock<Enforcer>>,
    persist: bool,
}

impl PolicyEngine {
    /// Build the enforcer from `source`.
    ///
    /// `persist_policy` only takes effect for file-backed sources; the
    /// embedded policy has nowhere to be saved.
    pub async fn load(source: &PolicySource, persist_policy: bool) -> EngineResult<Self> {
        let enforcer = build_enforcer(source).await?;
        let persist = persist_policy && matches!(source, PolicySource::Files { .. });
        if persist_policy && !persist {
            tracing::warn!("policy persistence requested for embedded policy; ignoring");
        }
        Ok(Self::from_enforcer(enforcer, persist))
    }

    pub fn from_enforcer(enforcer: Enforcer, persist: bool) -> Self {
        Self {
            enforcer: Arc::new(RwLock::new(enforcer)),
            persist,
        }
    }

    pub fn persists(&self) -> bool {
        self.persist
    }

    pub async fn enforce(&self, request: &EnforceRequest) -> EngineResult<bool> {
        let enforcer = self.enforcer.read().await;
        let allowed = enforcer.enforce((
            request.user.as_str(),
            request.object.as_str(),
            request.action.as_str(),
        ))?;
        let decision = if allowed { "allow" } else { "deny" };
        metrics::counter!("warden_enforce_total", "decision" => decision).increment(1);
        tracing::debug!(
            user = %request.user,
            object = %request.object,
            action = %request.action,
            allowed,
            "enforce"
        );
        Ok(allowed)
    }

    pub async fn user_grants(&self, user: &str) -> UserGrants {
        let enforcer = self.enforcer.read().await;
        UserGrants {
            roles: enforcer.get_roles_for_user(user, None),
            permissions: enforcer.get_permissions_for_user(user, None),
            implicit_permissions: enforcer.get_implicit_permissions_for_user(user, None),
        }
    }

    pub async fn permission_map(&self, user: &str) -> PermissionMap {
        let enforcer = self.enforcer.read().await;
        let rules = enforcer.get_implicit_permissions_for_user(user, None);
        PermissionMap::from_rules(&rules)
    }

    pub async fn snapshot(&self) -> PolicySnapshot {
        let enforcer = self.enforcer.read().await;
        PolicySnapshot {
            policies: enforcer.get_policy(),
            grouping_policies: enforcer.get_grouping_policy(),
        }
    }

    /// Returns `false` when the rule already existed.
    pub async fn add_policy(&self, rule: &PolicyRule) -> EngineResult<bool> {
        self.commit(Change::AddPolicy, rule.to_params()).await
    }

    /// Returns `false` when the rule was not present.
    pub async fn remove_policy(&self, rule: &PolicyRule) -> EngineResult<bool> {
        self.commit(Change::RemovePolicy, rule.to_params()).await
    }

    pub async fn add_grouping(&self, rule: &GroupingRule) -> EngineResult<bool> {
        self.commit(Change::AddGrouping, rule.to_params()).await
    }

    pub async fn remove_grouping(&self, rule: &GroupingRule) -> EngineResult<bool> {
        self.commit(Change::RemoveGrouping, rule.to_params()).await
    }

    // Applies `change` and, when persisting, saves it. A failed save reverts
    // the change so the live policy matches the file and the error response.
    async fn commit(&self, change: Change, params: Vec<String>) -> EngineResult<bool> {
        let mut enforcer = self.enforcer.write().await;
        if !change.apply(&mut enforcer, params.clone()).await? {
            return Ok(false);
        }
        if self.persist {
            if let Err(err) = enforcer.save_policy().await {
                tracing::error!(op = change.op(), error = %err, "policy save failed, reverting");
                if let Err(undo) = change.inverse().apply(&mut enforcer, params).await {
                    tracing::error!(op = change.op(), error = %undo, "failed to revert policy change");
                }
                return Err(err.into());
            }
            tracing::info!(op = change.op(), "policy saved");
        }
        metrics::counter!("warden_policy_changes_total", "op" => change.op()).increment(1);
        Ok(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    AddPolicy,
    RemovePolicy,
    AddGrouping,
    RemoveGrouping,
}

impl Change {
    fn op(self) -> &'static str {
        match self {
            Change::AddPolicy => "add_policy",
            Change::RemovePolicy => "remove_policy",
            Change::AddGrouping => "add_grouping",
            Change::RemoveGrouping => "remove_grouping",
        }
    }

    fn inverse(self) -> Self {
        match self {
            Change::AddPolicy => Change::RemovePolicy,
            Change::RemovePolicy => Change::AddPolicy,
            Change::AddGrouping => Change::RemoveGrouping,
            Change::RemoveGrouping => Change::AddGrouping,
        }
    }

    async fn apply(self, enforcer: &mut Enforcer, params: Vec<String>) -> casbin::Result<bool> {
        match self {
            Change::AddPolicy => enforcer.add_policy(params).await,
            Change::RemovePolicy => enforcer.remove_policy(params).await,
            Change::AddGrouping => enforcer.add_grouping_policy(params).await,
            Change::RemoveGrouping => enforcer.remove_grouping_policy(params).await,
        }
    }
}
