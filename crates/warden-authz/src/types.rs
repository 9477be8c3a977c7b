//! Rule and request shapes shared by the server, the client, and storage.
//!
//! Incoming bodies deserialize with every field optional-by-default so a
//! missing field surfaces as a validation error rather than a JSON rejection.
use crate::{AuthzError, AuthzResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A `p` rule: `subject` may perform `action` on `object`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PolicyRule {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub action: String,
}

impl PolicyRule {
    pub fn new(
        subject: impl Into<String>,
        object: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            object: object.into(),
            action: action.into(),
        }
    }

    pub fn validate(&self) -> AuthzResult<()> {
        if self.subject.is_empty() || self.object.is_empty() || self.action.is_empty() {
            return Err(AuthzError::MissingFields("subject, object, action"));
        }
        Ok(())
    }

    /// Casbin parameter order for `p = sub, obj, act`.
    pub fn to_params(&self) -> Vec<String> {
        vec![
            self.subject.clone(),
            self.object.clone(),
            self.action.clone(),
        ]
    }
}

/// A `g` rule: `user` inherits every permission of `role`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupingRule {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub role: String,
}

impl GroupingRule {
    pub fn new(user: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            role: role.into(),
        }
    }

    pub fn validate(&self) -> AuthzResult<()> {
        if self.user.is_empty() || self.role.is_empty() {
            return Err(AuthzError::MissingFields("user, role"));
        }
        Ok(())
    }

    pub fn to_params(&self) -> Vec<String> {
        vec![self.user.clone(), self.role.clone()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnforceRequest {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub action: String,
}

impl EnforceRequest {
    pub fn new(
        user: impl Into<String>,
        object: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            object: object.into(),
            action: action.into(),
        }
    }

    pub fn validate(&self) -> AuthzResult<()> {
        if self.user.is_empty() || self.object.is_empty() || self.action.is_empty() {
            return Err(AuthzError::MissingFields("user, object, action"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforce_request_requires_every_field() {
        let ok = EnforceRequest::new("alice", "users", "read");
        assert!(ok.validate().is_ok());

        let missing: EnforceRequest =
            serde_json::from_str(r#"{"user":"alice","object":"users"}"#).expect("json");
        let err = missing.validate().expect_err("missing action");
        assert_eq!(
            err.to_string(),
            "Missing required fields: user, object, action"
        );

        let blank = EnforceRequest::new("", "users", "read");
        assert!(blank.validate().is_err());
    }

    #[test]
    fn policy_rule_params_follow_model_order() {
        let rule = PolicyRule::new("admin", "settings", "write");
        assert!(rule.validate().is_ok());
        assert_eq!(rule.to_params(), vec!["admin", "settings", "write"]);

        let missing: PolicyRule = serde_json::from_str(r#"{"subject":"admin"}"#).expect("json");
        assert!(matches!(
            missing.validate(),
            Err(AuthzError::MissingFields("subject, object, action"))
        ));
    }

    #[test]
    fn grouping_rule_requires_user_and_role() {
        assert!(GroupingRule::new("dave", "manager").validate().is_ok());
        assert!(GroupingRule::new("dave", "").validate().is_err());
        assert_eq!(
            GroupingRule::new("dave", "manager").to_params(),
            vec!["dave", "manager"]
        );
    }
}
