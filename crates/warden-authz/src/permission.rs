use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Permissions grouped by action: `{"read": ["users", "profile"], ...}`.
///
/// This is the shape client authorizers load to answer `can(action, object)`
/// without a server round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PermissionMap(BTreeMap<String, Vec<String>>);

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project Casbin permission rows (`[subject, object, action]`) into a map.
    ///
    /// Rows with fewer than three fields are skipped. Objects are kept in
    /// first-seen order and de-duplicated per action, since implicit
    /// permissions repeat when several roles grant the same rule.
    pub fn from_rules(rules: &[Vec<String>]) -> Self {
        let mut map = Self::new();
        for rule in rules {
            if rule.len() < 3 {
                tracing::debug!(len = rule.len(), "skipping short permission row");
                continue;
            }
            map.insert(&rule[2], &rule[1]);
        }
        map
    }

    /// Returns `false` when the object was already listed under `action`.
    pub fn insert(&mut self, action: &str, object: &str) -> bool {
        let objects = self.0.entry(action.to_string()).or_default();
        if objects.iter().any(|existing| existing == object) {
            return false;
        }
        objects.push(object.to_string());
        true
    }

    pub fn allows(&self, action: &str, object: &str) -> bool {
        self.0
            .get(action)
            .is_some_and(|objects| objects.iter().any(|existing| existing == object))
    }

    pub fn objects(&self, action: &str) -> &[String] {
        self.0.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<BTreeMap<String, Vec<String>>> for PermissionMap {
    fn from(value: BTreeMap<String, Vec<String>>) -> Self {
        Self(value)
    }
}
