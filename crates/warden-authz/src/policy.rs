//! Casbin CSV policy reader for the embedded demo policy.
//!
//! Only the two sections the RBAC model defines are accepted: `p` rows with
//! three fields and `g` rows with two.
use crate::{AuthzError, AuthzResult, GroupingRule, PolicyRule};

pub fn parse_policy_csv(text: &str) -> AuthzResult<(Vec<PolicyRule>, Vec<GroupingRule>)> {
    let mut policies = Vec::new();
    let mut groupings = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let invalid = |reason: &str| AuthzError::InvalidRule {
            line: idx + 1,
            reason: reason.to_string(),
        };
        match fields.as_slice() {
            ["p", subject, object, action] => {
                let rule = PolicyRule::new(*subject, *object, *action);
                rule.validate().map_err(|_| invalid("empty field"))?;
                policies.push(rule);
            }
            ["g", user, role] => {
                let rule = GroupingRule::new(*user, *role);
                rule.validate().map_err(|_| invalid("empty field"))?;
                groupings.push(rule);
            }
            ["p", ..] => return Err(invalid("p rows take subject, object, action")),
            ["g", ..] => return Err(invalid("g rows take user, role")),
            _ => return Err(invalid("unknown section")),
        }
    }

    Ok((policies, groupings))
}
