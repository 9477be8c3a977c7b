//! Warden authorization primitives shared by the policy server and clients.
//!
//! # Purpose
//! Wraps the Casbin RBAC engine: embeds the model and demo policy, builds
//! enforcers from embedded or on-disk sources, and projects implicit
//! permissions into the `action -> [object]` map consumed by clients.
//!
//! # How it fits
//! The policy server owns a single enforcer built here and answers HTTP
//! queries with it. Clients reuse the rule and map types to decode responses
//! and to make local decisions.
//!
//! # Key invariants
//! - Policy evaluation is always delegated to Casbin; this crate adds no
//!   matching logic of its own.
//! - Permission maps keep first-seen object order and never repeat an object
//!   under the same action.
//!
//! # Examples
//! ```rust
//! use warden_authz::PermissionMap;
//!
//! let rows = vec![vec!["alice".to_string(), "users".to_string(), "read".to_string()]];
//! let map = PermissionMap::from_rules(&rows);
//! assert!(map.allows("read", "users"));
//! ```
//!
//! # Common pitfalls
//! - `PolicySource::Files` requires both a model and a policy path.
//! - The matcher compares objects exactly; wildcards in policy rows are
//!   treated as literal strings.

mod casbin_model;
mod errors;
mod permission;
mod policy;
mod types;

pub use casbin_model::{
    build_enforcer, default_policy_string, rbac_model, rbac_model_string, PolicySource,
};
pub use errors::{AuthzError, AuthzResult};
pub use permission::PermissionMap;
pub use policy::parse_policy_csv;
pub use types::{EnforceRequest, GroupingRule, PolicyRule};
