//! Client-side helpers for the Warden policy server.
//!
//! # Purpose
//! Fetches permission data over HTTP and turns it into rendering decisions:
//! - [`WardenClient`] wraps every server endpoint.
//! - [`Authorizer`] answers `can(action, object)` locally from a permission
//!   map, fetched automatically or supplied by the caller.
//! - [`AuthSession`] tracks the signed-in user and asks the server for each
//!   decision.
//! - [`PermissionGate`] picks between granted and fallback content.
//!
//! # Key invariants
//! - Every failure path resolves to "not allowed"; callers never see a
//!   permission granted because a request failed.
//! - Decisions are made by the server's Casbin enforcer or by an exact lookup
//!   in a map the server produced; this crate does no policy matching.
//!
//! # Examples
//! ```rust
//! use warden_client::{Authorizer, GateDecision, PermissionGate};
//! use warden_authz::PermissionMap;
//!
//! let mut authorizer = Authorizer::manual();
//! let mut map = PermissionMap::new();
//! map.insert("read", "users");
//! authorizer.set_permissions(map);
//!
//! let gate = PermissionGate::new("read", "users");
//! assert_eq!(gate.evaluate_local(&authorizer), GateDecision::Granted);
//! ```

mod authorizer;
mod client;
mod config;
mod error;
mod gate;
mod session;
mod types;

pub use authorizer::{Authorizer, AuthorizerMode};
pub use client::WardenClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use gate::{GateDecision, PermissionGate};
pub use session::{AuthSession, SessionState, User};
pub use types::{
    DetailedPermissions, EnforceResponse, GroupingChange, HealthStatus, Policies, PolicyChange,
    UserPermissions,
};
