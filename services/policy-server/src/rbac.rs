//! RBAC module wiring.
//!
//! # Purpose
//! Exposes the shared policy engine that owns the Casbin enforcer.
pub mod engine;
