//! Policy-server library crate.
//!
//! # Purpose
//! Exposes the HTTP API, application wiring, configuration, and the shared
//! Casbin policy engine for use by the binary and tests.
//!
//! # Notes
//! Module boundaries mirror the HTTP API surface.
pub mod api;
pub mod app;
pub mod config;
pub mod observability;
pub mod rbac;
