//! Policy-server HTTP API module.
//!
//! # Purpose
//! Exposes route handler modules plus the shared error and payload types.
pub mod enforce;
pub mod error;
pub mod openapi;
pub mod permissions;
pub mod policies;
pub mod system;
pub mod types;
