//! Domain layer for caching-agent dispatch
//!
//! This module contains the account and configuration models plus the
//! port traits that resource handlers and caching agents implement.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{DispatchError, DispatchResult, HandlerError, HandlerResult};
