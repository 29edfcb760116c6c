//! HTTP request handlers.

/// Paste lifecycle and listing endpoints.
pub mod paste;
/// User provisioning and profile endpoints.
pub mod user;
