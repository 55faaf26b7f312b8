//! Middleware for the HTTP API.

pub mod auth;
pub mod cors;

pub use auth::{protect, require_session, AuthenticatedIdentity};
pub use cors::create_cors_layer;
