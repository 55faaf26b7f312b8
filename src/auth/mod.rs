//! Authentication module for worldinfo.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Login sessions with memory and database backends
//! - Signup and login

mod password;
mod service;
mod session;

pub use password::{hash_password, verify_password, HashCost, PasswordError};
pub use service::{AuthError, AuthService};
pub use session::{Session, SessionId, SessionStore};
