//! API handlers.

pub mod auth;
pub mod city;
pub mod country;

pub use auth::*;
pub use city::*;
pub use country::*;

use crate::auth::{AuthService, HashCost, SessionStore};
use crate::config::{Config, SessionConfig};
use crate::db::Database;

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database for reference data.
    pub db: Database,
    /// Signup and login.
    pub auth: AuthService,
    /// Session cookie settings.
    pub session: SessionConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, auth: AuthService, session: SessionConfig) -> Self {
        Self { db, auth, session }
    }

    /// Wire the auth service and session store from configuration.
    pub fn from_config(db: Database, config: &Config) -> Self {
        let sessions = SessionStore::from_config(&config.session, &db);
        let auth = AuthService::new(db.clone(), HashCost::from(&config.auth), sessions);
        Self::new(db, auth, config.session.clone())
    }
}
