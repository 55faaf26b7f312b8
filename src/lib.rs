//! worldinfo - city and country reference data over HTTP
//!
//! Serves a geographic dataset and guards writes behind username/password
//! login with server-side sessions.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthError, AuthService, HashCost, PasswordError, Session,
    SessionId, SessionStore,
};
pub use config::Config;
pub use db::{
    City, CityRepository, Country, CountryRepository, CredentialRepository, Database, NewCity,
    UserCredential,
};
pub use error::{Result, WorldError};
pub use web::{create_router, ApiError, AppState, WebServer};
