//! Signup and login.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::OnceCell;
use tokio::task;
use tracing::{error, info, warn};

use super::password::{hash_password, verify_password, HashCost, PasswordError};
use super::session::{Session, SessionStore};
use crate::db::{CredentialRepository, Database};
use crate::WorldError;

/// Authentication errors.
///
/// `Unauthorized` covers both an unknown username and a wrong password, so
/// callers cannot tell which one happened.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing or empty input.
    #[error("{0}")]
    InvalidInput(String),

    /// Username already taken.
    #[error("username already taken")]
    Conflict,

    /// Bad credentials.
    #[error("invalid username or password")]
    Unauthorized,

    /// Storage or hashing failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<WorldError> for AuthError {
    fn from(e: WorldError) -> Self {
        match e {
            WorldError::Conflict(_) => AuthError::Conflict,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

fn require_fields(username: &str, password: &str) -> Result<(), AuthError> {
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidInput(
            "username and password are required".to_string(),
        ));
    }
    Ok(())
}

/// Plaintext behind the stand-in hash verified for unknown usernames.
const DUMMY_PASSWORD: &str = "worldinfo-unknown-user";

/// Registers users and logs them in.
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    cost: HashCost,
    sessions: SessionStore,
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    /// Create a service over the credential database and a session store.
    pub fn new(db: Database, cost: HashCost, sessions: SessionStore) -> Self {
        Self {
            db,
            cost,
            sessions,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Hash verified in place of a real one when the username is unknown,
    /// so both login failures cost one Argon2 verification at `self.cost`.
    async fn dummy_hash(&self) -> Result<String, AuthError> {
        let cost = self.cost;
        let hash = self
            .dummy_hash
            .get_or_try_init(|| async move {
                task::spawn_blocking(move || hash_password(DUMMY_PASSWORD, &cost))
                    .await
                    .map_err(|e| AuthError::Internal(e.to_string()))?
                    .map_err(AuthError::from)
            })
            .await?;
        Ok(hash.clone())
    }

    /// The session store logins write to.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Register a new user.
    ///
    /// Two concurrent signups for one username cannot both succeed; the
    /// loser gets [`AuthError::Conflict`].
    pub async fn signup(&self, username: &str, password: &str) -> Result<(), AuthError> {
        require_fields(username, password)?;

        let repo = CredentialRepository::new(self.db.pool());
        if repo.exists(username).await? {
            info!(username = %username, "Signup rejected: username taken");
            return Err(AuthError::Conflict);
        }

        let cost = self.cost;
        let password = password.to_string();
        let hash = task::spawn_blocking(move || hash_password(&password, &cost))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .inspect_err(|e| error!(username = %username, "Password hashing failed: {}", e))?;

        match repo.create(username, &hash).await {
            Ok(_) => {
                info!(username = %username, "User registered");
                Ok(())
            }
            Err(WorldError::Conflict(_)) => {
                info!(username = %username, "Signup lost race: username taken");
                Err(AuthError::Conflict)
            }
            Err(e) => {
                error!(username = %username, "Failed to store credential: {}", e);
                Err(e.into())
            }
        }
    }

    /// Check credentials and open a new session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        require_fields(username, password)?;

        let repo = CredentialRepository::new(self.db.pool());
        let credential = repo.find(username).await?;

        // Unknown users still pay for a verification.
        let stored_hash = match &credential {
            Some(credential) => credential.password_hash.clone(),
            None => self.dummy_hash().await?,
        };

        let password = password.to_string();
        let matches = task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .inspect_err(|e| error!(username = %username, "Password verification failed: {}", e))?;

        if credential.is_none() {
            warn!(username = %username, "Login failed: unknown user");
            return Err(AuthError::Unauthorized);
        }
        if !matches {
            warn!(username = %username, "Login failed: wrong password");
            return Err(AuthError::Unauthorized);
        }

        let session = self.sessions.create(username).await?;
        info!(username = %username, "User logged in");
        Ok(session)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("cost", &self.cost)
            .field("sessions", &self.sessions)
            .finish()
    }
}
