//! Login sessions for worldinfo.
//!
//! A [`Session`] can only be built by the [`SessionStore`], and the store only
//! builds one when asked by a successful login. Sessions are never expired or
//! removed here; they live as long as the backing store keeps them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::config::{SessionBackend, SessionConfig};
use crate::db::Database;
use crate::{Result, WorldError};

/// Opaque session token sent to the client in the session cookie.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new unguessable ID (UUID v4).
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a token presented by a client.
    ///
    /// This only names a session to look up; it does not prove one exists.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only a prefix; the full token is a bearer credential.
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "SessionId({prefix}..)")
    }
}

/// A logged-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    username: String,
    created_at: DateTime<Utc>,
}

impl Session {
    /// The session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// The username this session was issued to.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// When the session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone)]
enum Backend {
    Memory(Arc<RwLock<HashMap<SessionId, Session>>>),
    Database(SqlitePool),
}

/// Shared session store.
///
/// Cloning is cheap; clones share the same sessions.
#[derive(Clone)]
pub struct SessionStore {
    backend: Backend,
}

impl SessionStore {
    /// Create a store that keeps sessions in process memory.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(RwLock::new(HashMap::new()))),
        }
    }

    /// Create a store backed by the `sessions` table.
    pub fn database(db: &Database) -> Self {
        Self {
            backend: Backend::Database(db.pool().clone()),
        }
    }

    /// Create the store selected by `[session] store`.
    pub fn from_config(config: &SessionConfig, db: &Database) -> Self {
        match config.store {
            SessionBackend::Memory => Self::in_memory(),
            SessionBackend::Database => Self::database(db),
        }
    }

    /// Which backend this store uses.
    pub fn backend(&self) -> SessionBackend {
        match self.backend {
            Backend::Memory(_) => SessionBackend::Memory,
            Backend::Database(_) => SessionBackend::Database,
        }
    }

    /// Create and record a new session for `username`.
    pub(crate) async fn create(&self, username: &str) -> Result<Session> {
        let session = Session {
            id: SessionId::generate(),
            username: username.to_string(),
            created_at: Utc::now(),
        };

        match &self.backend {
            Backend::Memory(sessions) => {
                sessions
                    .write()
                    .await
                    .insert(session.id.clone(), session.clone());
            }
            Backend::Database(pool) => {
                sqlx::query("INSERT INTO sessions (id, username, created_at) VALUES (?, ?, ?)")
                    .bind(session.id.as_str())
                    .bind(&session.username)
                    .bind(session.created_at)
                    .execute(pool)
                    .await
                    .map_err(|e| WorldError::Session(e.to_string()))?;
            }
        }

        debug!(username = %session.username, session = ?session.id, "Session created");
        Ok(session)
    }

    /// Look up a session by ID.
    pub async fn load(&self, id: &SessionId) -> Result<Option<Session>> {
        match &self.backend {
            Backend::Memory(sessions) => Ok(sessions.read().await.get(id).cloned()),
            Backend::Database(pool) => {
                let row: Option<(String, DateTime<Utc>)> =
                    sqlx::query_as("SELECT username, created_at FROM sessions WHERE id = ?")
                        .bind(id.as_str())
                        .fetch_optional(pool)
                        .await
                        .map_err(|e| WorldError::Session(e.to_string()))?;

                Ok(row.map(|(username, created_at)| Session {
                    id: id.clone(),
                    username,
                    created_at,
                }))
            }
        }
    }

    /// Number of recorded sessions.
    pub async fn count(&self) -> Result<usize> {
        match &self.backend {
            Backend::Memory(sessions) => Ok(sessions.read().await.len()),
            Backend::Database(pool) => {
                let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
                    .fetch_one(pool)
                    .await
                    .map_err(|e| WorldError::Session(e.to_string()))?;
                Ok(count as usize)
            }
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.backend())
            .finish()
    }
}
