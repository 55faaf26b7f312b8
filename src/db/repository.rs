//! Credential repository for worldinfo.
//!
//! Persistence for user credentials. Usernames are matched exactly
//! (SQLite's default BINARY collation), so "Alice" and "alice" are
//! different accounts.

use sqlx::SqlitePool;

use super::credential::UserCredential;
use crate::{Result, WorldError};

/// Repository for user credentials.
pub struct CredentialRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CredentialRepository<'a> {
    /// Create a new CredentialRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Check if a username is already taken.
    pub async fn exists(&self, username: &str) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
                .bind(username)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }

    /// Insert a new credential if the username is free.
    ///
    /// The insert is a single statement, so two racing callers cannot both
    /// succeed: the loser gets `WorldError::Conflict`.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<UserCredential> {
        let result = sqlx::query(
            "INSERT INTO users (username, hashed_pass) VALUES (?, ?)
             ON CONFLICT(username) DO NOTHING",
        )
        .bind(username)
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(WorldError::Conflict(format!("user '{username}'")));
        }

        Ok(UserCredential::new(username, password_hash))
    }

    /// Get a credential by exact username.
    pub async fn find(&self, username: &str) -> Result<Option<UserCredential>> {
        let credential = sqlx::query_as::<_, UserCredential>(
            "SELECT username, hashed_pass FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(credential)
    }

    /// Count stored credentials.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
