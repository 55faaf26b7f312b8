//! Credential model for worldinfo.

use std::fmt;

/// A stored user credential: username plus Argon2 hash of the password.
///
/// Deliberately not `Serialize`; the hash must not cross the HTTP boundary.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserCredential {
    /// Login username (primary key, case-sensitive).
    pub username: String,
    /// PHC-formatted password hash.
    #[sqlx(rename = "hashed_pass")]
    pub password_hash: String,
}

impl UserCredential {
    /// Create a credential from a username and an already computed hash.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredential")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
