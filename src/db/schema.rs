//! Database schema and migrations for worldinfo.
//!
//! Migrations are applied in order when the database is opened; the
//! `schema_version` table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Credentials
    r#"
CREATE TABLE users (
    username    TEXT PRIMARY KEY NOT NULL,
    hashed_pass TEXT NOT NULL               -- Argon2 PHC string
);
"#,
    // v2: Reference data, same shape as the classic "world" sample database
    r#"
CREATE TABLE country (
    code        TEXT PRIMARY KEY NOT NULL,
    name        TEXT NOT NULL,
    population  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE city (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT,
    country_code  TEXT,
    district      TEXT,
    population    INTEGER
);

CREATE INDEX idx_city_name ON city(name);
CREATE INDEX idx_city_country_code ON city(country_code);
"#,
    // v3: Server-side sessions for the database session backend
    r#"
CREATE TABLE sessions (
    id          TEXT PRIMARY KEY NOT NULL,
    username    TEXT NOT NULL REFERENCES users(username),
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_sessions_username ON sessions(username);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_users_table_keyed_by_username() {
        let first = MIGRATIONS[0];
        assert!(first.contains("CREATE TABLE users"));
        assert!(first.contains("username    TEXT PRIMARY KEY"));
        assert!(first.contains("hashed_pass"));
    }

    #[test]
    fn test_reference_tables() {
        let reference = MIGRATIONS[1];
        assert!(reference.contains("CREATE TABLE country"));
        assert!(reference.contains("CREATE TABLE city"));
        assert!(reference.contains("country_code"));
    }

    #[test]
    fn test_sessions_table() {
        let sessions = MIGRATIONS[2];
        assert!(sessions.contains("CREATE TABLE sessions"));
        assert!(sessions.contains("REFERENCES users(username)"));
    }
}
