//! Configuration module for worldinfo.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, WorldError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (`:memory:` for a throwaway database).
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/world.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Where session records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process memory; sessions are lost on restart.
    #[default]
    Memory,
    /// The `sessions` table of the main database.
    Database,
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session store backend.
    #[serde(default)]
    pub store: SessionBackend,
    /// Name of the cookie carrying the session ID.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie is marked `Secure`.
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: SessionBackend::default(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

/// Password hashing cost configuration (Argon2id).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Time cost (iterations).
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/worldinfo.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Password hashing configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(WorldError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| WorldError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `WORLDINFO_DATABASE_PATH`: Override the database path
    /// - `WORLDINFO_PORT`: Override the HTTP port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("WORLDINFO_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
        if let Ok(port) = std::env::var("WORLDINFO_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid WORLDINFO_PORT"),
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The database path is empty
    /// - The session cookie name is empty
    /// - The Argon2 cost parameters are out of range
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(WorldError::Config("database.path must not be empty".to_string()));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(WorldError::Config(
                "session.cookie_name must not be empty".to_string(),
            ));
        }
        argon2::Params::new(
            self.auth.memory_kib,
            self.auth.iterations,
            self.auth.parallelism,
            None,
        )
        .map_err(|e| WorldError::Config(format!("invalid [auth] cost: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.cors_origins.is_empty());

        assert_eq!(config.database.path, "data/world.db");

        assert_eq!(config.session.store, SessionBackend::Memory);
        assert_eq!(config.session.cookie_name, "session_id");
        assert!(!config.session.secure_cookie);

        assert_eq!(config.auth.memory_kib, 19456);
        assert_eq!(config.auth.iterations, 2);
        assert_eq!(config.auth.parallelism, 1);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/worldinfo.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:5173"]

[database]
path = "custom/world.sqlite"

[session]
store = "database"
cookie_name = "sid"
secure_cookie = true

[auth]
memory_kib = 65536
iterations = 3
parallelism = 4

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);

        assert_eq!(config.database.path, "custom/world.sqlite");

        assert_eq!(config.session.store, SessionBackend::Database);
        assert_eq!(config.session.cookie_name, "sid");
        assert!(config.session.secure_cookie);

        assert_eq!(config.auth.memory_kib, 65536);
        assert_eq!(config.auth.iterations, 3);
        assert_eq!(config.auth.parallelism, 4);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 9000

[session]
store = "memory"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.session.store, SessionBackend::Memory);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/world.db");
        assert_eq!(config.session.cookie_name, "session_id");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "data/world.db");
    }

    #[test]
    fn test_parse_unknown_session_backend() {
        let result = Config::parse("[session]\nstore = \"redis\"\n");
        assert!(matches!(result, Err(WorldError::Config(_))));
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(WorldError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(matches!(result, Err(WorldError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database]\npath = \":memory:\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database.path, ":memory:");
    }

    #[test]
    fn test_apply_env_overrides_database_path() {
        let original = std::env::var("WORLDINFO_DATABASE_PATH").ok();

        std::env::set_var("WORLDINFO_DATABASE_PATH", "env/world.db");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.database.path, "env/world.db");

        if let Some(val) = original {
            std::env::set_var("WORLDINFO_DATABASE_PATH", val);
        } else {
            std::env::remove_var("WORLDINFO_DATABASE_PATH");
        }
    }

    #[test]
    fn test_apply_env_overrides_port() {
        let original = std::env::var("WORLDINFO_PORT").ok();

        std::env::set_var("WORLDINFO_PORT", "not-a-port");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.server.port, 8080);

        std::env::set_var("WORLDINFO_PORT", "9191");
        config.apply_env_overrides();
        assert_eq!(config.server.port, 9191);

        if let Some(val) = original {
            std::env::set_var("WORLDINFO_PORT", val);
        } else {
            std::env::remove_var("WORLDINFO_PORT");
        }
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.database.path = "  ".to_string();

        let result = config.validate();
        if let Err(WorldError::Config(msg)) = result {
            assert!(msg.contains("database.path"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_empty_cookie_name() {
        let mut config = Config::default();
        config.session.cookie_name = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_argon2_params() {
        let mut config = Config::default();
        config.auth.parallelism = 0;

        let result = config.validate();
        if let Err(WorldError::Config(msg)) = result {
            assert!(msg.contains("[auth]"));
        } else {
            panic!("Expected Config error");
        }
    }
}
