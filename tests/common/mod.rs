//! Shared helpers for the HTTP API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use worldinfo::config::{AuthConfig, Config, SessionBackend};
use worldinfo::db::{CityRepository, Country, CountryRepository, NewCity};
use worldinfo::web::{create_router, AppState};
use worldinfo::Database;

/// Configuration with a cheap Argon2 cost so tests stay fast.
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.auth = AuthConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    config
}

/// Create a test server over an existing database.
pub fn create_test_server_with(db: Database, config: &Config) -> TestServer {
    let app_state = Arc::new(AppState::from_config(db, config));
    let router = create_router(app_state, &config.server.cors_origins);
    TestServer::new(router).expect("Failed to create test server")
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let server = create_test_server_with(db.clone(), &create_test_config());
    (server, db)
}

/// Create a test server whose sessions live in the database.
pub async fn create_db_session_server(db: Database) -> TestServer {
    let mut config = create_test_config();
    config.session.store = SessionBackend::Database;
    create_test_server_with(db, &config)
}

/// Register a user, asserting success.
pub async fn signup(server: &TestServer, username: &str, password: &str) {
    server
        .post("/signup")
        .json(&json!({ "username": username, "password": password }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

/// Log in and return the session cookie.
pub async fn login(
    server: &TestServer,
    username: &str,
    password: &str,
) -> axum_extra::extract::cookie::Cookie<'static> {
    let response = server
        .post("/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();
    response.cookie("session_id")
}

/// Seed a small slice of the world dataset.
pub async fn seed_world(db: &Database) {
    let countries = CountryRepository::new(db.pool());
    for (code, name, population) in [
        ("JPN", "Japan", 126_714_000),
        ("NLD", "Netherlands", 15_864_000),
        ("ATA", "Antarctica", 0),
    ] {
        countries
            .insert(&Country {
                code: code.to_string(),
                name: name.to_string(),
                population,
            })
            .await
            .unwrap();
    }

    let cities = CityRepository::new(db.pool());
    for (name, code, district, population) in [
        ("Tokyo", "JPN", "Tokyo-to", 7_980_230),
        ("Osaka", "JPN", "Osaka", 2_595_674),
        ("Amsterdam", "NLD", "Noord-Holland", 731_200),
        ("McMurdo", "ATA", "Ross", 1_000),
    ] {
        cities
            .insert(&NewCity {
                name: Some(name.to_string()),
                country_code: Some(code.to_string()),
                district: Some(district.to_string()),
                population: Some(population),
            })
            .await
            .unwrap();
    }
}
