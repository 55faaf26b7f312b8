//! Concurrency tests for worldinfo.
//!
//! Racing signups for one username must leave exactly one credential.

mod common;

use std::future::IntoFuture;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::create_test_server;
use worldinfo::auth::{AuthError, AuthService, HashCost, SessionStore};
use worldinfo::db::CredentialRepository;
use worldinfo::Database;

fn cheap() -> HashCost {
    HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

/// Test concurrent signups through the service.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_signup_same_username() {
    let db = Database::open_in_memory().await.unwrap();
    let service = Arc::new(AuthService::new(
        db.clone(),
        cheap(),
        SessionStore::in_memory(),
    ));

    const NUM_SIGNUPS: usize = 8;

    let mut handles = Vec::new();
    for i in 0..NUM_SIGNUPS {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.signup("alice", &format!("pw{}", i)).await
        }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => ok += 1,
            Err(AuthError::Conflict) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(conflicts, NUM_SIGNUPS - 1);
    assert_eq!(CredentialRepository::new(db.pool()).count().await.unwrap(), 1);
}

/// Test concurrent signups over HTTP.
#[tokio::test]
async fn test_concurrent_signup_over_http() {
    let (server, db) = create_test_server().await;

    let (a, b) = futures::join!(
        server
            .post("/signup")
            .json(&json!({ "username": "alice", "password": "pw1" }))
            .into_future(),
        server
            .post("/signup")
            .json(&json!({ "username": "alice", "password": "pw2" }))
            .into_future(),
    );

    let mut statuses = vec![a.status_code(), b.status_code()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(CredentialRepository::new(db.pool()).count().await.unwrap(), 1);
}

/// Test concurrent logins each get their own session.
#[tokio::test]
async fn test_concurrent_logins() {
    let (server, _db) = create_test_server().await;
    common::signup(&server, "alice", "pw1").await;

    let (a, b) = futures::join!(
        server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "pw1" }))
            .into_future(),
        server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "pw1" }))
            .into_future(),
    );

    a.assert_status_ok();
    b.assert_status_ok();
    assert_ne!(
        a.cookie("session_id").value(),
        b.cookie("session_id").value()
    );
}
