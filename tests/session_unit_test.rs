//! Unit tests for the session gate.
//!
//! Run with: cargo test --test session_unit_test

use reformer_db::config::{Config, Deployment};
use reformer_db::session::SessionGate;

fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        session_ttl_seconds: 60,
        session_max_entries: 16,
        seed_on_empty: false,
        disable_rate_limiting: true,
        rate_limit_login_per_second: 1,
        rate_limit_login_burst: 10,
        change_channel_capacity: 16,
        deployment: Deployment::Local,
    }
}

#[tokio::test]
async fn login_issues_a_resolvable_token() {
    let gate = SessionGate::new(&test_config());

    let session = gate.login("EMP-1042").await;
    assert_eq!(session.employee_id, "EMP-1042");
    assert!(!session.token.is_empty());

    assert_eq!(
        gate.resolve(&session.token).await.as_deref(),
        Some("EMP-1042")
    );
}

#[tokio::test]
async fn tokens_are_unique_per_login() {
    let gate = SessionGate::new(&test_config());

    let first = gate.login("EMP-1042").await;
    let second = gate.login("EMP-1042").await;

    assert_ne!(first.token, second.token);
    // Both sessions stay live; logging in twice does not evict the first
    assert!(gate.resolve(&first.token).await.is_some());
    assert!(gate.resolve(&second.token).await.is_some());
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let gate = SessionGate::new(&test_config());

    let session = gate.login("EMP-7").await;
    gate.logout(&session.token).await;

    assert!(gate.resolve(&session.token).await.is_none());
}

#[tokio::test]
async fn unknown_tokens_do_not_resolve() {
    let gate = SessionGate::new(&test_config());

    assert!(gate.resolve("not-a-token").await.is_none());

    // Logging out an unknown token is a no-op
    gate.logout("not-a-token").await;
}
