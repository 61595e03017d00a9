//! Session gate: anonymous until `login`, back to anonymous on `logout`.
//!
//! Tokens are opaque and expire on a TTL so an abandoned console does not
//! stay signed in past a shift. All transitions go through named methods;
//! nothing else mutates session state.

use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;

/// An authenticated operator session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OperatorSession {
    pub token: String,
    pub employee_id: String,
}

/// Token-keyed session store with TTL expiry.
#[derive(Clone)]
pub struct SessionGate {
    sessions: Cache<String, String>,
}

impl SessionGate {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let sessions = Cache::builder()
            .max_capacity(config.session_max_entries)
            .time_to_live(Duration::from_secs(config.session_ttl_seconds))
            .build();

        Self { sessions }
    }

    /// Transition anonymous -> authenticated. Only called after a
    /// successful credential check.
    pub async fn login(&self, employee_id: &str) -> OperatorSession {
        let token = Uuid::new_v4().to_string();
        self.sessions
            .insert(token.clone(), employee_id.to_string())
            .await;

        tracing::info!(employee_id, "Operator logged in");

        OperatorSession {
            token,
            employee_id: employee_id.to_string(),
        }
    }

    /// Transition authenticated -> anonymous. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) {
        if let Some(employee_id) = self.sessions.get(token).await {
            tracing::info!(employee_id, "Operator logged out");
        }
        self.sessions.invalidate(token).await;
    }

    /// Resolve a bearer token to its employee id, if still valid.
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.sessions.get(token).await
    }
}
