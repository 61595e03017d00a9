use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;

use crate::board::{BurnerBoard, BurnerChange};
use crate::config::Config;
use crate::session::SessionGate;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub board: Arc<BurnerBoard>,
    pub sessions: SessionGate,
    /// Change-notification topic for the burners table. Every successful
    /// upsert (and every compensating revert) publishes the full
    /// post-update row here.
    pub changes: broadcast::Sender<BurnerChange>,
}

impl AppState {
    #[must_use]
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let (changes, _) = broadcast::channel(config.change_channel_capacity);
        let sessions = SessionGate::new(&config);

        Self {
            db,
            config: Arc::new(config),
            board: Arc::new(BurnerBoard::new()),
            sessions,
            changes,
        }
    }

    /// Publish a burner change. Having no subscribers is not an error;
    /// the board listener normally holds at least one receiver.
    pub fn publish(&self, change: BurnerChange) {
        if self.changes.send(change).is_err() {
            tracing::debug!("Burner change dropped: no subscribers");
        }
    }
}
