use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::entity::burners;
use crate::error::AppResult;
use crate::store;

use super::analytics::{StateCounts, WallAnalytics};
use super::{BurnerKey, BurnerState, Wall};

/// Outcome of merging a change notification into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Notification was newer than the held row and replaced it
    Applied,
    /// Held row is at least as new; notification discarded
    Stale,
    /// No row with that key is held; notification ignored
    UnknownKey,
    /// Notified row does not describe a valid grid position
    Malformed,
}

/// Live copy of the burner collection, keyed by grid position.
///
/// All mutation goes through named operations; lock scopes never span an
/// await point.
pub struct BurnerBoard {
    rows: RwLock<BTreeMap<BurnerKey, burners::Model>>,
}

impl Default for BurnerBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl BurnerBoard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Fetch the collection from the store, seeding the full grid first if
    /// the table is empty and seeding is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub async fn load(&self, db: &DatabaseConnection, seed_on_empty: bool) -> AppResult<()> {
        let mut listing = store::list_burners(db).await?;

        if listing.is_empty() && seed_on_empty {
            let seeded = store::seed_burners(db).await?;
            tracing::info!(rows = seeded, "Seeded burner grid");
            listing = store::list_burners(db).await?;
        }

        self.replace_all(listing);
        tracing::info!(rows = self.len(), "Burner board loaded");
        Ok(())
    }

    /// Replace the whole collection, dropping rows with malformed keys.
    pub fn replace_all(&self, listing: Vec<burners::Model>) {
        let mut map = BTreeMap::new();
        for row in listing {
            match BurnerKey::try_from(&row) {
                Ok(key) => {
                    map.insert(key, row);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding burner row with invalid position");
                }
            }
        }
        *self.rows.write().expect("board lock poisoned") = map;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().expect("board lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, key: &BurnerKey) -> Option<burners::Model> {
        self.rows
            .read()
            .expect("board lock poisoned")
            .get(key)
            .cloned()
    }

    /// Full collection in canonical (wall, row, burner_num) order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<burners::Model> {
        self.rows
            .read()
            .expect("board lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    /// Apply a local write intent before it is confirmed by the store.
    ///
    /// Returns the previous row as the known-good value for a possible
    /// compensating revert, or `None` if the position is not on the board
    /// (in which case nothing is changed).
    pub fn apply_local(
        &self,
        key: &BurnerKey,
        state: BurnerState,
        stamp: DateTime<Utc>,
    ) -> Option<burners::Model> {
        let mut rows = self.rows.write().expect("board lock poisoned");
        let held = rows.get_mut(key)?;
        let prior = held.clone();
        held.state = state.letter().to_string();
        held.updated_at = stamp.into();
        Some(prior)
    }

    /// Compensating update: restore a known-good row after a failed write.
    pub fn restore(&self, key: &BurnerKey, row: burners::Model) {
        let mut rows = self.rows.write().expect("board lock poisoned");
        if let Some(held) = rows.get_mut(key) {
            *held = row;
        }
    }

    /// Merge an inbound change notification.
    ///
    /// Only a strictly newer `updated_at` replaces the held row, so the
    /// race between an optimistic update and its own echo resolves the
    /// same way regardless of arrival order. Unknown keys are ignored:
    /// the grid is fixed, so a key miss means a stale or foreign event.
    pub fn apply_remote(&self, incoming: &burners::Model) -> MergeOutcome {
        let Ok(key) = BurnerKey::try_from(incoming) else {
            return MergeOutcome::Malformed;
        };

        let mut rows = self.rows.write().expect("board lock poisoned");
        match rows.get_mut(&key) {
            None => MergeOutcome::UnknownKey,
            Some(held) => {
                if incoming.updated_at > held.updated_at {
                    *held = incoming.clone();
                    MergeOutcome::Applied
                } else {
                    MergeOutcome::Stale
                }
            }
        }
    }

    /// Per-wall distribution analytics over the current collection.
    ///
    /// Every wall is reported even when it holds no rows yet.
    #[must_use]
    pub fn analytics(&self) -> Vec<WallAnalytics> {
        let rows = self.rows.read().expect("board lock poisoned");

        let mut counts: BTreeMap<Wall, StateCounts> = Wall::ALL
            .iter()
            .map(|w| (*w, StateCounts::default()))
            .collect();

        for (key, row) in rows.iter() {
            if let Ok(state) = row.state.parse::<BurnerState>() {
                if let Some(c) = counts.get_mut(&key.wall) {
                    c.record(state);
                }
            } else {
                tracing::warn!(burner = %key, state = %row.state, "Unrecognized burner state");
            }
        }

        counts
            .into_iter()
            .map(|(wall, c)| WallAnalytics::from_counts(wall, c))
            .collect()
    }
}
