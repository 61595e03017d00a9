use tokio::sync::broadcast::error::RecvError;

use crate::common::AppState;

use super::MergeOutcome;

/// Consume the change-notification channel and reconcile the board.
///
/// This is the only path by which writes made elsewhere (another handler,
/// a compensating revert) propagate into the live collection. Runs until
/// the channel closes at shutdown. If the receiver lags behind the channel
/// capacity, the board is reloaded wholesale from the store so no update
/// is silently lost.
pub async fn run_change_listener(state: AppState) {
    let mut rx = state.changes.subscribe();
    tracing::info!("Starting burner change listener");

    loop {
        match rx.recv().await {
            Ok(change) => match state.board.apply_remote(&change.row) {
                MergeOutcome::Applied => {
                    tracing::debug!(
                        wall = %change.row.wall,
                        row = change.row.row,
                        burner = change.row.burner_num,
                        state = %change.row.state,
                        "Burner change applied"
                    );
                }
                MergeOutcome::Stale => {
                    tracing::debug!(
                        wall = %change.row.wall,
                        row = change.row.row,
                        burner = change.row.burner_num,
                        "Stale burner change discarded"
                    );
                }
                MergeOutcome::UnknownKey => {
                    tracing::warn!(
                        wall = %change.row.wall,
                        row = change.row.row,
                        burner = change.row.burner_num,
                        "Change for unknown burner position ignored"
                    );
                }
                MergeOutcome::Malformed => {
                    tracing::warn!(
                        wall = %change.row.wall,
                        row = change.row.row,
                        burner = change.row.burner_num,
                        "Malformed burner change ignored"
                    );
                }
            },
            Err(RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "Change listener lagged, reloading board");
                if let Err(e) = state
                    .board
                    .load(&state.db, state.config.seed_on_empty)
                    .await
                {
                    tracing::error!(error = %e, "Board reload after lag failed");
                }
            }
            Err(RecvError::Closed) => {
                tracing::info!("Change channel closed, stopping listener");
                break;
            }
        }
    }
}
