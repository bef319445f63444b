//! Administrative full resync: recompute every participant's global
//! score from their ledgers, without task distribution. Degraded-mode
//! repair path for when incremental aggregation left scores stale.

use storage::Store;
use storage::models::User;
use storage::repository::{TournamentRepository, UserRepository};

use crate::aggregation::{self, ItemReport, Outcome};
use crate::dispatch::{self, Dispatcher};
use crate::error::Result;

/// Recompute and persist the global score of every tournament
/// participant. Per-user failures are reported and skipped.
pub async fn recompute_tournament<S: Store>(
    store: &S,
    tournament_id: i64,
) -> Result<Vec<ItemReport>> {
    let tournaments = TournamentRepository::new(store);
    let tournament = tournaments.by_id(tournament_id).await?;
    let participants = tournaments.participants(&tournament).await?;

    tracing::info!(
        tournament_id,
        participants = participants.len(),
        "recomputing global scores"
    );

    let mut reports = Vec::with_capacity(participants.len());
    for mut user in participants {
        let user_id = user.id;
        match refresh_global_score(store, &mut user).await {
            Ok(()) => reports.push(ItemReport {
                id: user_id,
                outcome: Outcome::Updated,
            }),
            Err(err) => {
                tracing::error!(user_id, error = %err, "unable to update global score");
                reports.push(ItemReport {
                    id: user_id,
                    outcome: Outcome::Failed(err.to_string()),
                });
            }
        }
    }
    tracing::info!(tournament_id, "resync done");
    Ok(reports)
}

async fn refresh_global_score<S: Store>(store: &S, user: &mut User) -> Result<()> {
    user.score = aggregation::global_score(store, user).await?;
    UserRepository::new(store).save(user).await?;
    Ok(())
}

/// Hand the resync to the worker queue instead of running it inline.
pub async fn request_resync<D: Dispatcher>(dispatcher: &D, tournament_id: i64) -> Result<()> {
    dispatcher
        .enqueue(
            dispatch::SYNC_SCORES,
            dispatch::sync_scores_payload(tournament_id),
        )
        .await
}
