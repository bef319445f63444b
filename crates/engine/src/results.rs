//! Match-result entry points: the admin reports a final result, the
//! match locks for predictions, and an aggregation task goes to the
//! queue.

use storage::Store;
use storage::models::Match;
use storage::repository::{MatchRepository, TournamentRepository};

use crate::dispatch::{self, Dispatcher};
use crate::error::{EngineError, Result};

/// Parse an admin-reported result of the form "2 1": exactly two
/// whitespace-separated non-negative integers.
pub fn parse_result(raw: &str) -> Result<(i64, i64)> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(EngineError::Validation(format!(
            "expected two results, got {}",
            parts.len()
        )));
    }
    let result1 = parse_side(parts[0])?;
    let result2 = parse_side(parts[1])?;
    Ok((result1, result2))
}

fn parse_side(raw: &str) -> Result<i64> {
    let value: i64 = raw
        .parse()
        .map_err(|_| EngineError::Validation(format!("result '{raw}' is not a number")))?;
    if value < 0 {
        return Err(EngineError::Validation(format!(
            "result '{raw}' is negative"
        )));
    }
    Ok(value)
}

/// Mark a match finished with its final result, lock predictions, and
/// enqueue the aggregation job.
pub async fn finalize_match<S: Store, D: Dispatcher>(
    store: &S,
    dispatcher: &D,
    tournament_id: i64,
    match_id: i64,
    result1: i64,
    result2: i64,
) -> Result<Match> {
    if result1 < 0 || result2 < 0 {
        return Err(EngineError::Validation(
            "final results must be non-negative".to_string(),
        ));
    }

    let tournament = TournamentRepository::new(store).by_id(tournament_id).await?;
    let matches = MatchRepository::new(store);
    let mut game = matches.by_id(match_id).await?;
    if game.tournament_id != tournament.id {
        return Err(EngineError::Validation(format!(
            "match {match_id} does not belong to tournament {tournament_id}"
        )));
    }

    game.result1 = result1;
    game.result2 = result2;
    game.finished = true;
    game.can_predict = false;
    matches.save(&game).await?;

    tracing::info!(
        tournament_id,
        match_id,
        result1,
        result2,
        "match finalized, dispatching score update"
    );
    dispatcher
        .enqueue(
            dispatch::UPDATE_SCORES,
            dispatch::update_scores_payload(tournament.id, game.id),
        )
        .await?;
    Ok(game)
}

/// Admin lock: stop accepting predictions for a match without reporting
/// a result.
pub async fn block_predictions<S: Store>(
    store: &S,
    tournament_id: i64,
    match_id: i64,
) -> Result<Match> {
    let tournament = TournamentRepository::new(store).by_id(tournament_id).await?;
    let matches = MatchRepository::new(store);
    let mut game = matches.by_id(match_id).await?;
    if game.tournament_id != tournament.id {
        return Err(EngineError::Validation(format!(
            "match {match_id} does not belong to tournament {tournament_id}"
        )));
    }

    game.can_predict = false;
    matches.save(&game).await?;
    Ok(game)
}
