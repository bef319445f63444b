//! The batch job that folds a finished match into the ledgers: one
//! score-ledger append and global-score refresh per participant, one
//! accuracy-ledger fold per team. Items fail independently; a bad user
//! or team is reported and skipped, never aborts the rest of the roster.

use storage::Store;
use storage::models::{Match, Team, Tournament, User};
use storage::repository::{
    AccuracyRepository, MatchRepository, PredictRepository, ScoreRepository, TeamRepository,
    TournamentRepository, UserRepository,
};

use crate::error::{EngineError, Result};
use crate::scoring::compute_score;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ItemReport {
    pub id: i64,
    pub outcome: Outcome,
}

impl ItemReport {
    fn updated(id: i64) -> Self {
        Self {
            id,
            outcome: Outcome::Updated,
        }
    }

    fn skipped(id: i64, reason: impl Into<String>) -> Self {
        Self {
            id,
            outcome: Outcome::Skipped(reason.into()),
        }
    }

    fn failed(id: i64, reason: impl Into<String>) -> Self {
        Self {
            id,
            outcome: Outcome::Failed(reason.into()),
        }
    }
}

#[derive(Debug)]
pub struct AggregationReport {
    pub users: Vec<ItemReport>,
    pub teams: Vec<ItemReport>,
    /// The match was folded into the ledgers by an earlier run and this
    /// invocation did nothing.
    pub already_aggregated: bool,
}

/// Run the aggregation job for one finished match.
///
/// Missing tournament or match aborts the job; a match that is not
/// finished is rejected. A match already marked aggregated is skipped so
/// queue redelivery or an admin re-report cannot double-count it.
pub async fn run<S: Store>(
    store: &S,
    tournament_id: i64,
    match_id: i64,
) -> Result<AggregationReport> {
    let tournaments = TournamentRepository::new(store);
    let matches = MatchRepository::new(store);

    let tournament = tournaments.by_id(tournament_id).await?;
    let mut game = matches.by_id(match_id).await?;

    if !game.finished {
        return Err(EngineError::Validation(format!(
            "match {match_id} has no final result yet"
        )));
    }
    if game.aggregated {
        tracing::info!(match_id, "match already aggregated, skipping");
        return Ok(AggregationReport {
            users: Vec::new(),
            teams: Vec::new(),
            already_aggregated: true,
        });
    }

    tracing::info!(
        tournament_id,
        match_id,
        "aggregating scores for finished match"
    );

    let users = update_users_score(store, &tournament, &game).await?;
    let teams = update_teams_accuracy(store, &tournament, &game).await?;

    game.aggregated = true;
    matches.save(&game).await?;

    Ok(AggregationReport {
        users,
        teams,
        already_aggregated: false,
    })
}

/// User pass: append each participant's points for the match to their
/// score ledger, then refresh their materialized global score.
pub async fn update_users_score<S: Store>(
    store: &S,
    tournament: &Tournament,
    game: &Match,
) -> Result<Vec<ItemReport>> {
    let tournaments = TournamentRepository::new(store);
    let participants = tournaments.participants(tournament).await?;

    let mut reports = Vec::with_capacity(participants.len());
    for mut user in participants {
        let user_id = user.id;
        match score_user_for_match(store, &mut user, tournament, game).await {
            Ok(points) => {
                tracing::info!(user_id, points, "user score updated");
                reports.push(ItemReport::updated(user_id));
            }
            Err(err) => {
                tracing::error!(user_id, error = %err, "unable to update user score");
                reports.push(ItemReport::failed(user_id, err.to_string()));
            }
        }
    }
    Ok(reports)
}

async fn score_user_for_match<S: Store>(
    store: &S,
    user: &mut User,
    tournament: &Tournament,
    game: &Match,
) -> Result<i64> {
    let points = user_points_for_match(store, user.id, game).await?;

    let scores = ScoreRepository::new(store);
    let (mut ledger, _) = scores.get_or_create(user.id, tournament.id).await?;
    scores.append(&mut ledger, points).await?;

    user.score = global_score(store, user).await?;
    UserRepository::new(store).save(user).await?;
    Ok(points)
}

/// Points the user earned for the match; no prediction contributes 0.
async fn user_points_for_match<S: Store>(store: &S, user_id: i64, game: &Match) -> Result<i64> {
    let predicts = PredictRepository::new(store);
    Ok(match predicts.by_user_match(user_id, game.id).await? {
        Some(predict) => compute_score(game.result1, game.result2, predict.result1, predict.result2),
        None => 0,
    })
}

/// Sum of the latest ledger entry across every tournament the user is
/// enrolled in. Idempotent for an unchanged set of ledgers.
pub async fn global_score<S: Store>(store: &S, user: &User) -> Result<i64> {
    let scores = ScoreRepository::new(store);
    let mut total = 0;
    for tournament_id in &user.tournament_ids {
        total += scores.latest(user.id, *tournament_id).await?;
    }
    Ok(total)
}

/// Team pass: fold one per-match accuracy sample into every registered
/// team's accuracy ledger and refresh the team's summary.
pub async fn update_teams_accuracy<S: Store>(
    store: &S,
    tournament: &Tournament,
    game: &Match,
) -> Result<Vec<ItemReport>> {
    let tournaments = TournamentRepository::new(store);
    let teams = tournaments.teams(tournament).await?;
    let finished_matches = tournaments.finished_match_count(tournament).await?;

    let mut reports = Vec::with_capacity(teams.len());
    for mut team in teams {
        let team_id = team.id;
        if team.player_ids.is_empty() {
            // a team with 0 players has no well-defined accuracy
            reports.push(ItemReport::skipped(team_id, "team has no players"));
            continue;
        }
        match fold_team_accuracy(store, &mut team, tournament, game, finished_matches).await {
            Ok(mean) => {
                tracing::info!(team_id, mean, "team accuracy updated");
                reports.push(ItemReport::updated(team_id));
            }
            Err(err) => {
                tracing::error!(team_id, error = %err, "unable to update team accuracy");
                reports.push(ItemReport::failed(team_id, err.to_string()));
            }
        }
    }
    Ok(reports)
}

async fn fold_team_accuracy<S: Store>(
    store: &S,
    team: &mut Team,
    tournament: &Tournament,
    game: &Match,
    finished_matches: i64,
) -> Result<f64> {
    let team_repo = TeamRepository::new(store);
    let players = team_repo.players(team).await?;
    if players.is_empty() {
        return Err(EngineError::Validation(format!(
            "no resolvable players in team {}",
            team.id
        )));
    }

    let mut sum = 0;
    for player in &players {
        sum += user_points_for_match(store, player.id, game).await?;
    }
    // maximum score the team could earn in this match
    let max = 3 * players.len() as i64;
    let sample = sum as f64 / max as f64;

    let accuracies = AccuracyRepository::new(store);
    let (mut ledger, _) = accuracies
        .get_or_create(team.id, tournament.id, finished_matches)
        .await?;
    let mean = accuracies.add(&mut ledger, sample).await?;

    team.set_accuracy(tournament.id, ledger.id, mean);
    team_repo.save(team).await?;
    Ok(mean)
}
