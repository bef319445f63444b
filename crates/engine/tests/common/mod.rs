#![allow(dead_code)]

use chrono::{Duration, Utc};
use storage::MemStore;
use storage::models::{Match, Team, Tournament, User};
use storage::repository::{MatchRepository, TeamRepository, TournamentRepository, UserRepository};

/// The canonical scenario: one tournament, two enrolled users forming
/// one team, one scheduled match.
pub struct Fixture {
    pub store: MemStore,
    pub tournament: Tournament,
    pub game: Match,
    pub user_a: User,
    pub user_b: User,
    pub team: Team,
}

/// Best-effort subscriber so RUST_LOG surfaces engine logs in tests.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

pub async fn two_user_fixture() -> Fixture {
    init_tracing();
    let store = MemStore::new();

    let users = UserRepository::new(&store);
    let mut user_a = users.create("alice@example.com", "alice", "Alice").await.unwrap();
    let mut user_b = users.create("bob@example.com", "bob", "Bob").await.unwrap();

    let teams = TeamRepository::new(&store);
    let mut team = teams.create("the regulars", user_a.id).await.unwrap();
    team.player_ids = vec![user_a.id, user_b.id];
    teams.save(&team).await.unwrap();

    let tournaments = TournamentRepository::new(&store);
    let mut tournament = tournaments
        .create(Tournament {
            id: 0,
            name: "test cup".to_string(),
            description: "fixture tournament".to_string(),
            start: Utc::now(),
            end: Utc::now() + Duration::days(30),
            admin_id: user_a.id,
            user_ids: vec![user_a.id, user_b.id],
            team_ids: vec![team.id],
            match_ids: Vec::new(),
        })
        .await
        .unwrap();

    user_a.tournament_ids.push(tournament.id);
    users.save(&user_a).await.unwrap();
    user_b.tournament_ids.push(tournament.id);
    users.save(&user_b).await.unwrap();

    let game = add_match(&store, &mut tournament, 1).await;

    Fixture {
        store,
        tournament,
        game,
        user_a,
        user_b,
        team,
    }
}

/// Schedule one more match and register it in the tournament bracket.
pub async fn add_match(store: &MemStore, tournament: &mut Tournament, id_number: i64) -> Match {
    let matches = MatchRepository::new(store);
    let game = matches
        .create(Match {
            id: 0,
            id_number,
            tournament_id: tournament.id,
            team_id1: 0,
            team_id2: 0,
            rule: String::new(),
            result1: 0,
            result2: 0,
            finished: false,
            can_predict: true,
            aggregated: false,
            date: Utc::now(),
            phase: "first stage".to_string(),
            location: String::new(),
        })
        .await
        .unwrap();

    tournament.match_ids.push(game.id);
    TournamentRepository::new(store).save(tournament).await.unwrap();
    game
}
