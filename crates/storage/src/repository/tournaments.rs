use crate::error::{Result, StorageError};
use crate::models::{Match, Team, Tournament, User};
use crate::store::{self, Entity, Store};

pub struct TournamentRepository<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> TournamentRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn by_id(&self, id: i64) -> Result<Tournament> {
        store::require(self.store, id).await
    }

    pub async fn create(&self, mut tournament: Tournament) -> Result<Tournament> {
        tournament.id = self.store.allocate_id(Tournament::KIND).await?;
        store::persist(self.store, &tournament).await?;
        Ok(tournament)
    }

    pub async fn save(&self, tournament: &Tournament) -> Result<()> {
        store::persist(self.store, tournament).await
    }

    /// Tear down a tournament and its bracket. Matches are never deleted
    /// individually; they go down with the tournament.
    pub async fn destroy(&self, tournament: &Tournament) -> Result<()> {
        for match_id in &tournament.match_ids {
            match store::remove::<S, Match>(self.store, *match_id).await {
                Ok(()) | Err(StorageError::NotFound) => {}
                Err(err) => return Err(err),
            }
        }
        store::remove::<S, Tournament>(self.store, tournament.id).await
    }

    /// Enrolled users. A dangling user id is logged and skipped rather
    /// than failing the whole roster.
    pub async fn participants(&self, tournament: &Tournament) -> Result<Vec<User>> {
        let mut users = Vec::with_capacity(tournament.user_ids.len());
        for user_id in &tournament.user_ids {
            match store::fetch::<S, User>(self.store, *user_id).await? {
                Some(user) => users.push(user),
                None => {
                    tracing::warn!(user_id, tournament_id = tournament.id, "participant not found");
                }
            }
        }
        Ok(users)
    }

    /// Teams registered in the tournament, dangling ids skipped.
    pub async fn teams(&self, tournament: &Tournament) -> Result<Vec<Team>> {
        let mut teams = Vec::with_capacity(tournament.team_ids.len());
        for team_id in &tournament.team_ids {
            match store::fetch::<S, Team>(self.store, *team_id).await? {
                Some(team) => teams.push(team),
                None => {
                    tracing::warn!(team_id, tournament_id = tournament.id, "team not found");
                }
            }
        }
        Ok(teams)
    }

    /// How many of the tournament's matches have finished so far,
    /// including any match that just got its result.
    pub async fn finished_match_count(&self, tournament: &Tournament) -> Result<i64> {
        let mut count = 0;
        for match_id in &tournament.match_ids {
            if let Some(game) = store::fetch::<S, Match>(self.store, *match_id).await?
                && game.finished
            {
                count += 1;
            }
        }
        Ok(count)
    }
}
