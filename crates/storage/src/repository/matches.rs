use crate::error::Result;
use crate::models::{Match, Tournament};
use crate::store::{self, Entity, Store};

pub struct MatchRepository<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> MatchRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn by_id(&self, id: i64) -> Result<Match> {
        store::require(self.store, id).await
    }

    /// Persist a match created during bracket generation, allocating its
    /// identifier.
    pub async fn create(&self, mut game: Match) -> Result<Match> {
        game.id = self.store.allocate_id(Match::KIND).await?;
        store::persist(self.store, &game).await?;
        Ok(game)
    }

    pub async fn save(&self, game: &Match) -> Result<()> {
        store::persist(self.store, game).await
    }

    /// Resolve a match by its stage sequence number within a tournament.
    pub async fn by_id_number(
        &self,
        tournament: &Tournament,
        id_number: i64,
    ) -> Result<Option<Match>> {
        for match_id in &tournament.match_ids {
            if let Some(game) = store::fetch::<S, Match>(self.store, *match_id).await?
                && game.id_number == id_number
            {
                return Ok(Some(game));
            }
        }
        Ok(None)
    }
}
