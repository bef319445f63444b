use crate::error::Result;
use crate::models::Score;
use crate::store::{self, Entity, Store};

/// Whether a get-or-create lookup found an existing ledger or had to
/// allocate one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerState {
    Created,
    Existing,
}

pub struct ScoreRepository<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> ScoreRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn by_id(&self, id: i64) -> Result<Score> {
        store::require(self.store, id).await
    }

    /// Allocate an empty ledger for a (user, tournament) pair.
    pub async fn create(&self, user_id: i64, tournament_id: i64) -> Result<Score> {
        let id = self.store.allocate_id(Score::KIND).await?;
        let score = Score {
            id,
            user_id,
            tournament_id,
            scores: Vec::new(),
        };
        store::persist(self.store, &score).await?;
        Ok(score)
    }

    /// At most one ledger exists per pair; absence means "no score yet".
    pub async fn by_user_tournament(
        &self,
        user_id: i64,
        tournament_id: i64,
    ) -> Result<Option<Score>> {
        let mut ledgers: Vec<Score> = store::find_by(self.store, "user_id", user_id).await?;
        ledgers.retain(|s| s.tournament_id == tournament_id);
        Ok(ledgers.into_iter().next())
    }

    /// Single authoritative lazy-creation point for score ledgers.
    pub async fn get_or_create(
        &self,
        user_id: i64,
        tournament_id: i64,
    ) -> Result<(Score, LedgerState)> {
        match self.by_user_tournament(user_id, tournament_id).await? {
            Some(score) => Ok((score, LedgerState::Existing)),
            None => {
                let score = self.create(user_id, tournament_id).await?;
                Ok((score, LedgerState::Created))
            }
        }
    }

    /// Append one per-match point value and persist the ledger.
    pub async fn append(&self, score: &mut Score, points: i64) -> Result<()> {
        score.scores.push(points);
        store::persist(self.store, score).await
    }

    /// Latest entry of the pair's ledger, 0 when absent or empty.
    pub async fn latest(&self, user_id: i64, tournament_id: i64) -> Result<i64> {
        Ok(self
            .by_user_tournament(user_id, tournament_id)
            .await?
            .map(|s| s.latest())
            .unwrap_or(0))
    }
}
