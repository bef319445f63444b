use crate::error::Result;
use crate::models::Accuracy;
use crate::repository::scores::LedgerState;
use crate::store::{self, Entity, Store};

pub struct AccuracyRepository<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> AccuracyRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn by_id(&self, id: i64) -> Result<Accuracy> {
        store::require(self.store, id).await
    }

    /// Allocate a ledger with mean 0.0 and a pre-seeded sample count.
    pub async fn create(
        &self,
        team_id: i64,
        tournament_id: i64,
        seed_count: i64,
    ) -> Result<Accuracy> {
        let id = self.store.allocate_id(Accuracy::KIND).await?;
        let accuracy = Accuracy {
            id,
            team_id,
            tournament_id,
            mean: 0.0,
            match_count: seed_count,
        };
        store::persist(self.store, &accuracy).await?;
        Ok(accuracy)
    }

    pub async fn by_team_tournament(
        &self,
        team_id: i64,
        tournament_id: i64,
    ) -> Result<Option<Accuracy>> {
        let mut ledgers: Vec<Accuracy> = store::find_by(self.store, "team_id", team_id).await?;
        ledgers.retain(|a| a.tournament_id == tournament_id);
        Ok(ledgers.into_iter().next())
    }

    /// Single authoritative lazy-creation point for accuracy ledgers.
    ///
    /// `finished_matches` is the tournament's count of finished matches
    /// including the one triggering the update; a late-created ledger
    /// seeds its count from the earlier ones so the mean it reconstructs
    /// stays consistent with matches already played.
    pub async fn get_or_create(
        &self,
        team_id: i64,
        tournament_id: i64,
        finished_matches: i64,
    ) -> Result<(Accuracy, LedgerState)> {
        match self.by_team_tournament(team_id, tournament_id).await? {
            Some(accuracy) => Ok((accuracy, LedgerState::Existing)),
            None => {
                let seed = (finished_matches - 1).max(0);
                let accuracy = self.create(team_id, tournament_id, seed).await?;
                Ok((accuracy, LedgerState::Created))
            }
        }
    }

    /// Fold one sample into the running mean, persist, return the new
    /// mean.
    pub async fn add(&self, accuracy: &mut Accuracy, sample: f64) -> Result<f64> {
        let mean = accuracy.fold(sample);
        store::persist(self.store, accuracy).await?;
        Ok(mean)
    }

    /// None while the team has no recorded accuracy in the tournament.
    pub async fn current_accuracy(
        &self,
        team_id: i64,
        tournament_id: i64,
    ) -> Result<Option<f64>> {
        Ok(self
            .by_team_tournament(team_id, tournament_id)
            .await?
            .map(|a| a.mean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::MemStore;

    #[tokio::test]
    async fn seed_excludes_the_triggering_match_and_floors_at_zero() {
        let store = MemStore::new();
        let accuracies = AccuracyRepository::new(&store);

        // first finished match in the tournament
        let (ledger, state) = accuracies.get_or_create(5, 1, 1).await.unwrap();
        assert_eq!(state, LedgerState::Created);
        assert_eq!(ledger.match_count, 0);

        // ledger created late, three matches already finished
        let (ledger, _) = accuracies.get_or_create(6, 1, 3).await.unwrap();
        assert_eq!(ledger.match_count, 2);

        // degenerate count never goes negative
        let (ledger, _) = accuracies.get_or_create(7, 1, 0).await.unwrap();
        assert_eq!(ledger.match_count, 0);
    }

    #[tokio::test]
    async fn add_persists_the_new_mean() {
        let store = MemStore::new();
        let accuracies = AccuracyRepository::new(&store);
        let (mut ledger, _) = accuracies.get_or_create(5, 1, 1).await.unwrap();

        let mean = accuracies.add(&mut ledger, 0.5).await.unwrap();
        assert!((mean - 0.5).abs() < 1e-12);

        let stored = accuracies.by_team_tournament(5, 1).await.unwrap().unwrap();
        assert!((stored.mean - 0.5).abs() < 1e-12);
        assert_eq!(stored.match_count, 1);
        assert_eq!(
            accuracies.current_accuracy(5, 1).await.unwrap(),
            Some(stored.mean)
        );
    }

    #[tokio::test]
    async fn absent_ledger_has_no_accuracy() {
        let store = MemStore::new();
        let accuracies = AccuracyRepository::new(&store);
        assert!(accuracies.current_accuracy(5, 1).await.unwrap().is_none());
    }
}
