use chrono::Utc;

use crate::error::Result;
use crate::models::Predict;
use crate::store::{self, Entity, Store};

pub struct PredictRepository<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> PredictRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn by_id(&self, id: i64) -> Result<Predict> {
        store::require(self.store, id).await
    }

    pub async fn create(
        &self,
        user_id: i64,
        match_id: i64,
        result1: i64,
        result2: i64,
    ) -> Result<Predict> {
        let id = self.store.allocate_id(Predict::KIND).await?;
        let predict = Predict {
            id,
            user_id,
            match_id,
            result1,
            result2,
            created: Utc::now(),
        };
        store::persist(self.store, &predict).await?;
        Ok(predict)
    }

    pub async fn save(&self, predict: &Predict) -> Result<()> {
        store::persist(self.store, predict).await
    }

    pub async fn by_match(&self, match_id: i64) -> Result<Vec<Predict>> {
        store::find_by(self.store, "match_id", match_id).await
    }

    /// The (user, match) pair owns at most one prediction.
    pub async fn by_user_match(&self, user_id: i64, match_id: i64) -> Result<Option<Predict>> {
        let mut predicts: Vec<Predict> = store::find_by(self.store, "match_id", match_id).await?;
        predicts.retain(|p| p.user_id == user_id);
        Ok(predicts.into_iter().next())
    }
}
