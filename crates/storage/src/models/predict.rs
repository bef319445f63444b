use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A user's guessed final result for one match. Exactly one per
/// (user, match) pair; re-submissions update it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predict {
    pub id: i64,
    pub user_id: i64,
    pub match_id: i64,
    pub result1: i64,
    pub result2: i64,
    pub created: DateTime<Utc>,
}

impl Entity for Predict {
    const KIND: &'static str = "Predict";

    fn id(&self) -> i64 {
        self.id
    }
}
