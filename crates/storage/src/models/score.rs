use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Progression of one user's score in one tournament.
///
/// Append-only: one value per finished match, drawn from {0, 1, 3}.
/// The latest entry is the user's current score in the tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub id: i64,
    pub user_id: i64,
    pub tournament_id: i64,
    pub scores: Vec<i64>,
}

impl Score {
    /// Current score in the tournament, 0 while the ledger is empty.
    pub fn latest(&self) -> i64 {
        self.scores.last().copied().unwrap_or(0)
    }
}

impl Entity for Score {
    const KIND: &'static str = "Score";

    fn id(&self) -> i64 {
        self.id
    }
}
