use serde::{Deserialize, Serialize};

use crate::store::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
    /// Sum of the latest score in every tournament the user plays in.
    /// Eagerly materialized for leaderboard reads, never computed lazily.
    pub score: i64,
    pub tournament_ids: Vec<i64>,
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn id(&self) -> i64 {
        self.id
    }
}
