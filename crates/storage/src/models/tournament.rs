use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub admin_id: i64,
    pub user_ids: Vec<i64>,
    pub team_ids: Vec<i64>,
    pub match_ids: Vec<i64>,
}

impl Entity for Tournament {
    const KIND: &'static str = "Tournament";

    fn id(&self) -> i64 {
        self.id
    }
}
