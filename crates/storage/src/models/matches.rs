use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A single scheduled game between two sides of a tournament stage.
///
/// Before the bracket resolves, `rule` holds the placeholder pairing
/// (e.g. "1A 2B") and the team ids are zero. Once an admin reports a
/// result the match is `finished` and its results are final; `aggregated`
/// flips when the scoring job has folded the match into the ledgers, so
/// a redelivered job cannot double-count it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    /// Sequence number of the match within its tournament stage.
    pub id_number: i64,
    pub tournament_id: i64,
    pub team_id1: i64,
    pub team_id2: i64,
    pub rule: String,
    pub result1: i64,
    pub result2: i64,
    pub finished: bool,
    pub can_predict: bool,
    pub aggregated: bool,
    pub date: DateTime<Utc>,
    pub phase: String,
    pub location: String,
}

impl Entity for Match {
    const KIND: &'static str = "Match";

    fn id(&self) -> i64 {
        self.id
    }
}
