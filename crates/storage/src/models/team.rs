use serde::{Deserialize, Serialize};

use crate::store::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub admin_id: i64,
    pub player_ids: Vec<i64>,
    /// Per-tournament accuracy summaries, refreshed after every fold.
    pub accuracies: Vec<TournamentAccuracy>,
}

/// Pointer from a team to its accuracy ledger in one tournament, plus
/// the last folded mean for cheap display reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentAccuracy {
    pub tournament_id: i64,
    pub accuracy_id: i64,
    pub mean: f64,
}

impl Team {
    pub fn accuracy_for(&self, tournament_id: i64) -> Option<&TournamentAccuracy> {
        self.accuracies
            .iter()
            .find(|a| a.tournament_id == tournament_id)
    }

    /// Record or refresh the accuracy summary for a tournament.
    pub fn set_accuracy(&mut self, tournament_id: i64, accuracy_id: i64, mean: f64) {
        match self
            .accuracies
            .iter_mut()
            .find(|a| a.tournament_id == tournament_id)
        {
            Some(entry) => {
                entry.accuracy_id = accuracy_id;
                entry.mean = mean;
            }
            None => self.accuracies.push(TournamentAccuracy {
                tournament_id,
                accuracy_id,
                mean,
            }),
        }
    }
}

impl Entity for Team {
    const KIND: &'static str = "Team";

    fn id(&self) -> i64 {
        self.id
    }
}
