use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Running mean of a team's prediction accuracy in one tournament.
///
/// Folded incrementally, one sample per finished match:
/// `mean += (sample - mean) / (count + 1)`. A ledger created after the
/// tournament has already played matches seeds `match_count` with the
/// number of those matches so the mean stays consistent with history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accuracy {
    pub id: i64,
    pub team_id: i64,
    pub tournament_id: i64,
    pub mean: f64,
    pub match_count: i64,
}

impl Accuracy {
    /// Fold one accuracy sample in [0, 1] into the running mean and
    /// return the new mean.
    pub fn fold(&mut self, sample: f64) -> f64 {
        self.mean += (sample - self.mean) / (self.match_count + 1) as f64;
        self.match_count += 1;
        self.mean
    }
}

impl Entity for Accuracy {
    const KIND: &'static str = "Accuracy";

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::Accuracy;

    fn ledger(seed: i64) -> Accuracy {
        Accuracy {
            id: 1,
            team_id: 1,
            tournament_id: 1,
            mean: 0.0,
            match_count: seed,
        }
    }

    #[test]
    fn folded_mean_equals_arithmetic_mean() {
        let samples = [0.5, 1.0, 0.0, 0.75, 0.25, 1.0 / 3.0];
        let mut acc = ledger(0);
        for sample in samples {
            acc.fold(sample);
        }
        let expected = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((acc.mean - expected).abs() < 1e-12);
        assert_eq!(acc.match_count, samples.len() as i64);
    }

    #[test]
    fn seeded_count_weights_in_unrecorded_history() {
        // three earlier matches are assumed at the current mean
        let mut acc = ledger(3);
        let mean = acc.fold(1.0);
        assert!((mean - 0.25).abs() < 1e-12);
        assert_eq!(acc.match_count, 4);
    }

    #[test]
    fn mean_stays_within_unit_interval() {
        let mut acc = ledger(0);
        for _ in 0..50 {
            acc.fold(1.0);
        }
        assert!(acc.mean <= 1.0 + 1e-12);
        let mut acc = ledger(0);
        for _ in 0..50 {
            acc.fold(0.0);
        }
        assert!(acc.mean >= 0.0);
    }
}
