pub mod accuracies;
pub mod matches;
pub mod predicts;
pub mod scores;
pub mod teams;
pub mod tournaments;
pub mod users;

pub use accuracies::AccuracyRepository;
pub use matches::MatchRepository;
pub use predicts::PredictRepository;
pub use scores::{LedgerState, ScoreRepository};
pub use teams::TeamRepository;
pub use tournaments::TournamentRepository;
pub use users::UserRepository;
