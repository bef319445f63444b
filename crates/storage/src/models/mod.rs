mod accuracy;
mod matches;
mod predict;
mod score;
mod team;
mod tournament;
mod user;

pub use accuracy::Accuracy;
pub use matches::Match;
pub use predict::Predict;
pub use score::Score;
pub use team::{Team, TournamentAccuracy};
pub use tournament::Tournament;
pub use user::User;
