//! Scoring core for group sports-prediction tournaments: computes
//! per-user points from predictions, maintains per-tournament score
//! ledgers and per-team accuracy ledgers, and keeps every user's global
//! score materialized for leaderboard reads.

pub mod aggregation;
pub mod dispatch;
pub mod error;
pub mod predictions;
pub mod results;
pub mod scoring;
pub mod sync;

pub use error::{EngineError, Result};
pub use scoring::compute_score;
