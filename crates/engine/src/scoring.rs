//! The scoring rules every user's score evolves by:
//! a perfect prediction earns 3, a prediction matching the win/loss/tie
//! trend earns 1, anything else earns 0.

/// Points earned by a prediction against a final match result.
/// Rules apply in order, first match wins.
pub fn compute_score(result1: i64, result2: i64, predicted1: i64, predicted2: i64) -> i64 {
    // exact result
    if result1 == predicted1 && result2 == predicted2 {
        return 3;
    }
    // winning trend
    if result1 > result2 && predicted1 > predicted2 {
        return 1;
    }
    // losing trend
    if result1 < result2 && predicted1 < predicted2 {
        return 1;
    }
    // tied trend
    if result1 == result2 && predicted1 == predicted2 {
        return 1;
    }
    // bad predict
    0
}
