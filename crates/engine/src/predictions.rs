use storage::Store;
use storage::models::Predict;
use storage::repository::{MatchRepository, PredictRepository};

use crate::error::{EngineError, Result};

/// Create or update the (user, match) prediction.
///
/// Accepted only while the match still takes predictions and has no
/// final result; a re-submission overwrites the earlier guess in place.
pub async fn submit_prediction<S: Store>(
    store: &S,
    user_id: i64,
    match_id: i64,
    predicted1: i64,
    predicted2: i64,
) -> Result<Predict> {
    if predicted1 < 0 || predicted2 < 0 {
        return Err(EngineError::Validation(
            "predicted results must be non-negative".to_string(),
        ));
    }

    let game = MatchRepository::new(store).by_id(match_id).await?;
    if game.finished || !game.can_predict {
        return Err(EngineError::Validation(format!(
            "match {match_id} no longer accepts predictions"
        )));
    }

    let predicts = PredictRepository::new(store);
    match predicts.by_user_match(user_id, match_id).await? {
        Some(mut predict) => {
            predict.result1 = predicted1;
            predict.result2 = predicted2;
            predicts.save(&predict).await?;
            Ok(predict)
        }
        None => Ok(predicts
            .create(user_id, match_id, predicted1, predicted2)
            .await?),
    }
}
