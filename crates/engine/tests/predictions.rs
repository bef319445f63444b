mod common;

use engine::dispatch::NullDispatcher;
use engine::{EngineError, predictions, results};
use storage::repository::PredictRepository;

#[tokio::test]
async fn first_submission_creates_then_updates_in_place() {
    let fx = common::two_user_fixture().await;
    let store = &fx.store;

    let first = predictions::submit_prediction(store, fx.user_a.id, fx.game.id, 2, 1)
        .await
        .unwrap();
    let second = predictions::submit_prediction(store, fx.user_a.id, fx.game.id, 0, 3)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!((second.result1, second.result2), (0, 3));

    let predicts = PredictRepository::new(store);
    assert_eq!(predicts.by_match(fx.game.id).await.unwrap().len(), 1);

    let stored = predicts.by_id(first.id).await.unwrap();
    assert_eq!((stored.result1, stored.result2), (0, 3));
}

#[tokio::test]
async fn blocked_match_rejects_predictions() {
    let fx = common::two_user_fixture().await;
    let store = &fx.store;

    results::block_predictions(store, fx.tournament.id, fx.game.id)
        .await
        .unwrap();

    let err = predictions::submit_prediction(store, fx.user_a.id, fx.game.id, 2, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn finished_match_rejects_predictions() {
    let fx = common::two_user_fixture().await;
    let store = &fx.store;

    results::finalize_match(store, &NullDispatcher, fx.tournament.id, fx.game.id, 2, 1)
        .await
        .unwrap();

    let err = predictions::submit_prediction(store, fx.user_a.id, fx.game.id, 2, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn negative_predictions_are_rejected() {
    let fx = common::two_user_fixture().await;
    let err = predictions::submit_prediction(&fx.store, fx.user_a.id, fx.game.id, -1, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn predicting_an_unknown_match_is_not_found() {
    let fx = common::two_user_fixture().await;
    let err = predictions::submit_prediction(&fx.store, fx.user_a.id, 9999, 1, 0)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
