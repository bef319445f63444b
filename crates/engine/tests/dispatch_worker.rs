mod common;

use std::sync::Arc;

use engine::dispatch::{self, Dispatcher, QueueDispatcher};
use engine::{predictions, results, sync};
use storage::repository::UserRepository;

#[tokio::test]
async fn finalized_match_flows_through_the_queue_worker() {
    let fx = common::two_user_fixture().await;

    predictions::submit_prediction(&fx.store, fx.user_a.id, fx.game.id, 2, 1)
        .await
        .unwrap();

    let store = Arc::new(fx.store);
    let (dispatcher, rx) = QueueDispatcher::new();
    let worker = tokio::spawn(dispatch::run_worker(store.clone(), rx));

    results::finalize_match(
        store.as_ref(),
        &dispatcher,
        fx.tournament.id,
        fx.game.id,
        2,
        1,
    )
    .await
    .unwrap();

    // dropping the only sender lets the worker drain and exit
    drop(dispatcher);
    worker.await.unwrap();

    let users = UserRepository::new(store.as_ref());
    assert_eq!(users.by_id(fx.user_a.id).await.unwrap().score, 3);
    assert_eq!(users.by_id(fx.user_b.id).await.unwrap().score, 0);
}

#[tokio::test]
async fn resync_task_flows_through_the_queue_worker() {
    let fx = common::two_user_fixture().await;

    predictions::submit_prediction(&fx.store, fx.user_a.id, fx.game.id, 2, 1)
        .await
        .unwrap();

    let store = Arc::new(fx.store);
    let (dispatcher, rx) = QueueDispatcher::new();
    let worker = tokio::spawn(dispatch::run_worker(store.clone(), rx));

    results::finalize_match(
        store.as_ref(),
        &dispatcher,
        fx.tournament.id,
        fx.game.id,
        2,
        1,
    )
    .await
    .unwrap();
    sync::request_resync(&dispatcher, fx.tournament.id)
        .await
        .unwrap();

    drop(dispatcher);
    worker.await.unwrap();

    let users = UserRepository::new(store.as_ref());
    assert_eq!(users.by_id(fx.user_a.id).await.unwrap().score, 3);
}

#[tokio::test]
async fn failed_tasks_are_logged_and_dropped() {
    let fx = common::two_user_fixture().await;
    let store = Arc::new(fx.store);

    let (dispatcher, rx) = QueueDispatcher::new();
    let worker = tokio::spawn(dispatch::run_worker(store.clone(), rx));

    // aggregation for a match with no result fails inside the worker;
    // the queue keeps serving later tasks
    dispatcher
        .enqueue(
            dispatch::UPDATE_SCORES,
            dispatch::update_scores_payload(fx.tournament.id, fx.game.id),
        )
        .await
        .unwrap();
    sync::request_resync(&dispatcher, fx.tournament.id)
        .await
        .unwrap();

    drop(dispatcher);
    worker.await.unwrap();

    let users = UserRepository::new(store.as_ref());
    assert_eq!(users.by_id(fx.user_a.id).await.unwrap().score, 0);
}
