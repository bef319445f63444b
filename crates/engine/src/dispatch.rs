//! Fire-and-forget hand-off of aggregation work to a worker queue.
//! At-least-once, no ordering across tasks, no delivery deadline; a job
//! that fails in the worker is logged and left to queue redelivery.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use storage::Store;

use crate::error::{EngineError, Result};
use crate::{aggregation, sync};

/// Worker endpoint that folds one finished match into the ledgers.
pub const UPDATE_SCORES: &str = "update-scores";
/// Worker endpoint that recomputes every participant's global score.
pub const SYNC_SCORES: &str = "sync-scores";

/// Abstract task submission. The payload is a flat string map, the shape
/// the underlying queue transport serializes.
pub trait Dispatcher: Send + Sync {
    fn enqueue(
        &self,
        endpoint: &str,
        payload: HashMap<String, String>,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// A serialized job description, the unit a queue transport carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub endpoint: String,
    pub payload: HashMap<String, String>,
}

impl Task {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| EngineError::Dispatch(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| EngineError::Dispatch(e.to_string()))
    }
}

pub fn update_scores_payload(tournament_id: i64, match_id: i64) -> HashMap<String, String> {
    HashMap::from([
        ("tournament".to_string(), tournament_id.to_string()),
        ("match".to_string(), match_id.to_string()),
    ])
}

pub fn sync_scores_payload(tournament_id: i64) -> HashMap<String, String> {
    HashMap::from([("tournament".to_string(), tournament_id.to_string())])
}

fn payload_id(payload: &HashMap<String, String>, key: &str) -> Result<i64> {
    let raw = payload
        .get(key)
        .ok_or_else(|| EngineError::Validation(format!("payload is missing field '{key}'")))?;
    raw.parse()
        .map_err(|_| EngineError::Validation(format!("payload field '{key}' is not an id: {raw}")))
}

/// Queue-backed dispatcher; tasks land on an unbounded channel drained
/// by [`run_worker`].
#[derive(Clone)]
pub struct QueueDispatcher {
    tx: mpsc::UnboundedSender<Task>,
}

impl QueueDispatcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Task>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Dispatcher for QueueDispatcher {
    async fn enqueue(&self, endpoint: &str, payload: HashMap<String, String>) -> Result<()> {
        tracing::info!(endpoint, "sending task to queue");
        self.tx
            .send(Task {
                endpoint: endpoint.to_string(),
                payload,
            })
            .map_err(|_| EngineError::Dispatch("worker queue is closed".to_string()))
    }
}

/// Discards every task. For deployments that run aggregation inline and
/// for tests that only exercise the synchronous path.
pub struct NullDispatcher;

impl Dispatcher for NullDispatcher {
    async fn enqueue(&self, _endpoint: &str, _payload: HashMap<String, String>) -> Result<()> {
        Ok(())
    }
}

/// Drain the queue, running each job out-of-band. Returns when every
/// sender is dropped and the queue is empty.
pub async fn run_worker<S: Store>(store: Arc<S>, mut rx: mpsc::UnboundedReceiver<Task>) {
    while let Some(task) = rx.recv().await {
        if let Err(err) = handle_task(store.as_ref(), &task).await {
            tracing::error!(endpoint = %task.endpoint, error = %err, "task failed");
        }
    }
}

async fn handle_task<S: Store>(store: &S, task: &Task) -> Result<()> {
    match task.endpoint.as_str() {
        UPDATE_SCORES => {
            let tournament_id = payload_id(&task.payload, "tournament")?;
            let match_id = payload_id(&task.payload, "match")?;
            aggregation::run(store, tournament_id, match_id).await?;
            Ok(())
        }
        SYNC_SCORES => {
            let tournament_id = payload_id(&task.payload, "tournament")?;
            sync::recompute_tournament(store, tournament_id).await?;
            Ok(())
        }
        other => Err(EngineError::Validation(format!(
            "unknown task endpoint '{other}'"
        ))),
    }
}
