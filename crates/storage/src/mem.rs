use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::error::{Result, StorageError};
use crate::store::Store;

/// In-memory document store.
///
/// The deployment datastore is an external collaborator; this is the
/// in-process implementation the engine ships and tests against. The
/// single lock serializes whole-store access, so per-document
/// read-modify-write sequences issued by one job never interleave at the
/// document level.
pub struct MemStore {
    kinds: RwLock<HashMap<String, BTreeMap<i64, Value>>>,
    counters: Mutex<HashMap<String, i64>>,
    failing_puts: Mutex<HashSet<(String, i64)>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            kinds: RwLock::new(HashMap::new()),
            counters: Mutex::new(HashMap::new()),
            failing_puts: Mutex::new(HashSet::new()),
        }
    }

    /// Make every subsequent `put` of `(kind, id)` fail with
    /// [`StorageError::Update`]. Lets callers exercise partial-failure
    /// paths without a real backend outage.
    pub async fn fail_put(&self, kind: &str, id: i64) {
        self.failing_puts
            .lock()
            .await
            .insert((kind.to_string(), id));
    }

    pub async fn clear_put_failures(&self) {
        self.failing_puts.lock().await.clear();
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemStore {
    async fn allocate_id(&self, kind: &str) -> Result<i64> {
        let mut counters = self.counters.lock().await;
        let next = counters.entry(kind.to_string()).or_insert(0);
        *next += 1;
        Ok(*next)
    }

    async fn get(&self, kind: &str, id: i64) -> Result<Option<Value>> {
        let kinds = self.kinds.read().await;
        Ok(kinds.get(kind).and_then(|docs| docs.get(&id)).cloned())
    }

    async fn put(&self, kind: &str, id: i64, doc: Value) -> Result<()> {
        if self
            .failing_puts
            .lock()
            .await
            .contains(&(kind.to_string(), id))
        {
            return Err(StorageError::Update(format!(
                "injected write failure for {kind}:{id}"
            )));
        }
        let mut kinds = self.kinds.write().await;
        kinds.entry(kind.to_string()).or_default().insert(id, doc);
        Ok(())
    }

    async fn delete(&self, kind: &str, id: i64) -> Result<()> {
        let mut kinds = self.kinds.write().await;
        if kinds
            .get_mut(kind)
            .and_then(|docs| docs.remove(&id))
            .is_none()
        {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn find_all(&self, kind: &str) -> Result<Vec<Value>> {
        let kinds = self.kinds.read().await;
        Ok(kinds
            .get(kind)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_field(&self, kind: &str, field: &str, value: &Value) -> Result<Vec<Value>> {
        let kinds = self.kinds.read().await;
        Ok(kinds
            .get(kind)
            .map(|docs| {
                docs.values()
                    .filter(|doc| doc.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
