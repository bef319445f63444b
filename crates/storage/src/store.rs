use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, StorageError};

/// A persisted record kind. Entities are stored as JSON documents, each
/// keyed by `(kind, id)`.
pub trait Entity: Serialize + DeserializeOwned + Send {
    const KIND: &'static str;

    fn id(&self) -> i64;
}

/// Document store contract: lookup by id and query by top-level field
/// equality. No transactions, no atomic multi-record writes; every `put`
/// replaces the whole document.
pub trait Store: Send + Sync {
    /// Reserve a fresh identifier for `kind`.
    fn allocate_id(&self, kind: &str) -> impl Future<Output = Result<i64>> + Send;

    fn get(&self, kind: &str, id: i64) -> impl Future<Output = Result<Option<Value>>> + Send;

    fn put(&self, kind: &str, id: i64, doc: Value) -> impl Future<Output = Result<()>> + Send;

    /// Remove a document. [`StorageError::NotFound`] if it never existed.
    fn delete(&self, kind: &str, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn find_all(&self, kind: &str) -> impl Future<Output = Result<Vec<Value>>> + Send;

    fn find_by_field(
        &self,
        kind: &str,
        field: &str,
        value: &Value,
    ) -> impl Future<Output = Result<Vec<Value>>> + Send;
}

pub async fn fetch<S: Store, E: Entity>(store: &S, id: i64) -> Result<Option<E>> {
    match store.get(E::KIND, id).await? {
        Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
        None => Ok(None),
    }
}

pub async fn require<S: Store, E: Entity>(store: &S, id: i64) -> Result<E> {
    fetch(store, id).await?.ok_or(StorageError::NotFound)
}

pub async fn persist<S: Store, E: Entity>(store: &S, entity: &E) -> Result<()> {
    let doc = serde_json::to_value(entity)?;
    store.put(E::KIND, entity.id(), doc).await
}

pub async fn find_by<S: Store, E: Entity>(
    store: &S,
    field: &str,
    value: impl Into<Value>,
) -> Result<Vec<E>> {
    let docs = store.find_by_field(E::KIND, field, &value.into()).await?;
    docs.into_iter()
        .map(|doc| serde_json::from_value(doc).map_err(StorageError::from))
        .collect()
}

pub async fn remove<S: Store, E: Entity>(store: &S, id: i64) -> Result<()> {
    store.delete(E::KIND, id).await
}
