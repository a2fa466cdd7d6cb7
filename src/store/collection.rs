//! Typed Collections
//!
//! A collection is one slot holding a JSON array of entities. The trait is
//! the CRUD contract widgets program against; `SlotCollection` is the slot
//! implementation.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{DomainError, DomainResult, Entity};

use super::slot_store::{SlotStore, SlotWatcher};

/// CRUD operations over one entity collection
#[async_trait]
pub trait Collection<T: Entity>: Send + Sync {
    /// All records, in stored order
    async fn list(&self) -> Vec<T>;

    /// Find a record by ID
    async fn find_by_id(&self, id: T::Id) -> Option<T>;

    /// Add a record to the end of the collection
    async fn append(&self, record: T);

    /// Replace the record with the same ID, leaving all others untouched
    async fn replace(&self, record: T) -> DomainResult<T>;

    /// Remove the record with the given ID. Removing an absent ID is a no-op.
    async fn remove(&self, id: T::Id);

    /// Overwrite the whole collection
    async fn save_all(&self, records: Vec<T>);
}

/// Slot-backed collection
pub struct SlotCollection<T> {
    store: SlotStore,
    key: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> SlotCollection<T> {
    pub fn new(store: SlotStore, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            _entity: PhantomData,
        }
    }

    /// The slot key this collection lives under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Subscribe to changes of this collection's slot
    pub fn watch(&self) -> SlotWatcher {
        self.store.subscribe(&self.key)
    }
}

impl<T> Clone for SlotCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T> Collection<T> for SlotCollection<T>
where
    T: Entity + Serialize + DeserializeOwned + 'static,
{
    async fn list(&self) -> Vec<T> {
        self.store.get(&self.key, Vec::new()).await
    }

    async fn find_by_id(&self, id: T::Id) -> Option<T> {
        self.list().await.into_iter().find(|r| r.id() == id)
    }

    async fn append(&self, record: T) {
        self.store
            .update(&self.key, Vec::new(), |mut records: Vec<T>| {
                records.push(record);
                records
            })
            .await;
    }

    async fn replace(&self, record: T) -> DomainResult<T> {
        let mut records = self.list().await;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => {
                return Err(DomainError::NotFound(format!(
                    "no record with that id in '{}'",
                    self.key
                )))
            }
        }
        self.store.set(&self.key, &records).await;
        Ok(record)
    }

    async fn remove(&self, id: T::Id) {
        self.store
            .update(&self.key, Vec::new(), |mut records: Vec<T>| {
                records.retain(|r| r.id() != id);
                records
            })
            .await;
    }

    async fn save_all(&self, records: Vec<T>) {
        self.store.set(&self.key, &records).await;
    }
}
