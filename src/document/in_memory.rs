//! InMemoryDocumentStore - HashMap-backed document store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Document, DocumentError, DocumentStore, Modified, Versioned};

/// Internal stored representation of a document.
struct StoredDocument {
    bytes: Vec<u8>,
    version: u64,
}

type Storage = HashMap<String, StoredDocument>;

/// In-memory document store backed by a HashMap.
///
/// Storage key is `"collection:id"`, values are JSON bytes. Clone-friendly via Arc;
/// clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Storage>, DocumentError> {
        self.storage
            .read()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Storage>, DocumentError> {
        self.storage
            .write()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))
    }

    fn scan<M: Document>(
        storage: &Storage,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, DocumentError> {
        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in storage.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let data: M = serde_json::from_slice(&stored.bytes)?;
            if predicate(&data) {
                results.push(Versioned {
                    data,
                    version: stored.version,
                });
            }
        }

        Ok(results)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get_document<M: Document>(&self, id: &str) -> Result<Option<Versioned<M>>, DocumentError> {
        let key = Self::make_key(M::COLLECTION, id);
        let storage = self.read()?;

        match storage.get(&key) {
            Some(stored) => Ok(Some(Versioned {
                data: serde_json::from_slice(&stored.bytes)?,
                version: stored.version,
            })),
            None => Ok(None),
        }
    }

    fn insert_document<M: Document>(&self, document: &M) -> Result<Versioned<M>, DocumentError> {
        let key = Self::make_key(M::COLLECTION, document.id());
        let bytes = serde_json::to_vec(document)?;

        let mut storage = self.write()?;
        if let Some(existing) = storage.get(&key) {
            return Err(DocumentError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: document.id().to_string(),
                expected: 0,
                actual: existing.version,
            });
        }

        storage.insert(key, StoredDocument { bytes, version: 1 });

        Ok(Versioned {
            data: document.clone(),
            version: 1,
        })
    }

    fn update_document<M: Document>(
        &self,
        document: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, DocumentError> {
        let key = Self::make_key(M::COLLECTION, document.id());
        let bytes = serde_json::to_vec(document)?;

        let mut storage = self.write()?;
        let actual_version = storage
            .get(&key)
            .map(|s| s.version)
            .ok_or_else(|| DocumentError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: document.id().to_string(),
            })?;

        if actual_version != expected_version {
            return Err(DocumentError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: document.id().to_string(),
                expected: expected_version,
                actual: actual_version,
            });
        }

        let new_version = actual_version + 1;
        storage.insert(
            key,
            StoredDocument {
                bytes,
                version: new_version,
            },
        );

        Ok(Versioned {
            data: document.clone(),
            version: new_version,
        })
    }

    fn delete_document<M: Document>(&self, id: &str) -> Result<bool, DocumentError> {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self.write()?;
        Ok(storage.remove(&key).is_some())
    }

    fn find_documents<M: Document>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, DocumentError> {
        let storage = self.read()?;
        Self::scan(&storage, predicate)
    }

    fn modify_document<M: Document>(
        &self,
        id: &str,
        mutate: &mut dyn FnMut(&mut M) -> bool,
    ) -> Result<Option<Modified<M>>, DocumentError> {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self.write()?;

        let Some(stored) = storage.get_mut(&key) else {
            return Ok(None);
        };

        let mut data: M = serde_json::from_slice(&stored.bytes)?;
        let changed = mutate(&mut data);
        if changed {
            stored.bytes = serde_json::to_vec(&data)?;
            stored.version += 1;
        }

        Ok(Some(Modified {
            document: Versioned {
                data,
                version: stored.version,
            },
            changed,
        }))
    }
}
