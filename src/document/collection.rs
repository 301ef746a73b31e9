//! Collection - typed accessor for document CRUD operations.

use std::marker::PhantomData;

use super::{Document, DocumentError, DocumentStore, Modified, Versioned};

/// Typed view of one document collection in a store.
pub struct Collection<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: DocumentStore, M: Document> Collection<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a document by ID.
    pub fn get(&self, id: &str) -> Result<Option<Versioned<M>>, DocumentError> {
        self.store.get_document(id)
    }

    /// Insert a new document. Fails if it already exists.
    pub fn insert(&self, document: &M) -> Result<Versioned<M>, DocumentError> {
        self.store.insert_document(document)
    }

    /// Replace an existing document with optimistic concurrency.
    pub fn update(&self, document: &M, expected_version: u64) -> Result<Versioned<M>, DocumentError> {
        self.store.update_document(document, expected_version)
    }

    /// Delete a document by ID. Returns true if it existed.
    pub fn delete(&self, id: &str) -> Result<bool, DocumentError> {
        self.store.delete_document::<M>(id)
    }

    /// Find documents matching a predicate.
    pub fn find(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Vec<Versioned<M>>, DocumentError> {
        self.store.find_documents(predicate)
    }

    /// Atomic read-modify-write of one document.
    pub fn modify<F>(&self, id: &str, mut mutate: F) -> Result<Option<Modified<M>>, DocumentError>
    where
        F: FnMut(&mut M) -> bool,
    {
        self.store.modify_document(id, &mut mutate)
    }
}

/// Extension trait for typed collection access on any DocumentStore.
pub trait DocumentsExt: DocumentStore + Sized {
    /// Get a typed collection accessor.
    fn documents<M: Document>(&self) -> Collection<'_, Self, M> {
        Collection::new(self)
    }
}

impl<S: DocumentStore> DocumentsExt for S {}
