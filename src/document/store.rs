//! DocumentStore - abstract CRUD storage for documents.

use super::{Document, DocumentError, Modified, Versioned};

/// Abstract CRUD storage for documents.
///
/// Methods carry a `_document` suffix; the `Collection` wrapper provides
/// short names scoped to one document type.
pub trait DocumentStore: Send + Sync {
    /// Get a document by ID. Returns None if not found.
    fn get_document<M: Document>(&self, id: &str) -> Result<Option<Versioned<M>>, DocumentError>;

    /// Insert a new document. Fails with a conflict if the id is taken.
    fn insert_document<M: Document>(&self, document: &M) -> Result<Versioned<M>, DocumentError>;

    /// Replace an existing document with optimistic concurrency control.
    fn update_document<M: Document>(
        &self,
        document: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, DocumentError>;

    /// Delete a document by ID. Returns true if it existed.
    fn delete_document<M: Document>(&self, id: &str) -> Result<bool, DocumentError>;

    /// Find documents matching a predicate.
    fn find_documents<M: Document>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, DocumentError>;

    /// Atomically read, mutate and write back one document.
    ///
    /// `mutate` returns whether it changed the document; only changed
    /// documents are written and get a new version. Returns None when the
    /// id is unknown.
    fn modify_document<M: Document>(
        &self,
        id: &str,
        mutate: &mut dyn FnMut(&mut M) -> bool,
    ) -> Result<Option<Modified<M>>, DocumentError>;
}
