//! Documents - typed, versioned, collection-keyed storage.
//!
//! Every persisted record in recipe_box (recipes, accounts, ingredient index
//! entries) is a `Document`. Stores expose CRUD by id, predicate queries, and
//! an atomic read-modify-write used for targeted updates.
//!
//! ## Example
//!
//! ```ignore
//! use recipe_box::{Document, DocumentsExt, InMemoryDocumentStore};
//!
//! #[derive(Clone, Serialize, Deserialize, Document)]
//! #[document(collection = "ingredients")]
//! struct Ingredient {
//!     #[document(id)]
//!     name: String,
//! }
//!
//! let store = InMemoryDocumentStore::new();
//! store.documents::<Ingredient>().insert(&Ingredient { name: "basil".into() })?;
//! let loaded = store.documents::<Ingredient>().get("basil")?;
//! ```

mod collection;
mod in_memory;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for types that can be stored in a `DocumentStore`.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this document type (e.g. "recipes").
    /// Maps to a collection in MongoDB, a table in SQL, a key prefix in KV stores.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this document.
    fn id(&self) -> &str;
}

/// A versioned wrapper around document data for optimistic concurrency control.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Result of an atomic read-modify-write.
#[derive(Debug, Clone)]
pub struct Modified<T> {
    pub document: Versioned<T>,
    /// Whether the mutation reported a change. Unchanged documents are not written.
    pub changed: bool,
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on {collection}:{id} (expected version {expected}, actual {actual})")]
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    #[error("document serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("document storage error: {0}")]
    Storage(String),
    /// Document not found.
    #[error("document not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Serde(err.to_string())
    }
}

pub use collection::{Collection, DocumentsExt};
pub use in_memory::InMemoryDocumentStore;
pub use store::DocumentStore;
