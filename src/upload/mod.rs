//! Binary object storage for recipe images.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload is empty")]
    Empty,
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),
    #[error("image is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for uploaded files. An upload yields a URL the object can be
/// retrieved from.
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` and return their public URL.
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, UploadError>;

    /// Fetch a previously uploaded object by key (the last URL segment).
    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, UploadError>;
}

/// An image as it arrives in a JSON command payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    pub filename: String,
    /// Base64 (standard alphabet, padded) file contents.
    pub data: String,
}

impl ImageUpload {
    pub fn decode(&self) -> Result<Vec<u8>, UploadError> {
        let bytes = STANDARD.decode(self.data.trim())?;
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        Ok(bytes)
    }

    pub fn encode(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            filename: filename.into(),
            data: STANDARD.encode(bytes),
        }
    }
}

/// HashMap-backed object store. URLs are `{base_url}{key}`.
#[derive(Clone)]
pub struct InMemoryObjectStore {
    base_url: String,
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        let key = object_key(filename)?;

        let mut objects = self
            .objects
            .write()
            .map_err(|_| UploadError::Unavailable("lock poisoned".into()))?;
        objects.insert(key.clone(), bytes.to_vec());

        info!(key, size = bytes.len(), "object uploaded");
        Ok(format!("{}{}", self.base_url, key))
    }

    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, UploadError> {
        let objects = self
            .objects
            .read()
            .map_err(|_| UploadError::Unavailable("lock poisoned".into()))?;
        Ok(objects.get(key).cloned())
    }
}

/// Unique storage key: a UUID prefix plus the sanitised base name.
fn object_key(filename: &str) -> Result<String, UploadError> {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        return Err(UploadError::InvalidFilename(filename.to_string()));
    }
    Ok(format!("{}-{}", Uuid::new_v4().simple(), sanitized))
}
