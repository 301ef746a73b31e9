//! Error types for command handlers.

use thiserror::Error;

use crate::account::AccountError;
use crate::document::DocumentError;
use crate::session::SessionError;
use crate::upload::UploadError;

/// Error type for command handler operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Guard rejected the command (input validation failed).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// Business logic rejected the command.
    #[error("rejected: {0}")]
    Rejected(String),
    /// Recipe or other resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// The session is not signed in, or the credentials were wrong.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Signed in, but not allowed to touch this resource.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// A vote or edit arrived before any recipe was opened in this session.
    #[error("no active recipe context")]
    NoActiveRecipe,
    /// The request names a different recipe than the one open in the session.
    #[error("stale recipe context: {open} is open, request was for {requested}")]
    StaleContext { open: String, requested: String },
    /// Optimistic concurrency conflict in the store.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The object store could not take the upload.
    #[error("upload failed: {0}")]
    Upload(UploadError),
    /// Store or session infrastructure failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::UnknownCommand(_) => 404,
            ServiceError::DecodeFailed(_) => 400,
            ServiceError::GuardRejected(_) => 400,
            ServiceError::Rejected(_) => 422,
            ServiceError::NotFound(_) => 404,
            ServiceError::Unauthorized(_) => 401,
            ServiceError::Forbidden(_) => 403,
            ServiceError::NoActiveRecipe => 409,
            ServiceError::StaleContext { .. } => 409,
            ServiceError::Conflict(_) => 409,
            ServiceError::Upload(_) => 502,
            ServiceError::Storage(_) => 500,
        }
    }
}

impl From<DocumentError> for ServiceError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound { collection, id } => {
                ServiceError::NotFound(format!("{}:{}", collection, id))
            }
            DocumentError::ConcurrencyConflict { .. } => ServiceError::Conflict(err.to_string()),
            DocumentError::Serde(_) | DocumentError::Storage(_) => {
                ServiceError::Storage(err.to_string())
            }
        }
    }
}

impl From<AccountError> for ServiceError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::AlreadyExists
            | AccountError::NameTooShort
            | AccountError::NameTooLong
            | AccountError::EmptyPassword => ServiceError::Rejected(err.to_string()),
            AccountError::WrongCredentials => ServiceError::Unauthorized(err.to_string()),
            AccountError::Hash(_) => ServiceError::Storage(err.to_string()),
            AccountError::Document(inner) => inner.into(),
        }
    }
}

impl From<UploadError> for ServiceError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Unavailable(_) => ServiceError::Upload(err),
            UploadError::Empty | UploadError::InvalidFilename(_) | UploadError::Encoding(_) => {
                ServiceError::Rejected(err.to_string())
            }
        }
    }
}

impl From<SessionError> for ServiceError {
    fn from(err: SessionError) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::DecodeFailed(err.to_string())
    }
}
