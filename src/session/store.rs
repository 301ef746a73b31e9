use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use uuid::Uuid;

use super::Session;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session store lock poisoned")]
    LockPoisoned,
}

/// Sessions keyed by an opaque id handed to the client.
///
/// Clone-friendly via Arc; clones share the same sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `session` under a fresh id and return the id.
    pub fn create(&self, session: Session) -> Result<String, SessionError> {
        let id = Uuid::new_v4().to_string();
        self.save(&id, session)?;
        Ok(id)
    }

    pub fn load(&self, id: &str) -> Result<Option<Session>, SessionError> {
        let sessions = self.sessions.read().map_err(|_| SessionError::LockPoisoned)?;
        Ok(sessions.get(id).cloned())
    }

    pub fn save(&self, id: &str, session: Session) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::LockPoisoned)?;
        sessions.insert(id.to_string(), session);
        Ok(())
    }

    /// End a session. Returns true if it existed.
    pub fn remove(&self, id: &str) -> Result<bool, SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::LockPoisoned)?;
        Ok(sessions.remove(id).is_some())
    }
}
