//! Context passed to command handlers.
//!
//! Carries the parsed input, the caller's session, and a reference to the
//! application state. Handlers access everything they need through the context.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ServiceError;
use crate::session::{Session, ViewContext};

/// The context passed to every command handler.
///
/// Generic over `A`, the application state the service was built with.
pub struct Context<'a, A> {
    input: Value,
    session: &'a mut Session,
    app: &'a A,
}

impl<'a, A> Context<'a, A> {
    pub(crate) fn new(input: Value, session: &'a mut Session, app: &'a A) -> Self {
        Self {
            input,
            session,
            app,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, ServiceError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| ServiceError::DecodeFailed(e.to_string()))
    }

    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        self.session
    }

    /// The signed-in user. Returns `Unauthorized` for anonymous sessions.
    pub fn user_id(&self) -> Result<&str, ServiceError> {
        self.session
            .user()
            .ok_or_else(|| ServiceError::Unauthorized("sign in required".into()))
    }

    /// The recipe open in this session. Returns `NoActiveRecipe` if none is.
    pub fn view(&self) -> Result<&ViewContext, ServiceError> {
        self.session.view().ok_or(ServiceError::NoActiveRecipe)
    }

    pub fn app(&self) -> &'a A {
        self.app
    }

    /// Check if the raw input contains a field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }

    /// Check if the raw input contains all specified fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
