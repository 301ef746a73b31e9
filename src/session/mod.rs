//! Per-session state: the signed-in user and the recipe currently open.

mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Versioned;
use crate::recipe::Recipe;

pub use store::{SessionError, SessionStore};

/// Snapshot of the recipe a session last opened for viewing or editing.
///
/// It only remembers which recipe is open and what it looked like; votes and
/// edits always re-read the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewContext {
    recipe: Recipe,
    version: u64,
}

impl ViewContext {
    pub fn open(recipe: Versioned<Recipe>) -> Self {
        Self {
            recipe: recipe.data,
            version: recipe.version,
        }
    }

    pub fn recipe_id(&self) -> &str {
        &self.recipe.id
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Store version the snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Read one field of the snapshot by its serialized name.
    pub fn read_field(&self, name: &str) -> Option<Value> {
        match serde_json::to_value(&self.recipe) {
            Ok(Value::Object(mut fields)) => fields.remove(name),
            _ => None,
        }
    }
}

/// Session variables for one client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    user: Option<String>,
    view: Option<ViewContext>,
}

impl Session {
    /// Create an anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session signed in as `user`.
    pub fn signed_in(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            view: None,
        }
    }

    /// True when nobody is signed in and no recipe is open.
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.view.is_none()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn sign_in(&mut self, user: impl Into<String>) {
        self.user = Some(user.into());
        self.view = None;
    }

    /// Open a recipe, replacing any previously open one.
    pub fn open(&mut self, recipe: Versioned<Recipe>) -> &ViewContext {
        self.view.insert(ViewContext::open(recipe))
    }

    pub fn view(&self) -> Option<&ViewContext> {
        self.view.as_ref()
    }

    pub fn close_view(&mut self) {
        self.view = None;
    }

    /// Forget everything: sign out and close the open recipe.
    pub fn clear(&mut self) {
        self.user = None;
        self.view = None;
    }
}
