//! Recipes and the repository that owns them.

mod repository;

use serde::{Deserialize, Serialize};

use crate::vote::VoteState;
use crate::Document;

pub use repository::{RecipeRepository, VoteOutcome};

/// A persisted recipe document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "recipes")]
pub struct Recipe {
    #[document(id)]
    pub id: String,
    pub creator: String,
    /// Public URL of the uploaded image.
    pub image: String,
    #[serde(flatten)]
    pub details: RecipeDetails,
    #[serde(default)]
    pub votes: VoteState,
}

/// The user-editable part of a recipe.
///
/// `calories`, `time` and `serves` are free text as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub key_ingredient: String,
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub serves: String,
    #[serde(default)]
    pub substitute: String,
}

impl RecipeDetails {
    /// Lower-cases and trims the searchable fields.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_lowercase();
        self.key_ingredient = self.key_ingredient.trim().to_lowercase();
        self
    }
}

/// Everything needed to create a recipe except its id.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub creator: String,
    pub image: String,
    pub details: RecipeDetails,
}
