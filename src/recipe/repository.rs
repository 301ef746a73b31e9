use tracing::debug;
use uuid::Uuid;

use super::{Recipe, RecipeDetails, RecipeDraft};
use crate::document::{Collection, DocumentError, DocumentStore, DocumentsExt, Versioned};
use crate::vote::{Polarity, VoteState};

/// Result of applying one vote to a stored recipe.
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub recipe: Versioned<Recipe>,
    pub changed: bool,
}

/// Recipe persistence on top of any `DocumentStore`.
pub struct RecipeRepository<'a, S> {
    recipes: Collection<'a, S, Recipe>,
}

impl<'a, S: DocumentStore> RecipeRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            recipes: store.documents::<Recipe>(),
        }
    }

    /// Store a new recipe with a fresh id and an empty vote state.
    pub fn insert(&self, draft: RecipeDraft) -> Result<Versioned<Recipe>, DocumentError> {
        let recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            creator: draft.creator,
            image: draft.image,
            details: draft.details.normalized(),
            votes: VoteState::new(),
        };
        self.recipes.insert(&recipe)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Versioned<Recipe>>, DocumentError> {
        self.recipes.get(id)
    }

    /// Overwrite the whole document, provided nobody wrote it since `expected_version`.
    pub fn replace_by_id(
        &self,
        id: &str,
        recipe: Recipe,
        expected_version: u64,
    ) -> Result<Versioned<Recipe>, DocumentError> {
        let recipe = Recipe {
            id: id.to_string(),
            ..recipe
        };
        self.recipes.update(&recipe, expected_version)
    }

    pub fn delete_by_id(&self, id: &str) -> Result<bool, DocumentError> {
        self.recipes.delete(id)
    }

    pub fn all(&self) -> Result<impl Iterator<Item = Recipe>, DocumentError> {
        self.query(&|_| true)
    }

    pub fn find_by_creator(&self, creator: &str) -> Result<impl Iterator<Item = Recipe>, DocumentError> {
        self.query(&|recipe| recipe.creator == creator)
    }

    pub fn find_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<impl Iterator<Item = Recipe>, DocumentError> {
        let ingredient = ingredient.trim().to_lowercase();
        self.query(&|recipe| recipe.details.key_ingredient == ingredient)
    }

    /// Case-insensitive substring match on the recipe name.
    pub fn search_by_name(&self, fragment: &str) -> Result<impl Iterator<Item = Recipe>, DocumentError> {
        let fragment = fragment.trim().to_lowercase();
        self.query(&|recipe| recipe.details.name.contains(&fragment))
    }

    /// Reconcile one vote against the stored recipe in a single atomic step.
    ///
    /// Only the vote state is touched, so concurrent edits of other fields
    /// are never overwritten. Nothing is written when the vote is a no-op.
    pub fn apply_vote(
        &self,
        id: &str,
        user: &str,
        polarity: Polarity,
    ) -> Result<VoteOutcome, DocumentError> {
        let modified = self
            .recipes
            .modify(id, |recipe| recipe.votes.apply(polarity, user))?
            .ok_or_else(|| DocumentError::NotFound {
                collection: <Recipe as crate::Document>::COLLECTION.to_string(),
                id: id.to_string(),
            })?;

        debug!(
            recipe = id,
            user,
            ?polarity,
            changed = modified.changed,
            version = modified.document.version,
            "vote reconciled"
        );

        Ok(VoteOutcome {
            recipe: modified.document,
            changed: modified.changed,
        })
    }

    /// Replace the editable fields of a stored recipe, leaving its vote state alone.
    ///
    /// `image` is only replaced when a new one is given.
    pub fn update_details(
        &self,
        id: &str,
        details: RecipeDetails,
        image: Option<String>,
    ) -> Result<Versioned<Recipe>, DocumentError> {
        let details = details.normalized();
        let modified = self
            .recipes
            .modify(id, |recipe| {
                let mut changed = false;
                if recipe.details != details {
                    recipe.details = details.clone();
                    changed = true;
                }
                if let Some(image) = &image {
                    if &recipe.image != image {
                        recipe.image = image.clone();
                        changed = true;
                    }
                }
                changed
            })?
            .ok_or_else(|| DocumentError::NotFound {
                collection: <Recipe as crate::Document>::COLLECTION.to_string(),
                id: id.to_string(),
            })?;
        Ok(modified.document)
    }

    fn query(
        &self,
        predicate: &dyn Fn(&Recipe) -> bool,
    ) -> Result<std::vec::IntoIter<Recipe>, DocumentError> {
        let mut recipes: Vec<Recipe> = self
            .recipes
            .find(predicate)?
            .into_iter()
            .map(|versioned| versioned.data)
            .collect();
        recipes.sort_by(|a, b| {
            a.details
                .name
                .cmp(&b.details.name)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(recipes.into_iter())
    }
}
