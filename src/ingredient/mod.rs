//! Index of distinct key ingredients.
//!
//! Entries are created the first time a recipe uses an ingredient and are
//! never updated or removed afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::{Collection, DocumentError, DocumentStore, DocumentsExt};
use crate::recipe::RecipeRepository;
use crate::Document;

/// One distinct, lower-cased ingredient name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "ingredients")]
pub struct Ingredient {
    #[document(id)]
    pub name: String,
}

/// Recipe counts grouped by key ingredient and by creator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientStats {
    /// Every indexed ingredient, in name order.
    pub ingredients: Vec<String>,
    /// Recipes per ingredient; ingredients no recipe uses any more are left out.
    pub recipes_per_ingredient: BTreeMap<String, usize>,
    pub recipes_per_creator: BTreeMap<String, usize>,
}

pub struct IngredientIndex<'a, S> {
    store: &'a S,
    ingredients: Collection<'a, S, Ingredient>,
}

impl<'a, S: DocumentStore> IngredientIndex<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            ingredients: store.documents::<Ingredient>(),
        }
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, DocumentError> {
        Ok(self
            .ingredients
            .get(&normalize(name))?
            .map(|versioned| versioned.data))
    }

    /// Index `name` unless already present. Returns true if it was added.
    pub fn insert_if_absent(&self, name: &str) -> Result<bool, DocumentError> {
        let ingredient = Ingredient {
            name: normalize(name),
        };
        if ingredient.name.is_empty() {
            return Ok(false);
        }
        match self.ingredients.insert(&ingredient) {
            Ok(_) => Ok(true),
            Err(DocumentError::ConcurrencyConflict { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// All indexed ingredients sorted by name.
    pub fn all(&self) -> Result<Vec<Ingredient>, DocumentError> {
        let mut all: Vec<Ingredient> = self
            .ingredients
            .find(&|_| true)?
            .into_iter()
            .map(|versioned| versioned.data)
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    pub fn stats(&self) -> Result<IngredientStats, DocumentError> {
        let ingredients: Vec<String> = self.all()?.into_iter().map(|i| i.name).collect();

        let mut recipes_per_ingredient = BTreeMap::new();
        let mut recipes_per_creator = BTreeMap::new();
        for recipe in RecipeRepository::new(self.store).all()? {
            if ingredients.contains(&recipe.details.key_ingredient) {
                *recipes_per_ingredient
                    .entry(recipe.details.key_ingredient)
                    .or_insert(0) += 1;
            }
            *recipes_per_creator.entry(recipe.creator).or_insert(0) += 1;
        }

        Ok(IngredientStats {
            ingredients,
            recipes_per_ingredient,
            recipes_per_creator,
        })
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
