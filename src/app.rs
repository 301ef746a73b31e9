//! Application state shared by every command handler.

use std::sync::Arc;

use crate::account::AccountStore;
use crate::document::DocumentStore;
use crate::ingredient::IngredientIndex;
use crate::recipe::RecipeRepository;
use crate::upload::ObjectStore;

/// The stores behind the recipe box.
///
/// `S` holds every document collection (recipes, ingredients, users); images
/// go to the object store.
pub struct RecipeBox<S> {
    store: S,
    objects: Arc<dyn ObjectStore>,
    bcrypt_cost: u32,
}

impl<S: DocumentStore> RecipeBox<S> {
    pub fn new(store: S, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            objects,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Set the bcrypt work factor used for new accounts.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn recipes(&self) -> RecipeRepository<'_, S> {
        RecipeRepository::new(&self.store)
    }

    pub fn ingredients(&self) -> IngredientIndex<'_, S> {
        IngredientIndex::new(&self.store)
    }

    pub fn accounts(&self) -> AccountStore<'_, S> {
        AccountStore::new(&self.store, self.bcrypt_cost)
    }

    pub fn objects(&self) -> &dyn ObjectStore {
        self.objects.as_ref()
    }
}
