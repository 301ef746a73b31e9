//! Handler: recipe.list

use serde_json::{json, Value};

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::recipe::Recipe;
use crate::service::{Context, ServiceError};

pub const COMMAND: &str = "recipe.list";

pub fn guard<S>(_ctx: &Context<'_, RecipeBox<S>>) -> bool {
    true
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let recipes: Vec<Recipe> = ctx.app().recipes().all()?.collect();
    Ok(json!({ "recipes": recipes }))
}
