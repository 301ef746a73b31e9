//! Handler: recipe.mine

use serde_json::{json, Value};

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::recipe::Recipe;
use crate::service::{Context, ServiceError};

pub const COMMAND: &str = "recipe.mine";

pub fn guard<S>(_ctx: &Context<'_, RecipeBox<S>>) -> bool {
    true
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let user = ctx.user_id()?;
    let recipes: Vec<Recipe> = ctx.app().recipes().find_by_creator(user)?.collect();
    Ok(json!({ "recipes": recipes }))
}
