//! Handler: ingredient.recipes

use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::recipe::Recipe;
use crate::service::{Context, ServiceError};

pub const COMMAND: &str = "ingredient.recipes";

#[derive(Deserialize)]
pub struct Input {
    pub ingredient: String,
}

pub fn guard<S>(ctx: &Context<'_, RecipeBox<S>>) -> bool {
    ctx.has_fields(&["ingredient"])
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let input = ctx.input::<Input>()?;
    let recipes: Vec<Recipe> = ctx
        .app()
        .recipes()
        .find_by_ingredient(&input.ingredient)?
        .collect();
    Ok(json!({ "ingredient": input.ingredient.trim().to_lowercase(), "recipes": recipes }))
}
