//! Handler: recipe.search

use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::recipe::Recipe;
use crate::service::{Context, ServiceError};

pub const COMMAND: &str = "recipe.search";

#[derive(Deserialize)]
pub struct Input {
    pub query: String,
}

pub fn guard<S>(ctx: &Context<'_, RecipeBox<S>>) -> bool {
    ctx.has_fields(&["query"])
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let input = ctx.input::<Input>()?;
    if input.query.trim().is_empty() {
        return Err(ServiceError::Rejected("search query must not be empty".into()));
    }

    let recipes: Vec<Recipe> = ctx.app().recipes().search_by_name(&input.query)?.collect();
    Ok(json!({ "query": input.query, "recipes": recipes }))
}
