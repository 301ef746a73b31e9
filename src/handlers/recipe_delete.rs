//! Handler: recipe.delete

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::service::{Context, ServiceError};

pub const COMMAND: &str = "recipe.delete";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
}

pub fn guard<S>(ctx: &Context<'_, RecipeBox<S>>) -> bool {
    ctx.has_fields(&["id"])
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let user = ctx.user_id()?.to_string();
    let input = ctx.input::<Input>()?;
    let recipes = ctx.app().recipes();

    let recipe = recipes
        .find_by_id(&input.id)?
        .ok_or_else(|| super::recipe_not_found(&input.id))?;
    if recipe.data.creator != user {
        return Err(ServiceError::Forbidden(format!(
            "only {} may delete this recipe",
            recipe.data.creator
        )));
    }

    let deleted = recipes.delete_by_id(&input.id)?;
    if ctx.session().view().map(|view| view.recipe_id()) == Some(input.id.as_str()) {
        ctx.session_mut().close_view();
    }

    info!(recipe = %input.id, "recipe deleted");
    Ok(json!({ "id": input.id, "deleted": deleted }))
}
