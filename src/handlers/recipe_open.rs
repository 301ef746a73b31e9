//! Handler: recipe.open
//!
//! Loads a recipe and makes it the session's open recipe, which later
//! votes and edits act on.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::service::{Context, ServiceError};
use crate::vote::UserVote;

pub const COMMAND: &str = "recipe.open";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
}

pub fn guard<S>(ctx: &Context<'_, RecipeBox<S>>) -> bool {
    ctx.has_fields(&["id"])
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let input = ctx.input::<Input>()?;
    let recipe = ctx
        .app()
        .recipes()
        .find_by_id(&input.id)?
        .ok_or_else(|| super::recipe_not_found(&input.id))?;

    let your_vote = ctx
        .session()
        .user()
        .map(|user| recipe.data.votes.vote_of(user))
        .unwrap_or(UserVote::None);
    let body = json!({ "recipe": recipe.data, "your_vote": your_vote });

    ctx.session_mut().open(recipe);
    Ok(body)
}
