use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::app::RecipeBox;
use crate::document::{DocumentError, DocumentStore};
use crate::service::{Context, ServiceError};
use crate::vote::Polarity;

#[derive(Debug, Default, Deserialize)]
pub struct Input {
    /// Must match the open recipe when given.
    #[serde(default)]
    pub id: Option<String>,
}

/// Cast the signed-in user's vote on the session's open recipe.
pub(super) fn cast<S: DocumentStore>(
    ctx: &mut Context<'_, RecipeBox<S>>,
    polarity: Polarity,
) -> Result<Value, ServiceError> {
    let user = ctx.user_id()?.to_string();
    let input = match ctx.raw_input() {
        Value::Null => Input::default(),
        _ => ctx.input::<Input>()?,
    };
    let id = super::open_recipe_id(ctx, input.id.as_deref())?;

    let outcome = match ctx.app().recipes().apply_vote(&id, &user, polarity) {
        Ok(outcome) => outcome,
        Err(DocumentError::NotFound { .. }) => {
            ctx.session_mut().close_view();
            return Err(super::recipe_not_found(&id));
        }
        Err(err) => return Err(err.into()),
    };

    let votes = &outcome.recipe.data.votes;
    let your_vote = votes.vote_of(&user);
    info!(
        recipe = %id,
        user = %user,
        ?polarity,
        changed = outcome.changed,
        upvotes = votes.upvote_count(),
        downvotes = votes.downvote_count(),
        "vote cast"
    );

    let body = json!({
        "recipe": outcome.recipe.data,
        "changed": outcome.changed,
        "your_vote": your_vote,
    });
    ctx.session_mut().open(outcome.recipe);
    Ok(body)
}
