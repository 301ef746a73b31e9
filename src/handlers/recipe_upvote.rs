//! Handler: recipe.upvote

use serde_json::Value;

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::service::{Context, ServiceError};
use crate::vote::Polarity;

pub const COMMAND: &str = "recipe.upvote";

pub fn guard<S>(_ctx: &Context<'_, RecipeBox<S>>) -> bool {
    true
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    super::vote::cast(ctx, Polarity::Up)
}
