//! Handler: ingredient.stats

use serde_json::Value;

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::service::{Context, ServiceError};

pub const COMMAND: &str = "ingredient.stats";

pub fn guard<S>(_ctx: &Context<'_, RecipeBox<S>>) -> bool {
    true
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let stats = ctx.app().ingredients().stats()?;
    Ok(serde_json::to_value(stats)?)
}
