//! Handler: recipe.create

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::recipe::{RecipeDetails, RecipeDraft};
use crate::service::{Context, ServiceError};
use crate::upload::ImageUpload;

pub const COMMAND: &str = "recipe.create";

#[derive(Deserialize)]
pub struct Input {
    #[serde(flatten)]
    pub details: RecipeDetails,
    pub image: ImageUpload,
}

pub fn guard<S>(ctx: &Context<'_, RecipeBox<S>>) -> bool {
    ctx.has_fields(&["name", "key_ingredient", "image"])
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let creator = ctx.user_id()?.to_string();
    let input = ctx.input::<Input>()?;
    validate(&input.details)?;

    let app = ctx.app();
    let bytes = input.image.decode()?;
    let image = app.objects().upload(&bytes, &input.image.filename)?;

    let saved = app.recipes().insert(RecipeDraft {
        creator,
        image,
        details: input.details,
    })?;
    app.ingredients()
        .insert_if_absent(&saved.data.details.key_ingredient)?;

    info!(recipe = %saved.data.id, creator = %saved.data.creator, "recipe created");
    Ok(json!({ "recipe": saved.data }))
}

pub(crate) fn validate(details: &RecipeDetails) -> Result<(), ServiceError> {
    if details.name.trim().is_empty() {
        return Err(ServiceError::Rejected("recipe name is required".into()));
    }
    if details.key_ingredient.trim().is_empty() {
        return Err(ServiceError::Rejected("key ingredient is required".into()));
    }
    Ok(())
}
