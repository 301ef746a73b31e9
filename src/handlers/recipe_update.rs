//! Handler: recipe.update
//!
//! Edits the open recipe. Only its creator may do so; the vote state is kept.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::recipe::RecipeDetails;
use crate::service::{Context, ServiceError};
use crate::upload::ImageUpload;

pub const COMMAND: &str = "recipe.update";

#[derive(Deserialize)]
pub struct Input {
    /// Must match the open recipe when given.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub details: RecipeDetails,
    /// A replacement image; the current one is kept when absent.
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

pub fn guard<S>(ctx: &Context<'_, RecipeBox<S>>) -> bool {
    ctx.has_fields(&["name", "key_ingredient"])
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let user = ctx.user_id()?.to_string();
    let input = ctx.input::<Input>()?;
    let id = super::open_recipe_id(ctx, input.id.as_deref())?;
    super::recipe_create::validate(&input.details)?;

    let app = ctx.app();
    let Some(current) = app.recipes().find_by_id(&id)? else {
        ctx.session_mut().close_view();
        return Err(super::recipe_not_found(&id));
    };
    if current.data.creator != user {
        return Err(ServiceError::Forbidden(format!(
            "only {} may edit this recipe",
            current.data.creator
        )));
    }

    let image = match &input.image {
        Some(upload) => Some(app.objects().upload(&upload.decode()?, &upload.filename)?),
        None => None,
    };
    let updated = app.recipes().update_details(&id, input.details, image)?;
    app.ingredients()
        .insert_if_absent(&updated.data.details.key_ingredient)?;

    info!(recipe = %id, version = updated.version, "recipe updated");
    let body = json!({ "recipe": updated.data });
    ctx.session_mut().open(updated);
    Ok(body)
}
