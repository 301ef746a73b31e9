//! Handler: account.sign_out

use serde_json::{json, Value};

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::service::{Context, ServiceError};

pub const COMMAND: &str = "account.sign_out";

pub fn guard<S>(_ctx: &Context<'_, RecipeBox<S>>) -> bool {
    true
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let was_signed_in = ctx.session().user().is_some();
    ctx.session_mut().clear();
    Ok(json!({ "signed_out": was_signed_in }))
}
