//! Handler: account.sign_in

use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::service::{Context, ServiceError};

pub const COMMAND: &str = "account.sign_in";

#[derive(Deserialize)]
pub struct Input {
    pub username: String,
    pub password: String,
}

pub fn guard<S>(ctx: &Context<'_, RecipeBox<S>>) -> bool {
    ctx.has_fields(&["username", "password"])
}

pub fn handle<S: DocumentStore>(ctx: &mut Context<'_, RecipeBox<S>>) -> Result<Value, ServiceError> {
    let input = ctx.input::<Input>()?;
    let account = ctx.app().accounts().sign_in(&input.username, &input.password)?;
    ctx.session_mut().sign_in(account.username.clone());

    Ok(json!({ "username": account.username }))
}
