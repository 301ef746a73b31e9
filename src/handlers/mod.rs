//! One module per command. Each exports `COMMAND`, `guard` and `handle`.

use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::service::{Context, Service, ServiceError};

pub mod account_register;
pub mod account_sign_in;
pub mod account_sign_out;
pub mod ingredient_recipes;
pub mod ingredient_stats;
pub mod recipe_create;
pub mod recipe_delete;
pub mod recipe_downvote;
pub mod recipe_list;
pub mod recipe_mine;
pub mod recipe_open;
pub mod recipe_search;
pub mod recipe_update;
pub mod recipe_upvote;

mod vote;

/// Build a service with every recipe box command registered.
pub fn service<S: DocumentStore + 'static>(app: RecipeBox<S>) -> Service<RecipeBox<S>> {
    crate::register_handlers!(
        Service::new(app),
        account_register,
        account_sign_in,
        account_sign_out,
        recipe_create,
        recipe_list,
        recipe_mine,
        recipe_open,
        recipe_update,
        recipe_delete,
        recipe_upvote,
        recipe_downvote,
        recipe_search,
        ingredient_recipes,
        ingredient_stats,
    )
}

/// Id of the recipe open in this session.
///
/// If the request names a recipe, it has to be the open one.
fn open_recipe_id<A>(ctx: &Context<'_, A>, requested: Option<&str>) -> Result<String, ServiceError> {
    let open = ctx.view()?.recipe_id();
    match requested {
        Some(requested) if requested != open => Err(ServiceError::StaleContext {
            open: open.to_string(),
            requested: requested.to_string(),
        }),
        _ => Ok(open.to_string()),
    }
}

fn recipe_not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("recipe {id}"))
}
