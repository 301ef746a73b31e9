//! Command service: named handlers dispatched with a per-request context.
//!
//! ## Quick Start
//!
//! ```ignore
//! use recipe_box::service::{Service, ServiceError};
//! use recipe_box::Session;
//! use serde_json::json;
//!
//! let service = Service::new(app).command("recipe.open", |ctx| {
//!     let input = ctx.input::<OpenInput>()?;
//!     // ...
//!     Ok(json!({ "id": input.id }))
//! });
//!
//! let mut session = Session::new();
//! let result = service.dispatch("recipe.open", json!({ "id": "r1" }), &mut session);
//! ```
//!
//! ## Handler Convention
//!
//! Each handler file under `handlers/` exports:
//!
//! ```ignore
//! pub const COMMAND: &str = "recipe.open";
//!
//! pub fn guard<S>(ctx: &Context<RecipeBox<S>>) -> bool {
//!     ctx.has_fields(&["id"])
//! }
//!
//! pub fn handle<S: DocumentStore>(ctx: &mut Context<RecipeBox<S>>) -> Result<Value, ServiceError> {
//!     // ...
//! }
//! ```

mod context;
mod error;
#[allow(clippy::module_inception)]
mod service;

pub use context::Context;
pub use error::ServiceError;
pub use service::Service;

#[cfg(feature = "http")]
pub mod http;

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export `COMMAND`, `guard` and `handle`.
///
/// # Example
/// ```ignore
/// let service = recipe_box::register_handlers!(
///     Service::new(app),
///     handlers::recipe_open,
///     handlers::recipe_upvote,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
