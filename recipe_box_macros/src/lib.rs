//! Derive macros for recipe_box.

mod document;

use proc_macro::TokenStream;

/// Derive macro for the `Document` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Document)]
/// #[document(collection = "recipes")]
/// pub struct Recipe {
///     #[document(id)]
///     pub id: String,
///     pub name: String,
/// }
/// ```
///
/// Without `#[document(collection = ...)]` the collection defaults to the
/// snake_case struct name plus `s`. Without `#[document(id)]` the field named
/// `id` is used.
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive_document(input)
}
