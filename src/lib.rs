//! Recipe sharing with one up/down vote per user per recipe.
//!
//! Documents (recipes, ingredients, accounts) live in a [`DocumentStore`];
//! images go to an [`ObjectStore`]. Commands run through a [`Service`] that
//! hands each handler the caller's [`Session`], including the recipe the
//! session currently has open.

extern crate self as recipe_box;

pub mod account;
pub mod app;
pub mod config;
pub mod document;
pub mod handlers;
pub mod ingredient;
pub mod recipe;
pub mod service;
pub mod session;
pub mod upload;
pub mod vote;

pub use account::{Account, AccountError, AccountStore};
pub use app::RecipeBox;
pub use document::{
    Collection, Document, DocumentError, DocumentStore, DocumentsExt, InMemoryDocumentStore,
    Versioned,
};
pub use ingredient::{Ingredient, IngredientIndex, IngredientStats};
pub use recipe::{Recipe, RecipeDetails, RecipeDraft, RecipeRepository, VoteOutcome};
pub use service::{Context, Service, ServiceError};
pub use session::{Session, SessionStore, ViewContext};
pub use upload::{ImageUpload, InMemoryObjectStore, ObjectStore, UploadError};
pub use vote::{apply_downvote, apply_upvote, Polarity, UserVote, VoteState, VoterSet};

pub use recipe_box_macros::Document;
