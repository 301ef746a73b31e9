//! Command service integration tests.

mod support;
mod accounts;
mod recipes;
mod votes;
