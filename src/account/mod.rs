//! User accounts: registration and sign-in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Collection, DocumentError, DocumentStore, DocumentsExt};
use crate::Document;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "users")]
pub struct Account {
    #[document(id)]
    pub username: String,
    password_hash: String,
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("user already exists")]
    AlreadyExists,
    #[error("name too short")]
    NameTooShort,
    #[error("name too long")]
    NameTooLong,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("wrong username or password")]
    WrongCredentials,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

pub struct AccountStore<'a, S> {
    accounts: Collection<'a, S, Account>,
    bcrypt_cost: u32,
}

impl<'a, S: DocumentStore> AccountStore<'a, S> {
    pub fn new(store: &'a S, bcrypt_cost: u32) -> Self {
        Self {
            accounts: store.documents::<Account>(),
            bcrypt_cost,
        }
    }

    pub fn find_by_name(&self, username: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.get(username)?.map(|versioned| versioned.data))
    }

    pub fn register(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        let username = username.trim();
        let len = username.chars().count();
        if len < MIN_USERNAME_LEN {
            return Err(AccountError::NameTooShort);
        }
        if len > MAX_USERNAME_LEN {
            return Err(AccountError::NameTooLong);
        }
        if password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }

        let account = Account {
            username: username.to_string(),
            password_hash: bcrypt::hash(password, self.bcrypt_cost)?,
        };
        match self.accounts.insert(&account) {
            Ok(saved) => Ok(saved.data),
            Err(DocumentError::ConcurrencyConflict { .. }) => Err(AccountError::AlreadyExists),
            Err(err) => Err(err.into()),
        }
    }

    pub fn sign_in(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        let account = self
            .find_by_name(username.trim())?
            .ok_or(AccountError::WrongCredentials)?;
        if bcrypt::verify(password, &account.password_hash)? {
            Ok(account)
        } else {
            Err(AccountError::WrongCredentials)
        }
    }
}
