use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The user ids holding an active vote of one polarity on a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterSet(BTreeSet<String>);

impl VoterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user: &str) -> bool {
        self.0.contains(user)
    }

    /// Returns true if the user was not already present.
    pub fn insert(&mut self, user: &str) -> bool {
        self.0.insert(user.to_string())
    }

    /// Returns true if the user was present.
    pub fn remove(&mut self, user: &str) -> bool {
        self.0.remove(user)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for VoterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
