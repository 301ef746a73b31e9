use serde::{Deserialize, Serialize};

use super::voters::VoterSet;

/// Direction of a vote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Up,
    Down,
}

/// Where one user currently stands on one recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserVote {
    None,
    Up,
    Down,
}

/// Voter sets and tallies embedded in a recipe.
///
/// Invariants: no user is in both sets, and each count equals the size of
/// its set. Counts are recomputed from the sets on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredVoteState")]
pub struct VoteState {
    upvoters: VoterSet,
    downvoters: VoterSet,
    upvote_count: u64,
    downvote_count: u64,
}

#[derive(Deserialize)]
struct StoredVoteState {
    #[serde(default)]
    upvoters: VoterSet,
    #[serde(default)]
    downvoters: VoterSet,
}

impl From<StoredVoteState> for VoteState {
    fn from(stored: StoredVoteState) -> Self {
        let StoredVoteState {
            upvoters,
            mut downvoters,
        } = stored;
        // An upvote wins if a corrupted record lists a user on both sides.
        for user in upvoters.iter() {
            downvoters.remove(user);
        }
        Self {
            upvote_count: upvoters.len() as u64,
            downvote_count: downvoters.len() as u64,
            upvoters,
            downvoters,
        }
    }
}

impl VoteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upvoters(&self) -> &VoterSet {
        &self.upvoters
    }

    pub fn downvoters(&self) -> &VoterSet {
        &self.downvoters
    }

    pub fn upvote_count(&self) -> u64 {
        self.upvote_count
    }

    pub fn downvote_count(&self) -> u64 {
        self.downvote_count
    }

    pub fn vote_of(&self, user: &str) -> UserVote {
        if self.upvoters.contains(user) {
            UserVote::Up
        } else if self.downvoters.contains(user) {
            UserVote::Down
        } else {
            UserVote::None
        }
    }

    /// Reconcile one vote in place. Returns whether the state changed.
    ///
    /// Repeating the current vote is a no-op; voting the opposite way moves
    /// the user between sets. An empty user id never matches and never votes.
    pub fn apply(&mut self, polarity: Polarity, user: &str) -> bool {
        if user.is_empty() {
            return false;
        }

        let (target, other, target_count, other_count) = match polarity {
            Polarity::Up => (
                &mut self.upvoters,
                &mut self.downvoters,
                &mut self.upvote_count,
                &mut self.downvote_count,
            ),
            Polarity::Down => (
                &mut self.downvoters,
                &mut self.upvoters,
                &mut self.downvote_count,
                &mut self.upvote_count,
            ),
        };

        if target.contains(user) {
            return false;
        }
        if other.remove(user) {
            *other_count -= 1;
        }
        target.insert(user);
        *target_count += 1;
        true
    }
}

/// Upvote on behalf of `user`, returning the new state and whether it changed.
pub fn apply_upvote(state: &VoteState, user: &str) -> (VoteState, bool) {
    let mut next = state.clone();
    let changed = next.apply(Polarity::Up, user);
    (next, changed)
}

/// Downvote on behalf of `user`, returning the new state and whether it changed.
pub fn apply_downvote(state: &VoteState, user: &str) -> (VoteState, bool) {
    let mut next = state.clone();
    let changed = next.apply(Polarity::Down, user);
    (next, changed)
}
