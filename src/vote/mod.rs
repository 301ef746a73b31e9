//! Vote reconciliation.
//!
//! Each recipe embeds a [`VoteState`]: two disjoint voter sets and their
//! tallies. A user's vote on a recipe moves between three states:
//!
//! ```text
//!            upvote              downvote
//!   NONE ───────────▶ UP ◀───────────────▶ DOWN ◀─── NONE
//!                     │ upvote (no-op)        │ downvote (no-op)
//!                     ▼                       ▼
//!                     UP                     DOWN
//! ```
//!
//! Repeating a vote is a no-op, voting the other way switches. There is no
//! way back to NONE.

mod state;
mod voters;

pub use state::{apply_downvote, apply_upvote, Polarity, UserVote, VoteState};
pub use voters::VoterSet;
