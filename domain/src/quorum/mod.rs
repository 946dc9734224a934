//! Selection among candidates
//!
//! When more than one usable candidate remains, the winner is chosen by a
//! weighted vote over quality, reported confidence, latency and length.
//! Ties resolve to the candidate registered first, so results do not
//! depend on which provider finished first.

pub mod vote;

pub use vote::{Ballot, VoteWeights};
