//! Player and PlayerId data structures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score at or above which a player is out of the match.
pub const ELIMINATION_THRESHOLD: i32 = 101;

/// Unique identifier for a player, scoped to one match.
///
/// Ids come from a counter kept in the session state, so they are strictly
/// increasing in creation order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player in the current match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Cumulative total across all rounds.
    pub score: i32,
    /// Delta applied in the most recent round (or the score assigned on rejoin).
    pub round_total: i32,
    pub rejoin_count: u32,
    pub is_eliminated: bool,
    /// Set on rejoin, consumed by the next submitted round.
    #[serde(default)]
    pub rejoined_this_round: bool,
}

impl Player {
    /// Create a new player with the given id and name. Stats start at zero/false.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            round_total: 0,
            rejoin_count: 0,
            is_eliminated: false,
            rejoined_this_round: false,
        }
    }

    /// Add a round's delta to the total and remember it as the round total.
    /// The total saturates at the `i32` bounds.
    pub fn apply_round(&mut self, delta: i32) {
        self.score = self.score.saturating_add(delta);
        self.round_total = delta;
    }

    /// Recompute `is_eliminated` from the current score.
    pub fn refresh_elimination(&mut self) {
        self.is_eliminated = self.score >= ELIMINATION_THRESHOLD;
    }

    /// Bring the player back in at `score`.
    pub fn rejoin_at(&mut self, score: i32) {
        self.score = score;
        self.round_total = score;
        self.rejoin_count += 1;
        self.rejoined_this_round = true;
        self.refresh_elimination();
    }
}
