//! Round and RoundScore: one batch of point deltas applied to every player.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to one player in one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundScore {
    pub player_id: PlayerId,
    pub round_score: i32,
    pub total_after_round: i32,
    /// Not eliminated before this round, eliminated after it.
    pub eliminated_this_round: bool,
    /// The player rejoined right before this round was submitted.
    pub rejoined_this_round: bool,
}

/// A submitted round. `round_number` is 1-based.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub round_number: u32,
    pub scores: Vec<RoundScore>,
    pub timestamp: DateTime<Utc>,
}

impl Round {
    /// Entry for a given player, if they were on the roster when the round was played.
    pub fn score_for(&self, player_id: PlayerId) -> Option<&RoundScore> {
        self.scores.iter().find(|s| s.player_id == player_id)
    }

    /// Players knocked out by this round.
    pub fn eliminated(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.scores
            .iter()
            .filter(|s| s.eliminated_this_round)
            .map(|s| s.player_id)
    }
}
