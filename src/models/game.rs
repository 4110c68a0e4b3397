//! Match: a finished game archived into the match history.

use crate::models::player::{Player, PlayerId};
use crate::models::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Snapshot of one match: roster at the end, every round, and the winner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub winner_player_id: Option<PlayerId>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Match {
    /// The winning player record, if any.
    pub fn winner(&self) -> Option<&Player> {
        let id = self.winner_player_id?;
        self.players.iter().find(|p| p.id == id)
    }

    /// Final standings, lowest score first. Ties keep roster order.
    pub fn standings(&self) -> Vec<&Player> {
        standings(&self.players)
    }
}

/// Players sorted by score ascending (stable, so ties keep roster order).
pub fn standings(players: &[Player]) -> Vec<&Player> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by_key(|p| p.score);
    sorted
}
