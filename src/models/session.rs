//! SessionState (the active match) and MatchError.

use crate::models::game::{Match, MatchId};
use crate::models::player::{Player, PlayerId};
use crate::models::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reasons an engine operation is rejected. A rejected operation leaves state untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// Player name is blank after trimming.
    EmptyName,
    /// There are no players to submit a round for.
    NoPlayers,
    /// No player at this position.
    PlayerIndexOutOfRange { index: usize, len: usize },
    /// Rejoining is turned off in the settings.
    RejoinDisabled,
    /// Only eliminated players can rejoin.
    PlayerNotEliminated,
    /// The match already has a winner.
    MatchFinished,
    /// There is no previous roster to restart with.
    NoPreviousRoster,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::EmptyName => write!(f, "Player name cannot be empty"),
            MatchError::NoPlayers => write!(f, "Add at least one player first"),
            MatchError::PlayerIndexOutOfRange { index, len } => {
                write!(f, "No player at position {} (roster has {})", index, len)
            }
            MatchError::RejoinDisabled => write!(f, "Rejoining is disabled"),
            MatchError::PlayerNotEliminated => write!(f, "Player is not eliminated"),
            MatchError::MatchFinished => write!(f, "The match is already over"),
            MatchError::NoPreviousRoster => write!(f, "No previous players to restart with"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Phase of the active match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchState {
    /// No players on the roster.
    Empty,
    /// At least one player, no winner yet.
    Open,
    /// A winner has been determined.
    Finished,
}

/// Everything persisted about the match in progress.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub players: Vec<Player>,
    pub game_over: bool,
    pub winner_id: Option<PlayerId>,
    /// Roster archived by the last reset, for "restart with same players".
    pub last_players: Vec<Player>,
    pub match_id: Option<MatchId>,
    pub match_started_at: Option<DateTime<Utc>>,
    pub rounds: Vec<Round>,
    /// Next id handed out by `allocate_player_id`.
    pub next_player_id: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MatchState {
        if self.game_over {
            MatchState::Finished
        } else if self.players.is_empty() {
            MatchState::Empty
        } else {
            MatchState::Open
        }
    }

    /// Hand out a fresh player id. Ids never repeat within a session.
    pub fn allocate_player_id(&mut self) -> PlayerId {
        // Older saves may carry players but a stale counter.
        let floor = self
            .players
            .iter()
            .chain(self.last_players.iter())
            .map(|p| p.id.0 + 1)
            .max()
            .unwrap_or(0);
        let id = self.next_player_id.max(floor);
        self.next_player_id = id + 1;
        PlayerId(id)
    }

    /// Fresh player records for `names`, zeroed, with new ids.
    pub fn fresh_players<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> Vec<Player> {
        names
            .into_iter()
            .map(|name| Player::new(self.allocate_player_id(), name))
            .collect()
    }

    /// Begin a new match: new id and start time, no rounds, no winner.
    pub fn begin_match(&mut self) {
        self.match_id = Some(Uuid::new_v4());
        self.match_started_at = Some(Utc::now());
        self.rounds.clear();
        self.clear_winner();
    }

    /// Drop the active match entirely.
    pub fn clear_match(&mut self) {
        self.match_id = None;
        self.match_started_at = None;
        self.rounds.clear();
        self.clear_winner();
    }

    pub fn clear_winner(&mut self) {
        self.game_over = false;
        self.winner_id = None;
    }

    pub fn winner(&self) -> Option<&Player> {
        let id = self.winner_id?;
        self.players.iter().find(|p| p.id == id)
    }

    /// Players still in the match.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_eliminated)
    }

    pub fn player(&self, index: usize) -> Result<&Player, MatchError> {
        self.players
            .get(index)
            .ok_or(MatchError::PlayerIndexOutOfRange {
                index,
                len: self.players.len(),
            })
    }

    /// Freeze the active match into a history snapshot.
    pub fn snapshot(&self) -> Option<Match> {
        Some(Match {
            id: self.match_id?,
            players: self.players.clone(),
            rounds: self.rounds.clone(),
            winner_player_id: self.winner_id,
            started_at: self.match_started_at.unwrap_or_else(Utc::now),
            finished_at: self.game_over.then(Utc::now),
        })
    }
}
