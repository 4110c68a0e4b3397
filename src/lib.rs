//! Loba score counter: library with models, match engine logic and persistence.

pub mod engine;
pub mod logic;
pub mod models;
pub mod store;

pub use engine::MatchEngine;
pub use logic::{
    add_player, delete_player, determine_winner, global_stats, player_stats, rejoin_player,
    rejoin_score, reset_game, restart_with_same_players, submit_round, GlobalStats, PlayerRecord,
};
pub use models::{
    standings, Match, MatchError, MatchId, MatchState, Player, PlayerId, Round, RoundScore,
    SessionState, Settings, SettingsUpdate, ELIMINATION_THRESHOLD,
};
pub use store::{DirStore, KeyValueStore, MemoryStore, StoreError};
