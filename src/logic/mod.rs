//! Match engine business logic: roster, round settlement, rejoins, analytics.

mod analytics;
mod rejoin;
mod roster;
mod rounds;

pub use analytics::{global_stats, player_stats, GlobalStats, PlayerRecord};
pub use rejoin::{rejoin_player, rejoin_score};
pub use roster::{add_player, delete_player, reset_game, restart_with_same_players};
pub use rounds::{determine_winner, submit_round};
