//! Roster management: adding, deleting, resetting and restarting players.

use crate::models::{MatchError, Player, PlayerId, SessionState};

/// Append a player. The first player on an empty roster starts a new match.
///
/// A finished match takes no new players.
pub fn add_player(session: &mut SessionState, name: &str) -> Result<PlayerId, MatchError> {
    if session.game_over {
        return Err(MatchError::MatchFinished);
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(MatchError::EmptyName);
    }
    if session.players.is_empty() {
        session.begin_match();
    }
    let id = session.allocate_player_id();
    session.players.push(Player::new(id, name));
    log::debug!("Added player {} ({})", name, id);
    Ok(id)
}

/// Remove the player at `index`. Allowed at any time.
///
/// Emptying the roster drops the active match, and removing the winner clears the result.
pub fn delete_player(session: &mut SessionState, index: usize) -> Result<Player, MatchError> {
    session.player(index)?;
    let removed = session.players.remove(index);
    if session.winner_id == Some(removed.id) {
        session.clear_winner();
    }
    if session.players.is_empty() {
        session.clear_match();
    }
    log::debug!("Deleted player {} ({})", removed.name, removed.id);
    Ok(removed)
}

/// Clear the match. With `keep_players`, the same names come back zeroed with new ids.
pub fn reset_game(session: &mut SessionState, keep_players: bool) {
    if !session.players.is_empty() {
        session.last_players = session.players.clone();
    }
    if keep_players && !session.players.is_empty() {
        let names: Vec<String> = session.players.iter().map(|p| p.name.clone()).collect();
        session.players = session.fresh_players(names.iter().map(String::as_str));
        session.begin_match();
    } else {
        session.players.clear();
        session.clear_match();
    }
    log::info!("Game reset ({} players kept)", session.players.len());
}

/// Start over with the names of the last archived roster.
pub fn restart_with_same_players(session: &mut SessionState) -> Result<(), MatchError> {
    if session.last_players.is_empty() {
        return Err(MatchError::NoPreviousRoster);
    }
    let names: Vec<String> = session.last_players.iter().map(|p| p.name.clone()).collect();
    session.players = session.fresh_players(names.iter().map(String::as_str));
    session.begin_match();
    log::info!("Restarted with {} previous players", session.players.len());
    Ok(())
}
