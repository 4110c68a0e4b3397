//! Rejoin: bring an eliminated player back at a score pegged to the table.

use crate::models::{MatchError, SessionState, Settings};

/// Score a rejoining player comes back at.
///
/// The highest score among active players, or the lowest score overall when nobody is
/// active. `None` only for an empty roster.
pub fn rejoin_score(session: &SessionState) -> Option<i32> {
    session
        .active_players()
        .map(|p| p.score)
        .max()
        .or_else(|| session.players.iter().map(|p| p.score).min())
}

/// Re-activate the eliminated player at `index`.
///
/// If more than one player is active afterwards, any game-over result is cleared, so a
/// finished match can be reopened.
pub fn rejoin_player(
    session: &mut SessionState,
    settings: &Settings,
    index: usize,
) -> Result<(), MatchError> {
    if !settings.allow_rejoin {
        return Err(MatchError::RejoinDisabled);
    }
    if !session.player(index)?.is_eliminated {
        return Err(MatchError::PlayerNotEliminated);
    }
    let score = rejoin_score(session).ok_or(MatchError::NoPlayers)?;

    let player = &mut session.players[index];
    player.rejoin_at(score);
    log::debug!(
        "{} rejoined at {} (rejoin #{})",
        player.name,
        score,
        player.rejoin_count
    );

    if session.active_players().count() > 1 && session.game_over {
        log::info!("Rejoin reopened a finished match");
        session.clear_winner();
    }
    Ok(())
}
