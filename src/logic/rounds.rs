//! Round settlement: apply deltas, recompute eliminations, decide whether the match is over.

use crate::models::{Match, MatchError, Player, PlayerId, Round, RoundScore, SessionState};
use chrono::Utc;

/// Apply one round of point deltas, in roster order, as a single transition.
///
/// Missing entries count as 0 and extra entries are ignored. When the round ends the
/// match, the finished snapshot is returned so the caller can archive it.
pub fn submit_round(session: &mut SessionState, points: &[i32]) -> Result<Option<Match>, MatchError> {
    if session.players.is_empty() {
        return Err(MatchError::NoPlayers);
    }
    if session.game_over {
        return Err(MatchError::MatchFinished);
    }

    let mut scores = Vec::with_capacity(session.players.len());
    for (i, player) in session.players.iter_mut().enumerate() {
        let delta = points.get(i).copied().unwrap_or(0);
        let was_eliminated = player.is_eliminated;
        player.apply_round(delta);
        player.refresh_elimination();
        scores.push(RoundScore {
            player_id: player.id,
            round_score: delta,
            total_after_round: player.score,
            eliminated_this_round: !was_eliminated && player.is_eliminated,
            rejoined_this_round: player.rejoined_this_round,
        });
    }

    let round_number = session.rounds.len() as u32 + 1;
    session.rounds.push(Round {
        round_number,
        scores,
        timestamp: Utc::now(),
    });
    log::debug!("Recorded round {}", round_number);

    // The archived roster still carries this round's rejoin flags.
    let finished = match determine_winner(&session.players) {
        Some(winner) => {
            session.game_over = true;
            session.winner_id = Some(winner);
            log::info!("Match over after round {}: winner {}", round_number, winner);
            session.snapshot()
        }
        None => {
            session.clear_winner();
            None
        }
    };

    for player in &mut session.players {
        player.rejoined_this_round = false;
    }
    Ok(finished)
}

/// Winner of the match given the roster after a round, if the match is over.
///
/// One player left standing wins. If everyone is out, the lowest score wins, and the
/// first of equal lowest scores in roster order takes it.
pub fn determine_winner(players: &[Player]) -> Option<PlayerId> {
    let mut remaining = players.iter().filter(|p| !p.is_eliminated);
    match (remaining.next(), remaining.next()) {
        (Some(only), None) => Some(only.id),
        (None, _) => lowest_score(players).map(|p| p.id),
        _ => None,
    }
}

/// First player with the strict minimum score.
fn lowest_score(players: &[Player]) -> Option<&Player> {
    players.iter().fold(None, |best: Option<&Player>, p| match best {
        Some(b) if b.score <= p.score => Some(b),
        _ => Some(p),
    })
}
