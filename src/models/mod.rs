//! Data structures for the Loba counter: players, rounds, matches, settings, session state.

mod game;
mod player;
mod round;
mod session;
mod settings;

pub use game::{standings, Match, MatchId};
pub use player::{Player, PlayerId, ELIMINATION_THRESHOLD};
pub use round::{Round, RoundScore};
pub use session::{MatchError, MatchState, SessionState};
pub use settings::{Settings, SettingsUpdate};
