//! MatchEngine: the single controller that owns session state and mirrors it to a store.

use crate::logic::{self, GlobalStats, PlayerRecord};
use crate::models::{
    standings, Match, MatchError, MatchState, Player, PlayerId, Round, SessionState, Settings,
    SettingsUpdate,
};
use crate::store::{self, KeyValueStore, StoreError};

/// Owns the active match, the settings and the match history.
///
/// State is loaded once in [`MatchEngine::load`] and saved after every successful change.
/// Save failures are logged and otherwise ignored; in-memory state stays authoritative.
pub struct MatchEngine<S: KeyValueStore> {
    session: SessionState,
    settings: Settings,
    history: Vec<Match>,
    store: S,
}

impl<S: KeyValueStore> MatchEngine<S> {
    /// Load everything from `store`, falling back to empty defaults.
    pub fn load(store: S) -> Self {
        let session = store::load_session(&store);
        let settings = store::load_settings(&store);
        let history = store::load_history(&store);
        log::debug!(
            "Loaded session with {} players, {} archived matches",
            session.players.len(),
            history.len()
        );
        Self {
            session,
            settings,
            history,
            store,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.session.players
    }

    pub fn rounds(&self) -> &[Round] {
        &self.session.rounds
    }

    pub fn is_game_over(&self) -> bool {
        self.session.game_over
    }

    pub fn winner(&self) -> Option<&Player> {
        self.session.winner()
    }

    pub fn state(&self) -> MatchState {
        self.session.state()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_last_players(&self) -> bool {
        !self.session.last_players.is_empty()
    }

    /// Current roster, lowest score first.
    pub fn standings(&self) -> Vec<&Player> {
        standings(&self.session.players)
    }

    /// Whether the player at `index` may rejoin right now.
    pub fn can_rejoin(&self, index: usize) -> bool {
        self.settings.allow_rejoin
            && self
                .session
                .players
                .get(index)
                .is_some_and(|p| p.is_eliminated)
    }

    /// Archived matches, oldest first.
    pub fn history(&self) -> &[Match] {
        &self.history
    }

    /// Archived matches, newest first.
    pub fn recent_matches(&self) -> impl Iterator<Item = &Match> {
        self.history.iter().rev()
    }

    pub fn global_stats(&self) -> GlobalStats {
        logic::global_stats(&self.history)
    }

    pub fn player_stats(&self) -> Vec<PlayerRecord> {
        logic::player_stats(&self.history)
    }

    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, MatchError> {
        let id = self.checked(|s| logic::add_player(s, name))?;
        self.persist_session();
        Ok(id)
    }

    /// Apply one round. Returns the archived match when this round ended it.
    pub fn submit_round(&mut self, points: &[i32]) -> Result<Option<&Match>, MatchError> {
        let finished = self.checked(|s| logic::submit_round(s, points))?;
        self.persist_session();
        match finished {
            Some(snapshot) => {
                let idx = self.archive(snapshot);
                Ok(self.history.get(idx))
            }
            None => Ok(None),
        }
    }

    pub fn delete_player(&mut self, index: usize) -> Result<Player, MatchError> {
        let removed = self.checked(|s| logic::delete_player(s, index))?;
        self.persist_session();
        Ok(removed)
    }

    pub fn rejoin_player(&mut self, index: usize) -> Result<(), MatchError> {
        let settings = self.settings;
        self.checked(|s| logic::rejoin_player(s, &settings, index))?;
        self.persist_session();
        Ok(())
    }

    pub fn reset_game(&mut self, keep_players: bool) {
        logic::reset_game(&mut self.session, keep_players);
        self.persist_session();
    }

    pub fn restart_with_same_players(&mut self) -> Result<(), MatchError> {
        self.checked(logic::restart_with_same_players)?;
        self.persist_session();
        Ok(())
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.settings.apply(update);
        if let Err(e) = store::save_settings(&mut self.store, &self.settings) {
            log_save_failure("settings", &e);
        }
    }

    /// Run a logic operation, logging rejections.
    fn checked<T>(
        &mut self,
        op: impl FnOnce(&mut SessionState) -> Result<T, MatchError>,
    ) -> Result<T, MatchError> {
        op(&mut self.session).map_err(|e| {
            log::warn!("Operation rejected: {}", e);
            e
        })
    }

    /// Append a finished match, replacing an earlier snapshot of the same match. Returns its index.
    fn archive(&mut self, snapshot: Match) -> usize {
        let idx = match self.history.iter().position(|m| m.id == snapshot.id) {
            Some(idx) => {
                self.history[idx] = snapshot;
                idx
            }
            None => {
                self.history.push(snapshot);
                self.history.len() - 1
            }
        };
        if let Err(e) = store::save_history(&mut self.store, &self.history) {
            log_save_failure("history", &e);
        }
        idx
    }

    fn persist_session(&mut self) {
        if let Err(e) = store::save_session(&mut self.store, &self.session) {
            log_save_failure("session", &e);
        }
    }
}

fn log_save_failure(what: &str, e: &StoreError) {
    log::warn!("Could not save {}: {}", what, e);
}
