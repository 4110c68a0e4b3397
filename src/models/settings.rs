//! Game settings: a fixed-shape record with defaults and field-by-field updates.

use serde::{Deserialize, Serialize};

/// User-facing game options.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Eliminated players may re-enter the match.
    pub allow_rejoin: bool,
    /// Default choice for "keep the same players" when a match ends.
    pub restart_with_same_players: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allow_rejoin: true,
            restart_with_same_players: true,
        }
    }
}

/// Partial update: `None` leaves the field as is.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub allow_rejoin: Option<bool>,
    pub restart_with_same_players: Option<bool>,
}

impl Settings {
    /// Override every field the update sets.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(v) = update.allow_rejoin {
            self.allow_rejoin = v;
        }
        if let Some(v) = update.restart_with_same_players {
            self.restart_with_same_players = v;
        }
    }
}
