//! Player state and solo statistics.

use serde::{Deserialize, Serialize};

/// Player identifier (seat index, 0-3)
pub type PlayerId = u8;

/// Longest name a player can choose
pub const MAX_NAME_LEN: usize = 15;

/// A seat at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    /// Chosen name, empty when none was given
    pub name: String,
    /// Running total, may pass 100 on the winning award
    pub score: u32,
    pub is_current_turn: bool,
}

impl PlayerState {
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: normalize_name(name),
            score: 0,
            is_current_turn: false,
        }
    }

    /// Name to show: the chosen one, else "You" in solo or "Player N"
    pub fn display_name(&self, solo: bool) -> String {
        if !self.name.is_empty() {
            self.name.clone()
        } else {
            default_name(self.id, solo)
        }
    }

    /// Add points and return the new total
    pub fn award(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }
}

/// Trim and cap a typed name
pub fn normalize_name(raw: &str) -> String {
    raw.trim().chars().take(MAX_NAME_LEN).collect::<String>().trim_end().to_string()
}

/// Placeholder name for a seat without a chosen name
pub fn default_name(id: PlayerId, solo: bool) -> String {
    if solo {
        "You".to_string()
    } else {
        format!("Player {}", id + 1)
    }
}

/// Single-player records, kept for the lifetime of the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoloStats {
    pub games_won: u32,
    /// Fewest rounds needed to reach 100
    pub best_rounds: Option<u32>,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl SoloStats {
    /// Record a solo win that took `rounds_played` rounds
    pub fn record_win(&mut self, rounds_played: u32) {
        self.games_won += 1;
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
        self.best_rounds = Some(match self.best_rounds {
            Some(best) => best.min(rounds_played),
            None => rounds_played,
        });
    }
}
