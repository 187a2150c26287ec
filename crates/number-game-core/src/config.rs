//! Game configuration.
//!
//! - [`GameConfig`]: rules chosen on the menu screen
//! - [`Timing`]: delays of the automatic follow-up transitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported table
pub const MAX_PLAYERS: u8 = 4;

/// Errors in a game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("Player count must be between 1 and {max}, got {0}", max = MAX_PLAYERS)]
    PlayerCount(u8),
}

/// How each round's secret is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// The engine generates the secret
    #[default]
    Auto,
    /// The previous player types a secret for the current player
    Manual,
}

/// Rules for a game, fixed at start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub player_count: u8,
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default)]
    pub power_ups_enabled: bool,
    /// Adds the drinking cards; ignored unless power-ups are enabled
    #[serde(default)]
    pub party_mode: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            mode: GameMode::Auto,
            power_ups_enabled: false,
            party_mode: false,
        }
    }
}

impl GameConfig {
    /// Auto mode without power-ups
    pub fn new(player_count: u8) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Single player race to 100
    pub fn solo() -> Self {
        Self::new(1)
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_power_ups(mut self, enabled: bool) -> Self {
        self.power_ups_enabled = enabled;
        self
    }

    pub fn with_party_mode(mut self, enabled: bool) -> Self {
        self.party_mode = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        Ok(())
    }

    pub fn is_solo(&self) -> bool {
        self.player_count == 1
    }

    /// Solo games always generate their secret
    pub fn uses_manual_entry(&self) -> bool {
        self.mode == GameMode::Manual && self.player_count > 1
    }

    pub fn party_cards_enabled(&self) -> bool {
        self.power_ups_enabled && self.party_mode
    }
}

/// Delays, in milliseconds, before each automatic transition fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    /// Picked card face-down before its power-up is revealed
    pub card_reveal_ms: u64,
    /// Revealed power-up shown before play begins
    pub power_up_display_ms: u64,
    /// Skip-turn card shown before the turn passes
    pub skip_turn_ms: u64,
    /// Guess feedback shown before the message clears
    pub feedback_ms: u64,
    /// "Round over" message shown before the next player's setup
    pub round_over_ms: u64,
    /// Correct arrangement celebrated before the round or game ends
    pub correct_arrangement_ms: u64,
    /// Lottery win celebrated before game over
    pub lottery_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            card_reveal_ms: 3_500,
            power_up_display_ms: 4_000,
            skip_turn_ms: 3_000,
            feedback_ms: 8_000,
            round_over_ms: 8_000,
            correct_arrangement_ms: 5_000,
            lottery_ms: 8_000,
        }
    }
}

impl Timing {
    /// Every transition applies immediately
    pub fn instant() -> Self {
        Self {
            card_reveal_ms: 0,
            power_up_display_ms: 0,
            skip_turn_ms: 0,
            feedback_ms: 0,
            round_over_ms: 0,
            correct_arrangement_ms: 0,
            lottery_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_count_bounds() {
        assert_eq!(GameConfig::new(0).validate(), Err(ConfigError::PlayerCount(0)));
        assert_eq!(GameConfig::new(5).validate(), Err(ConfigError::PlayerCount(5)));
        for count in 1..=4 {
            assert!(GameConfig::new(count).validate().is_ok());
        }
    }

    #[test]
    fn test_manual_entry_needs_two_players() {
        assert!(!GameConfig::solo().with_mode(GameMode::Manual).uses_manual_entry());
        assert!(GameConfig::new(2).with_mode(GameMode::Manual).uses_manual_entry());
        assert!(!GameConfig::new(2).uses_manual_entry());
    }

    #[test]
    fn test_party_mode_requires_power_ups() {
        assert!(!GameConfig::new(3).with_party_mode(true).party_cards_enabled());
        assert!(GameConfig::new(3)
            .with_power_ups(true)
            .with_party_mode(true)
            .party_cards_enabled());
    }

    #[test]
    fn test_config_from_json() {
        let config: GameConfig = serde_json::from_str(
            r#"{"playerCount":3,"mode":"manual","powerUpsEnabled":true,"partyMode":false}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            GameConfig::new(3)
                .with_mode(GameMode::Manual)
                .with_power_ups(true)
        );

        let minimal: GameConfig = serde_json::from_str(r#"{"playerCount":1}"#).unwrap();
        assert_eq!(minimal, GameConfig::solo());
    }
}
