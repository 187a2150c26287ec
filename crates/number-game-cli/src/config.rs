//! Settings read from the environment.

use anyhow::Context;
use number_game_core::{GameConfig, GameMode, Timing};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("NUMBER_GAME_MODE must be \"auto\" or \"manual\", got {0:?}")]
    Mode(String),
}

/// Everything the terminal front end is configured with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub game: GameConfig,
    /// Fixed RNG seed for reproducible games
    pub seed: Option<u64>,
    /// Skip every delay
    pub fast: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let player_count: u8 = var("NUMBER_GAME_PLAYERS", "2")
            .parse()
            .context("NUMBER_GAME_PLAYERS must be a number")?;
        let mode = parse_mode(&var("NUMBER_GAME_MODE", "auto"))?;
        let power_ups: bool = parse_flag("NUMBER_GAME_POWER_UPS", &var("NUMBER_GAME_POWER_UPS", "false"))?;
        let party: bool = parse_flag("NUMBER_GAME_PARTY", &var("NUMBER_GAME_PARTY", "false"))?;
        let fast: bool = parse_flag("NUMBER_GAME_FAST", &var("NUMBER_GAME_FAST", "false"))?;
        let seed = lookup("NUMBER_GAME_SEED")
            .map(|s| s.parse::<u64>())
            .transpose()
            .context("NUMBER_GAME_SEED must be an unsigned integer")?;

        let game = GameConfig::new(player_count)
            .with_mode(mode)
            .with_power_ups(power_ups)
            .with_party_mode(party);
        game.validate()?;

        Ok(Self { game, seed, fast })
    }

    pub fn timing(&self) -> Timing {
        if self.fast {
            Timing::instant()
        } else {
            Timing::default()
        }
    }
}

fn parse_mode(raw: &str) -> Result<GameMode, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(GameMode::Auto),
        "manual" => Ok(GameMode::Manual),
        _ => Err(SettingsError::Mode(raw.to_string())),
    }
}

fn parse_flag(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => bool::from_str(other).with_context(|| format!("{} must be true or false", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.game, GameConfig::new(2));
        assert_eq!(s.seed, None);
        assert!(!s.fast);
        assert_eq!(s.timing(), Timing::default());
    }

    #[test]
    fn test_all_variables() {
        let s = settings(&[
            ("NUMBER_GAME_PLAYERS", "4"),
            ("NUMBER_GAME_MODE", "Manual"),
            ("NUMBER_GAME_POWER_UPS", "true"),
            ("NUMBER_GAME_PARTY", "1"),
            ("NUMBER_GAME_SEED", "42"),
            ("NUMBER_GAME_FAST", "true"),
        ])
        .unwrap();

        assert_eq!(s.game.player_count, 4);
        assert_eq!(s.game.mode, GameMode::Manual);
        assert!(s.game.party_cards_enabled());
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.timing(), Timing::instant());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(settings(&[("NUMBER_GAME_PLAYERS", "5")]).is_err());
        assert!(settings(&[("NUMBER_GAME_PLAYERS", "two")]).is_err());
        assert!(settings(&[("NUMBER_GAME_MODE", "random")]).is_err());
        assert!(settings(&[("NUMBER_GAME_FAST", "yes please")]).is_err());
        assert!(settings(&[("NUMBER_GAME_SEED", "-1")]).is_err());
    }
}
