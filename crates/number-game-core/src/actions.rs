//! Actions the presentation layer forwards to the engine.
//!
//! This module defines every user action the engine accepts and the events
//! that result from applying them.

use crate::config::GameConfig;
use crate::digits::Digits;
use crate::player::PlayerId;
use crate::powerup::{PowerUpId, WildcardHint};
use crate::schedule::ScheduledTransition;
use serde::{Deserialize, Serialize};

/// All possible user actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum GameAction {
    // ==================== Menu ====================
    /// Leave the menu and seat the players
    StartGame(GameConfig),
    /// Choose display names, in seat order
    SetPlayerNames(Vec<String>),

    // ==================== Round Setup ====================
    /// Begin the current player's round
    StartRound,
    /// Previous player types the secret (manual mode), e.g. `"371"`
    SubmitSecret(String),
    /// Pick one of the face-down power-up cards (0-4)
    DrawPowerUpCard(usize),

    // ==================== Guessing ====================
    /// Guess while finding digits
    SubmitGuess(String),
    /// Guess the order once all digits are found
    SubmitArrangement(String),

    // ==================== Game Management ====================
    /// End the game and return to the menu
    ResetGame,
}

impl GameAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            GameAction::StartGame(_) => ActionKind::StartGame,
            GameAction::SetPlayerNames(_) => ActionKind::SetPlayerNames,
            GameAction::StartRound => ActionKind::StartRound,
            GameAction::SubmitSecret(_) => ActionKind::SubmitSecret,
            GameAction::DrawPowerUpCard(_) => ActionKind::DrawPowerUpCard,
            GameAction::SubmitGuess(_) => ActionKind::SubmitGuess,
            GameAction::SubmitArrangement(_) => ActionKind::SubmitArrangement,
            GameAction::ResetGame => ActionKind::ResetGame,
        }
    }
}

/// Action without its payload, for enabling controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    StartGame,
    SetPlayerNames,
    StartRound,
    SubmitSecret,
    DrawPowerUpCard,
    SubmitGuess,
    SubmitArrangement,
    ResetGame,
}

/// Events that occur as a result of actions and transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Players were seated and the first round awaits
    GameStarted { player_count: u8 },

    /// Display names changed
    PlayerNamesChanged { names: Vec<String> },

    /// A round began for a player
    RoundStarted { player: PlayerId },

    /// A player must type the secret for the guesser
    SecretRequested { setter: PlayerId, guesser: PlayerId },

    /// The manual secret was accepted
    SecretSet { setter: PlayerId },

    /// A face-down card was picked
    CardPicked { player: PlayerId, card: usize },

    /// The picked card resolved into a power-up
    PowerUpRevealed {
        player: PlayerId,
        power_up: PowerUpId,
    },

    /// An ordinary guess was scored
    GuessEvaluated {
        player: PlayerId,
        guess: Digits,
        matches: u8,
        hint: Option<WildcardHint>,
    },

    /// All three digits identified
    DigitsFound { player: PlayerId, points: u32 },

    /// Exact secret guessed while finding digits
    LotteryWin { player: PlayerId },

    /// An arrangement attempt was checked
    ArrangementChecked {
        player: PlayerId,
        correct: bool,
        remaining: u8,
    },

    /// Points added to a player's total
    PointsAwarded {
        player: PlayerId,
        points: u32,
        total: u32,
    },

    /// The skip-turn card forfeited the round
    TurnSkipped { player: PlayerId },

    /// The round ended and the turn passed on
    RoundEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    /// A player reached the winning score
    GameWon { player: PlayerId, score: u32 },

    /// The game over screen was entered
    GameFinished { winner: PlayerId },

    /// A delayed transition is pending
    TransitionScheduled { transition: ScheduledTransition },

    /// Transient feedback was cleared
    MessageCleared,

    /// The game was abandoned or finished and the menu is back
    GameReset,
}
