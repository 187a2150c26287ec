//! JSON-friendly snapshot of the engine for rendering.
//!
//! The secret is never part of a view; front ends learn it from the
//! round-over message like the players do.

use crate::config::GameConfig;
use crate::digits::Digits;
use crate::game::{GameEngine, GamePhase};
use crate::player::{PlayerId, SoloStats};
use crate::powerup::PowerUp;
use crate::round::{GuessRecord, RevealedDigit, Round};
use crate::schedule::ScheduledTransition;
use serde::Serialize;

/// Everything a screen needs to draw the current state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub phase: GamePhase,
    pub config: GameConfig,
    pub players: Vec<PlayerView>,
    pub current_player: PlayerId,
    pub round: Option<RoundView>,
    pub rounds_played: u32,
    pub solo_stats: SoloStats,
    pub message: String,
    pub pending_transition: Option<ScheduledTransition>,
    pub winner: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    /// Chosen name, or the placeholder for the seat
    pub name: String,
    pub score: u32,
    pub is_current_turn: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub guesses_remaining: u8,
    pub arrangements_remaining: u8,
    pub found_digits: Option<Digits>,
    pub best_match_count: u8,
    pub round_score: u32,
    pub multiplier: u32,
    pub hide_history: bool,
    pub revealed_digit: Option<RevealedDigit>,
    pub active_power_up: Option<&'static PowerUp>,
    /// Empty while the history is hidden
    pub history: Vec<GuessRecord>,
}

impl GameView {
    pub(crate) fn from_engine(engine: &GameEngine) -> Self {
        let solo = engine.config().is_solo();
        let players = engine
            .players()
            .iter()
            .map(|p| PlayerView {
                id: p.id,
                name: p.display_name(solo),
                score: p.score,
                is_current_turn: p.is_current_turn,
            })
            .collect();

        Self {
            phase: engine.phase().clone(),
            config: engine.config().clone(),
            players,
            current_player: engine.current_player(),
            round: engine.round().map(RoundView::from_round),
            rounds_played: engine.rounds_played(),
            solo_stats: engine.solo_stats().clone(),
            message: engine.message().to_string(),
            pending_transition: engine.pending_transition().copied(),
            winner: engine.winner(),
        }
    }
}

impl RoundView {
    fn from_round(round: &Round) -> Self {
        Self {
            guesses_remaining: round.guesses_remaining,
            arrangements_remaining: round.arrangements_remaining,
            found_digits: round.found_digits,
            best_match_count: round.best_match_count,
            round_score: round.round_score,
            multiplier: round.multiplier,
            hide_history: round.hide_history,
            revealed_digit: round.revealed_digit,
            active_power_up: round.active_power_up.map(|id| id.info()),
            history: round.visible_history().to_vec(),
        }
    }
}
