//! Per-round state: the secret, budgets, progress and guess history.

use crate::digits::Digits;
use crate::powerup::PowerUpId;
use serde::{Deserialize, Serialize};

/// Guesses available to find the digits
pub const BASE_GUESSES: u8 = 5;

/// Attempts available to arrange found digits
pub const BASE_ARRANGEMENTS: u8 = 2;

/// Power-ups never cut the guess budget below this
pub const MIN_GUESSES: u8 = 2;

/// How a history entry turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "count")]
pub enum GuessOutcome {
    /// Ordinary guess with its match count
    Matches(u8),
    LotteryWin,
    CorrectArrangement,
    WrongArrangement,
}

/// One submitted guess or arrangement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub digits: Digits,
    pub outcome: GuessOutcome,
    pub feedback: String,
}

/// A secret digit shown by the reveal power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedDigit {
    /// Zero-based position in the secret
    pub position: u8,
    pub digit: u8,
}

/// State of the round in progress
#[derive(Debug, Clone)]
pub struct Round {
    secret: Digits,
    pub guesses_remaining: u8,
    pub arrangements_remaining: u8,
    /// Set once all three digits are identified
    pub found_digits: Option<Digits>,
    /// Best match count of any guess this round
    pub best_match_count: u8,
    /// Finding reward waiting to be banked with the arrangement
    pub round_score: u32,
    pub hide_history: bool,
    pub revealed_digit: Option<RevealedDigit>,
    pub active_power_up: Option<PowerUpId>,
    /// Scoring multiplier for the whole round, fixed when the card resolves
    pub multiplier: u32,
    /// Guesses made while finding digits
    pub guesses_made: usize,
    history: Vec<GuessRecord>,
}

impl Round {
    pub fn new(secret: Digits) -> Self {
        Self {
            secret,
            guesses_remaining: BASE_GUESSES,
            arrangements_remaining: BASE_ARRANGEMENTS,
            found_digits: None,
            best_match_count: 0,
            round_score: 0,
            hide_history: false,
            revealed_digit: None,
            active_power_up: None,
            multiplier: 1,
            guesses_made: 0,
            history: Vec::new(),
        }
    }

    pub fn secret(&self) -> &Digits {
        &self.secret
    }

    /// Full history, including entries hidden from display
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// History the player may see
    pub fn visible_history(&self) -> &[GuessRecord] {
        if self.hide_history {
            &[]
        } else {
            &self.history
        }
    }

    pub fn record(&mut self, digits: Digits, outcome: GuessOutcome, feedback: impl Into<String>) {
        self.history.push(GuessRecord {
            digits,
            outcome,
            feedback: feedback.into(),
        });
    }

    pub fn note_matches(&mut self, matches: u8) {
        self.best_match_count = self.best_match_count.max(matches);
    }

    /// Use one finding guess; returns how many remain
    pub fn spend_guess(&mut self) -> u8 {
        self.guesses_made += 1;
        self.guesses_remaining = self.guesses_remaining.saturating_sub(1);
        self.guesses_remaining
    }

    /// Use one arrangement attempt; returns how many remain
    pub fn spend_arrangement(&mut self) -> u8 {
        self.arrangements_remaining = self.arrangements_remaining.saturating_sub(1);
        self.arrangements_remaining
    }

    pub fn has_power_up(&self, id: PowerUpId) -> bool {
        self.active_power_up == Some(id)
    }
}
