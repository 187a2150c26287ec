//! The Number Game - a turn-based digit guessing party game engine
//!
//! Each round the current player tries to identify a hidden three-digit number
//! made of distinct digits 1-9, then to put the found digits in order. Points
//! depend on how quickly the digits are found; the first player to 100 wins.
//!
//! # Architecture
//!
//! The engine is a pure state machine with no clock or UI of its own. Front
//! ends forward user actions, render [`GameView`] snapshots and drive delayed
//! transitions by firing [`Ticket`]s or calling [`GameEngine::advance_time`].
//! It can be compiled to:
//! - Native Rust for the terminal front end
//! - WebAssembly for browser front ends
//!
//! # Modules
//!
//! - [`digits`]: Validated three-digit values
//! - [`evaluate`]: Guess evaluation against the secret
//! - [`scoring`]: Point tables and the win threshold
//! - [`powerup`]: Power-up catalog, draws and effects
//! - [`round`]: Per-round state and history
//! - [`game`]: Game state machine
//! - [`schedule`]: Delayed follow-up transitions

pub mod actions;
pub mod config;
pub mod digits;
pub mod evaluate;
pub mod game;
pub mod player;
pub mod powerup;
pub mod round;
pub mod schedule;
pub mod scoring;
pub mod view;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{ActionKind, GameAction, GameEvent};
pub use config::{ConfigError, GameConfig, GameMode, Timing, MAX_PLAYERS};
pub use digits::{DigitError, Digits};
pub use evaluate::{evaluate, is_exact, match_count, Evaluation};
pub use game::{CardDraw, GameEngine, GameError, GamePhase};
pub use player::{PlayerId, PlayerState, SoloStats};
pub use powerup::{PowerUp, PowerUpId, WildcardHint};
pub use round::{GuessOutcome, GuessRecord, RevealedDigit, Round};
pub use schedule::{ScheduledTransition, Ticket, TransitionKind};
pub use scoring::{LOTTERY_SCORE, WINNING_SCORE};
pub use view::{GameView, PlayerView, RoundView};
