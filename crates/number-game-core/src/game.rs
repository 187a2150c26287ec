//! Core game state machine.
//!
//! This module contains [`GameEngine`], which owns all game state and applies
//! [`GameAction`]s. Phases follow
//! `Menu → Setup → (ManualEntry) → (PowerUp) → Playing → Arrangement → Setup`,
//! with `GameOver` reached once someone scores 100.

use crate::actions::{ActionKind, GameAction, GameEvent};
use crate::config::{GameConfig, Timing, MAX_PLAYERS};
use crate::digits::Digits;
use crate::evaluate::{evaluate, is_exact, Evaluation};
use crate::player::{normalize_name, PlayerId, PlayerState, SoloStats};
use crate::powerup::{self, wildcard_hint, PowerUpId, CARD_COUNT};
use crate::round::{GuessOutcome, Round};
use crate::schedule::{ScheduledTransition, Scheduler, Ticket, TransitionKind};
use crate::scoring::{
    arrangement_bonus, consolation_points, finding_points, is_winning, LOTTERY_SCORE,
};
use crate::view::GameView;
use crate::{config::ConfigError, digits::DigitError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Progress of the power-up card draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum CardDraw {
    /// Waiting for the player to pick a card
    AwaitingPick,
    /// Card picked, power-up not shown yet
    Revealing { card: usize },
    /// Power-up shown, play starts shortly
    Revealed { card: usize, power_up: PowerUpId },
}

/// Game phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum GamePhase {
    /// Choosing settings and names
    Menu,

    /// Between rounds, waiting for the current player to start
    Setup,

    /// The previous player types a secret for the current player
    ManualEntry { setter: PlayerId },

    /// Drawing this round's power-up card
    #[serde(rename = "powerup")]
    PowerUp { draw: CardDraw },

    /// Guessing to identify the digits
    Playing,

    /// All digits known, guessing their order
    Arrangement,

    /// Someone reached the winning score
    GameOver { winner: PlayerId },
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error(transparent)]
    InvalidDigits(#[from] DigitError),

    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("No card {0}, pick a card from 0 to {max}", max = CARD_COUNT - 1)]
    InvalidCard(usize),

    #[error("Wait for the current result to finish")]
    TransitionPending,
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    timing: Timing,
    phase: GamePhase,
    /// Seated players, in turn order
    players: Vec<PlayerState>,
    /// Names chosen so far, kept across the menu
    names: Vec<String>,
    current_player: PlayerId,
    /// Round in progress, dropped when it ends
    round: Option<Round>,
    /// Rounds started in a solo game
    rounds_played: u32,
    solo_stats: SoloStats,
    message: String,
    scheduler: Scheduler,
    rng: StdRng,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Create an engine on the menu, seeded from entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create an engine with a fixed seed (for replays and tests)
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            config: GameConfig::default(),
            timing: Timing::default(),
            phase: GamePhase::Menu,
            players: Vec::new(),
            names: Vec::new(),
            current_player: 0,
            round: None,
            rounds_played: 0,
            solo_stats: SoloStats::default(),
            message: String::new(),
            scheduler: Scheduler::new(),
            rng,
        }
    }

    /// Replace the transition delays
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    // ==================== Accessors ====================

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    /// Configuration of the current (or last) game
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(id as usize)
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(id as usize)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Score of a player, 0 for an empty seat
    pub fn score(&self, id: PlayerId) -> u32 {
        self.player(id).map_or(0, |p| p.score)
    }

    /// Name to show for a seat
    pub fn display_name(&self, id: PlayerId) -> String {
        let solo = self.config.is_solo();
        match self.player(id) {
            Some(p) => p.display_name(solo),
            None => crate::player::default_name(id, solo),
        }
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn solo_stats(&self) -> &SoloStats {
        &self.solo_stats
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn pending_transition(&self) -> Option<&ScheduledTransition> {
        self.scheduler.pending()
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// Get the winner if the game is finished
    pub fn winner(&self) -> Option<PlayerId> {
        if let GamePhase::GameOver { winner } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    /// Snapshot for the presentation layer
    pub fn view(&self) -> GameView {
        GameView::from_engine(self)
    }

    /// Action kinds the current phase accepts
    pub fn valid_actions(&self) -> Vec<ActionKind> {
        let mut actions = vec![ActionKind::SetPlayerNames];

        if self.phase == GamePhase::Menu {
            actions.push(ActionKind::StartGame);
            return actions;
        }
        actions.push(ActionKind::ResetGame);

        if self.scheduler.is_blocking() {
            return actions;
        }

        match &self.phase {
            GamePhase::Setup => actions.push(ActionKind::StartRound),
            GamePhase::ManualEntry { .. } => actions.push(ActionKind::SubmitSecret),
            GamePhase::PowerUp {
                draw: CardDraw::AwaitingPick,
            } => actions.push(ActionKind::DrawPowerUpCard),
            GamePhase::Playing => actions.push(ActionKind::SubmitGuess),
            GamePhase::Arrangement => actions.push(ActionKind::SubmitArrangement),
            GamePhase::Menu | GamePhase::PowerUp { .. } | GamePhase::GameOver { .. } => {}
        }

        actions
    }

    // ==================== Actions ====================

    /// Apply an action to the game state.
    ///
    /// A rejected action leaves the state untouched.
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        match action {
            GameAction::StartGame(config) => self.start_game(config),
            GameAction::SetPlayerNames(names) => Ok(self.set_player_names(names)),
            GameAction::StartRound => self.start_round(),
            GameAction::SubmitSecret(input) => self.submit_secret(&input),
            GameAction::DrawPowerUpCard(card) => self.draw_power_up_card(card),
            GameAction::SubmitGuess(input) => self.submit_guess(&input),
            GameAction::SubmitArrangement(input) => self.submit_arrangement(&input),
            GameAction::ResetGame => self.reset_game(),
        }
    }

    /// Seat the players and move to the first round's setup
    pub fn start_game(&mut self, config: GameConfig) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != GamePhase::Menu {
            return Err(GameError::InvalidPhase);
        }
        config.validate()?;

        self.players = (0..config.player_count)
            .map(|id| PlayerState::new(id, self.names.get(id as usize).map_or("", String::as_str)))
            .collect();
        self.config = config;
        self.current_player = 0;
        self.rounds_played = 0;
        self.round = None;
        self.message.clear();
        self.phase = GamePhase::Setup;
        self.sync_turn_flags();

        info!(
            players = self.config.player_count,
            mode = ?self.config.mode,
            power_ups = self.config.power_ups_enabled,
            party = self.config.party_cards_enabled(),
            "Game started"
        );

        Ok(vec![GameEvent::GameStarted {
            player_count: self.config.player_count,
        }])
    }

    /// Set display names in seat order. Allowed in every phase.
    pub fn set_player_names(&mut self, names: Vec<String>) -> Vec<GameEvent> {
        self.names = names
            .iter()
            .take(MAX_PLAYERS as usize)
            .map(|n| normalize_name(n))
            .collect();

        for player in &mut self.players {
            player.name = self.names.get(player.id as usize).cloned().unwrap_or_default();
        }

        vec![GameEvent::PlayerNamesChanged {
            names: self.names.clone(),
        }]
    }

    /// Start the current player's round
    pub fn start_round(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::InvalidPhase);
        }

        let player = self.current_player;
        if self.config.is_solo() {
            self.rounds_played += 1;
        }

        let mut events = vec![GameEvent::RoundStarted { player }];

        if self.config.uses_manual_entry() {
            let count = self.player_count() as PlayerId;
            let setter = (player + count - 1) % count;
            self.message.clear();
            self.phase = GamePhase::ManualEntry { setter };
            events.push(GameEvent::SecretRequested {
                setter,
                guesser: player,
            });
        } else {
            let secret = Digits::random(&mut self.rng);
            self.begin_round(secret);
        }

        info!(player, rounds_played = self.rounds_played, "Round started");
        Ok(events)
    }

    /// Accept a typed secret in manual mode
    pub fn submit_secret(&mut self, input: &str) -> Result<Vec<GameEvent>, GameError> {
        let GamePhase::ManualEntry { setter } = self.phase else {
            return Err(GameError::InvalidPhase);
        };
        let secret: Digits = input.parse()?;

        self.begin_round(secret);
        Ok(vec![GameEvent::SecretSet { setter }])
    }

    /// Pick a face-down card. Which card is picked does not affect the draw.
    pub fn draw_power_up_card(&mut self, card: usize) -> Result<Vec<GameEvent>, GameError> {
        match self.phase {
            GamePhase::PowerUp {
                draw: CardDraw::AwaitingPick,
            } => {}
            GamePhase::PowerUp { .. } => return Err(GameError::TransitionPending),
            _ => return Err(GameError::InvalidPhase),
        }
        if card >= CARD_COUNT {
            return Err(GameError::InvalidCard(card));
        }

        let player = self.current_player;
        self.phase = GamePhase::PowerUp {
            draw: CardDraw::Revealing { card },
        };
        self.message = "And the card is...".to_string();

        let mut events = vec![GameEvent::CardPicked { player, card }];
        events.extend(self.schedule(TransitionKind::RevealPowerUp, self.timing.card_reveal_ms));
        Ok(events)
    }

    /// Guess while finding digits
    pub fn submit_guess(&mut self, input: &str) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_ready(GamePhase::Playing)?;
        let guess: Digits = input.parse()?;
        let player = self.current_player;
        let mut events = Vec::new();

        let round = self.round.as_mut().ok_or(GameError::InvalidPhase)?;
        let prior_guesses = round.guesses_made;
        let evaluation = evaluate(&guess, round.secret());
        let remaining = round.spend_guess();

        let matches = match evaluation {
            Evaluation::LotteryWin => {
                round.record(guess, GuessOutcome::LotteryWin, "LOTTERY WIN!");
                info!(player, secret = %guess, "Lottery win");
                self.message = "LOTTERY WIN! Exact number guessed! GAME OVER!".to_string();
                events.push(GameEvent::LotteryWin { player });
                events.extend(self.set_lottery_score(player));
                events.extend(self.declare_winner(player, self.timing.lottery_ms));
                return Ok(events);
            }
            Evaluation::Matches(n) => n,
        };

        let hint = if prior_guesses == 0 && round.has_power_up(PowerUpId::Wildcard) {
            round.active_power_up = None;
            wildcard_hint(&guess, round.secret(), &mut self.rng)
        } else {
            None
        };

        let feedback = match hint {
            Some(hint) => format!("{} right ({})", matches, hint),
            None => format!("{} right", matches),
        };
        round.record(guess, GuessOutcome::Matches(matches), feedback.as_str());
        round.note_matches(matches);
        debug!(player, guess = %guess, matches, remaining, "Guess evaluated");

        events.push(GameEvent::GuessEvaluated {
            player,
            guess,
            matches,
            hint,
        });

        if evaluation.all_digits_found() {
            let points = finding_points(prior_guesses, round.multiplier);
            round.found_digits = Some(guess);
            round.round_score = points;
            self.phase = GamePhase::Arrangement;
            self.message = "All 3 digits found! Now arrange them correctly.".to_string();
            self.scheduler.cancel();
            events.push(GameEvent::DigitsFound { player, points });
            return Ok(events);
        }

        if remaining == 0 {
            let best = round.best_match_count;
            let doubled = round.multiplier > 1;
            let points = consolation_points(best, round.multiplier);
            let reason = match best {
                2 => "getting 2 right",
                1 => "getting 1 right",
                _ => "trying",
            };
            self.message = format!(
                "Round over. The number was {}. You get {} points for {}{}!",
                round.secret(),
                points,
                reason,
                if doubled { " (doubled!)" } else { "" }
            );
            events.extend(self.award_and_conclude(player, points, self.timing.round_over_ms));
        } else {
            self.message = if round.hide_history {
                format!("{} (history hidden - remember this!)", feedback)
            } else {
                feedback
            };
            events.extend(self.schedule(TransitionKind::ClearMessage, self.timing.feedback_ms));
        }

        Ok(events)
    }

    /// Guess the order of the found digits
    pub fn submit_arrangement(&mut self, input: &str) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_ready(GamePhase::Arrangement)?;
        let arrangement: Digits = input.parse()?;
        let player = self.current_player;
        let mut events = Vec::new();

        let round = self.round.as_mut().ok_or(GameError::InvalidPhase)?;
        let attempts_before = round.arrangements_remaining;
        let remaining = round.spend_arrangement();
        let correct = is_exact(&arrangement, round.secret());

        events.push(GameEvent::ArrangementChecked {
            player,
            correct,
            remaining,
        });

        if correct {
            let points = round.round_score + arrangement_bonus(attempts_before);
            round.record(arrangement, GuessOutcome::CorrectArrangement, "CORRECT!");
            self.message = format!("Correct! +{} points!", points);
            events.extend(self.award_and_conclude(
                player,
                points,
                self.timing.correct_arrangement_ms,
            ));
        } else {
            round.record(arrangement, GuessOutcome::WrongArrangement, "Wrong order");
            if remaining == 0 {
                let points = round.round_score;
                self.message = format!(
                    "Round over. The number was {}! You get {} points for finding all 3 numbers!",
                    round.secret(),
                    points
                );
                events.extend(self.award_and_conclude(player, points, self.timing.round_over_ms));
            } else if remaining == 1 {
                self.message = "Wrong order. One more try!".to_string();
            } else {
                self.message = format!("Wrong order. {} tries left!", remaining);
            }
        }

        debug!(player, correct, remaining, "Arrangement checked");
        Ok(events)
    }

    /// Abandon or close the game and return to the menu.
    ///
    /// Scores, names and the round counter are cleared; solo stats survive.
    pub fn reset_game(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.phase == GamePhase::Menu {
            return Err(GameError::InvalidPhase);
        }

        if let Some(cancelled) = self.scheduler.cancel() {
            debug!(ticket = cancelled.ticket.0, "Cancelled pending transition on reset");
        }
        self.players.clear();
        self.names.clear();
        self.current_player = 0;
        self.rounds_played = 0;
        self.round = None;
        self.message.clear();
        self.phase = GamePhase::Menu;

        info!("Game reset");
        Ok(vec![GameEvent::GameReset])
    }

    // ==================== Scheduled Transitions ====================

    /// Fire a scheduled transition.
    ///
    /// A ticket that is no longer pending (replaced, cancelled or already
    /// fired) is ignored and yields no events.
    pub fn fire(&mut self, ticket: Ticket) -> Vec<GameEvent> {
        match self.scheduler.take(ticket) {
            Some(kind) => self.run_transition(kind),
            None => {
                debug!(ticket = ticket.0, "Ignoring stale transition");
                Vec::new()
            }
        }
    }

    /// Let time pass, firing every transition that comes due
    pub fn advance_time(&mut self, elapsed_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut elapsed_ms = elapsed_ms;

        while let Some((ticket, leftover)) = self.scheduler.advance(elapsed_ms) {
            events.extend(self.fire(ticket));
            elapsed_ms = leftover;
        }

        events
    }

    /// Schedule a follow-up, or run it now when the delay is zero.
    ///
    /// A zero-delay message clear is skipped so the feedback stays until the
    /// next action replaces it.
    fn schedule(&mut self, kind: TransitionKind, delay_ms: u64) -> Vec<GameEvent> {
        if delay_ms == 0 {
            self.scheduler.cancel();
            return match kind {
                TransitionKind::ClearMessage => Vec::new(),
                _ => self.run_transition(kind),
            };
        }

        let transition = self.scheduler.schedule(kind, delay_ms);
        debug!(ticket = transition.ticket.0, ?kind, delay_ms, "Transition scheduled");
        vec![GameEvent::TransitionScheduled { transition }]
    }

    /// Apply a due transition if its cause still holds
    fn run_transition(&mut self, kind: TransitionKind) -> Vec<GameEvent> {
        let phase = self.phase.clone();
        match (kind, &phase) {
            (TransitionKind::ClearMessage, _) => {
                self.message.clear();
                vec![GameEvent::MessageCleared]
            }
            (
                TransitionKind::RevealPowerUp,
                GamePhase::PowerUp {
                    draw: CardDraw::Revealing { card },
                },
            ) => self.reveal_power_up(*card),
            (
                TransitionKind::BeginPlaying,
                GamePhase::PowerUp {
                    draw: CardDraw::Revealed { .. },
                },
            ) => {
                self.phase = GamePhase::Playing;
                self.message.clear();
                Vec::new()
            }
            (
                TransitionKind::SkipTurn,
                GamePhase::PowerUp {
                    draw:
                        CardDraw::Revealed {
                            power_up: PowerUpId::SkipTurn,
                            ..
                        },
                },
            ) => {
                let player = self.current_player;
                info!(player, "Turn skipped");
                let mut events = vec![GameEvent::TurnSkipped { player }];
                events.extend(self.end_round());
                events
            }
            (TransitionKind::EndRound, GamePhase::Playing | GamePhase::Arrangement) => {
                self.end_round()
            }
            (
                TransitionKind::FinishGame { winner },
                GamePhase::Playing | GamePhase::Arrangement,
            ) => {
                self.round = None;
                self.phase = GamePhase::GameOver { winner };
                vec![GameEvent::GameFinished { winner }]
            }
            (kind, phase) => {
                debug!(?kind, ?phase, "Transition no longer applies");
                Vec::new()
            }
        }
    }

    // ==================== Helper Methods ====================

    /// Reject round actions outside `expected` or while a result is showing
    fn ensure_ready(&self, expected: GamePhase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::InvalidPhase);
        }
        if self.scheduler.is_blocking() {
            return Err(GameError::TransitionPending);
        }
        Ok(())
    }

    /// Install a fresh round for `secret`
    fn begin_round(&mut self, secret: Digits) {
        self.round = Some(Round::new(secret));
        self.message.clear();
        self.scheduler.cancel();

        self.phase = if self.config.power_ups_enabled {
            GamePhase::PowerUp {
                draw: CardDraw::AwaitingPick,
            }
        } else {
            GamePhase::Playing
        };
    }

    fn reveal_power_up(&mut self, card: usize) -> Vec<GameEvent> {
        let player = self.current_player;
        let power_up = powerup::draw(&mut self.rng, self.config.party_cards_enabled());

        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        self.message = power_up.apply(round, &mut self.rng);
        self.phase = GamePhase::PowerUp {
            draw: CardDraw::Revealed { card, power_up },
        };
        debug!(player, card, ?power_up, "Power-up revealed");

        let mut events = vec![GameEvent::PowerUpRevealed { player, power_up }];
        if power_up == PowerUpId::SkipTurn {
            events.extend(self.schedule(TransitionKind::SkipTurn, self.timing.skip_turn_ms));
        } else {
            events.extend(self.schedule(
                TransitionKind::BeginPlaying,
                self.timing.power_up_display_ms,
            ));
        }
        events
    }

    fn set_lottery_score(&mut self, player: PlayerId) -> Vec<GameEvent> {
        let Some(p) = self.player_mut(player) else {
            return Vec::new();
        };
        let points = LOTTERY_SCORE.saturating_sub(p.score);
        p.score = LOTTERY_SCORE;
        vec![GameEvent::PointsAwarded {
            player,
            points,
            total: LOTTERY_SCORE,
        }]
    }

    /// Bank points, then either end the game or schedule the end of the round
    fn award_and_conclude(&mut self, player: PlayerId, points: u32, delay_ms: u64) -> Vec<GameEvent> {
        let total = match self.player_mut(player) {
            Some(p) => p.award(points),
            None => return Vec::new(),
        };

        let mut events = vec![GameEvent::PointsAwarded {
            player,
            points,
            total,
        }];

        if is_winning(total) {
            events.extend(self.declare_winner(player, delay_ms));
        } else {
            events.extend(self.schedule(TransitionKind::EndRound, delay_ms));
        }
        events
    }

    /// The win condition was just reached
    fn declare_winner(&mut self, player: PlayerId, delay_ms: u64) -> Vec<GameEvent> {
        let score = self.score(player);
        if self.config.is_solo() {
            self.solo_stats.record_win(self.rounds_played);
        }
        info!(player, score, rounds_played = self.rounds_played, "Game won");

        let mut events = vec![GameEvent::GameWon { player, score }];
        events.extend(self.schedule(TransitionKind::FinishGame { winner: player }, delay_ms));
        events
    }

    /// Drop the round and pass the turn on
    fn end_round(&mut self) -> Vec<GameEvent> {
        let player = self.current_player;
        let count = self.player_count().max(1) as PlayerId;
        let next_player = (player + 1) % count;

        self.current_player = next_player;
        self.round = None;
        self.message.clear();
        self.phase = GamePhase::Setup;
        self.sync_turn_flags();

        info!(player, next_player, "Round ended");
        vec![GameEvent::RoundEnded {
            player,
            next_player,
        }]
    }

    fn sync_turn_flags(&mut self) {
        let current = self.current_player;
        for player in &mut self.players {
            player.is_current_turn = player.id == current;
        }
    }

    /// Put a known secret in play (tests only)
    #[cfg(test)]
    pub(crate) fn force_round(&mut self, secret: &str) {
        let secret: Digits = secret.parse().expect("valid test secret");
        self.begin_round(secret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameMode;
    use pretty_assertions::assert_eq;

    fn engine(config: GameConfig) -> GameEngine {
        let mut game = GameEngine::with_seed(11).with_timing(Timing::instant());
        game.start_game(config).unwrap();
        game
    }

    /// Start a round and swap in a known secret
    fn round_with_secret(game: &mut GameEngine, secret: &str) {
        game.start_round().unwrap();
        game.force_round(secret);
    }

    #[test]
    fn test_new_engine_starts_in_menu() {
        let game = GameEngine::with_seed(1);
        assert_eq!(game.phase(), &GamePhase::Menu);
        assert!(game.players().is_empty());
        assert_eq!(
            game.valid_actions(),
            vec![ActionKind::SetPlayerNames, ActionKind::StartGame]
        );
    }

    #[test]
    fn test_start_game_seats_players() {
        let game = engine(GameConfig::new(3));
        assert_eq!(game.phase(), &GamePhase::Setup);
        assert_eq!(game.player_count(), 3);
        assert!(game.players()[0].is_current_turn);
        assert!(!game.players()[1].is_current_turn);
    }

    #[test]
    fn test_start_game_rejects_bad_config() {
        let mut game = GameEngine::with_seed(1);
        assert_eq!(
            game.start_game(GameConfig::new(5)),
            Err(GameError::InvalidConfig(ConfigError::PlayerCount(5)))
        );
        assert_eq!(game.phase(), &GamePhase::Menu);
    }

    #[test]
    fn test_start_game_only_from_menu() {
        let mut game = engine(GameConfig::new(2));
        assert_eq!(
            game.start_game(GameConfig::new(2)),
            Err(GameError::InvalidPhase)
        );
    }

    #[test]
    fn test_lottery_win_ends_game() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");

        let events = game.submit_guess("371").unwrap();
        assert!(events.contains(&GameEvent::LotteryWin { player: 0 }));
        assert_eq!(game.score(0), 100);
        assert_eq!(game.winner(), Some(0));
        assert!(game.round().is_none());
    }

    #[test]
    fn test_three_matches_moves_to_arrangement() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");

        let events = game.submit_guess("713").unwrap();
        assert!(events.contains(&GameEvent::DigitsFound {
            player: 0,
            points: 50
        }));
        assert_eq!(game.phase(), &GamePhase::Arrangement);

        let round = game.round().unwrap();
        assert_eq!(round.found_digits, Some("713".parse().unwrap()));
        assert_eq!(round.round_score, 50);
        assert_eq!(round.guesses_remaining, 4);
        // not banked until the arrangement resolves
        assert_eq!(game.score(0), 0);
    }

    #[test]
    fn test_finding_points_by_guess_number() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");

        game.submit_guess("245").unwrap();
        game.submit_guess("345").unwrap();
        let events = game.submit_guess("137").unwrap();
        assert!(events.contains(&GameEvent::DigitsFound {
            player: 0,
            points: 30
        }));
    }

    #[test]
    fn test_fifth_guess_finds_for_ten() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");

        for guess in ["245", "246", "248", "249"] {
            game.submit_guess(guess).unwrap();
        }
        let events = game.submit_guess("173").unwrap();
        assert!(events.contains(&GameEvent::DigitsFound {
            player: 0,
            points: 10
        }));
    }

    #[test]
    fn test_arrangement_first_try_bonus() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");
        game.submit_guess("713").unwrap();

        let events = game.submit_arrangement("371").unwrap();
        assert!(events.contains(&GameEvent::PointsAwarded {
            player: 0,
            points: 60,
            total: 60
        }));
        assert_eq!(game.phase(), &GamePhase::Setup);
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_arrangement_second_try_bonus() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");
        game.submit_guess("713").unwrap();

        game.submit_arrangement("713").unwrap();
        assert_eq!(game.message(), "Wrong order. One more try!");
        assert_eq!(game.phase(), &GamePhase::Arrangement);

        game.submit_arrangement("371").unwrap();
        assert_eq!(game.score(0), 55);
    }

    #[test]
    fn test_arrangement_exhausted_pays_finding_reward() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");
        game.submit_guess("245").unwrap();
        game.submit_guess("713").unwrap();

        game.submit_arrangement("713").unwrap();
        let events = game.submit_arrangement("137").unwrap();
        assert!(events.contains(&GameEvent::PointsAwarded {
            player: 0,
            points: 40,
            total: 40
        }));
        assert_eq!(game.phase(), &GamePhase::Setup);
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_consolation_uses_best_match_count() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");

        for guess in ["245", "175", "245", "345"] {
            game.submit_guess(guess).unwrap();
        }
        let events = game.submit_guess("245").unwrap();
        assert!(events.contains(&GameEvent::PointsAwarded {
            player: 0,
            points: 5,
            total: 5
        }));
        assert_eq!(game.phase(), &GamePhase::Setup);
    }

    #[test]
    fn test_consolation_counts_final_guess() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");

        for guess in ["245", "246", "248", "249"] {
            game.submit_guess(guess).unwrap();
        }
        game.submit_guess("178").unwrap();
        assert_eq!(game.score(0), 5);
    }

    #[test]
    fn test_double_points_doubles_consolation_only() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");
        game.round.as_mut().unwrap().multiplier = 2;

        for guess in ["175", "245", "245", "245", "245"] {
            game.submit_guess(guess).unwrap();
        }
        assert_eq!(game.score(0), 10);
        assert!(game.message().ends_with("(doubled!)!"));
    }

    #[test]
    fn test_double_points_leaves_arrangement_bonus() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");
        game.round.as_mut().unwrap().multiplier = 2;

        game.submit_guess("713").unwrap();
        game.submit_arrangement("371").unwrap();
        assert_eq!(game.score(0), 110);
        assert_eq!(game.winner(), Some(0));
    }

    #[test]
    fn test_invalid_guess_leaves_state_unchanged() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");

        assert_eq!(
            game.submit_guess("334"),
            Err(GameError::InvalidDigits(DigitError::Duplicate(3)))
        );
        assert_eq!(
            game.submit_guess("3a4"),
            Err(GameError::InvalidDigits(DigitError::NotADigit('a')))
        );
        let round = game.round().unwrap();
        assert_eq!(round.guesses_remaining, 5);
        assert!(round.history().is_empty());
    }

    #[test]
    fn test_guess_in_wrong_phase() {
        let mut game = engine(GameConfig::new(2));
        assert_eq!(game.submit_guess("123"), Err(GameError::InvalidPhase));
        assert_eq!(game.submit_arrangement("123"), Err(GameError::InvalidPhase));
    }

    #[test]
    fn test_manual_entry_by_previous_player() {
        let mut game = engine(GameConfig::new(3).with_mode(GameMode::Manual));

        let events = game.start_round().unwrap();
        assert!(events.contains(&GameEvent::SecretRequested {
            setter: 2,
            guesser: 0
        }));
        assert_eq!(game.phase(), &GamePhase::ManualEntry { setter: 2 });

        assert_eq!(
            game.submit_secret("112"),
            Err(GameError::InvalidDigits(DigitError::Duplicate(1)))
        );
        assert_eq!(game.phase(), &GamePhase::ManualEntry { setter: 2 });

        game.submit_secret("594").unwrap();
        assert_eq!(game.phase(), &GamePhase::Playing);
        assert_eq!(game.round().unwrap().secret().to_string(), "594");
    }

    #[test]
    fn test_solo_never_uses_manual_entry() {
        let mut game = engine(GameConfig::solo().with_mode(GameMode::Manual));
        game.start_round().unwrap();
        assert_eq!(game.phase(), &GamePhase::Playing);
        assert_eq!(game.rounds_played(), 1);
    }

    #[test]
    fn test_solo_win_records_stats() {
        let mut game = engine(GameConfig::solo());
        round_with_secret(&mut game, "371");
        game.submit_guess("371").unwrap();

        assert_eq!(
            game.solo_stats(),
            &SoloStats {
                games_won: 1,
                best_rounds: Some(1),
                current_streak: 1,
                best_streak: 1,
            }
        );
    }

    #[test]
    fn test_reset_clears_game_but_keeps_stats() {
        let mut game = engine(GameConfig::solo());
        game.set_player_names(vec!["Ana".into()]);
        round_with_secret(&mut game, "371");
        game.submit_guess("371").unwrap();

        game.reset_game().unwrap();
        assert_eq!(game.phase(), &GamePhase::Menu);
        assert!(game.players().is_empty());
        assert_eq!(game.rounds_played(), 0);
        assert_eq!(game.display_name(0), "You");
        assert_eq!(game.solo_stats().games_won, 1);

        assert_eq!(game.reset_game(), Err(GameError::InvalidPhase));
    }

    #[test]
    fn test_wildcard_consumed_on_first_guess() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");
        game.round.as_mut().unwrap().active_power_up = Some(PowerUpId::Wildcard);

        let events = game.submit_guess("745").unwrap();
        assert!(events.contains(&GameEvent::GuessEvaluated {
            player: 0,
            guess: "745".parse().unwrap(),
            matches: 1,
            hint: Some(powerup::WildcardHint::Matched(7)),
        }));
        assert_eq!(game.message(), "1 right (7)");
        assert_eq!(game.round().unwrap().active_power_up, None);

        let events = game.submit_guess("345").unwrap();
        assert!(events.contains(&GameEvent::GuessEvaluated {
            player: 0,
            guess: "345".parse().unwrap(),
            matches: 1,
            hint: None,
        }));
    }

    #[test]
    fn test_wildcard_not_used_after_first_guess() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");
        game.submit_guess("245").unwrap();
        game.round.as_mut().unwrap().active_power_up = Some(PowerUpId::Wildcard);

        game.submit_guess("745").unwrap();
        assert_eq!(game.message(), "1 right");
        assert_eq!(
            game.round().unwrap().active_power_up,
            Some(PowerUpId::Wildcard)
        );
    }

    #[test]
    fn test_wildcard_cleared_on_three_matches() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");
        game.round.as_mut().unwrap().active_power_up = Some(PowerUpId::Wildcard);

        game.submit_guess("137").unwrap();
        let round = game.round().unwrap();
        assert_eq!(round.active_power_up, None);
        assert_eq!(round.history()[0].feedback, "3 right");
    }

    #[test]
    fn test_hidden_history_feedback() {
        let mut game = engine(GameConfig::new(2));
        round_with_secret(&mut game, "371");
        game.round.as_mut().unwrap().hide_history = true;

        game.submit_guess("345").unwrap();
        assert_eq!(game.message(), "1 right (history hidden - remember this!)");
        assert!(game.round().unwrap().visible_history().is_empty());
    }

    #[test]
    fn test_valid_actions_follow_phase() {
        let mut game = engine(GameConfig::new(2));
        assert!(game.valid_actions().contains(&ActionKind::StartRound));

        round_with_secret(&mut game, "371");
        assert!(game.valid_actions().contains(&ActionKind::SubmitGuess));
        assert!(!game.valid_actions().contains(&ActionKind::SubmitArrangement));

        game.submit_guess("713").unwrap();
        assert!(game.valid_actions().contains(&ActionKind::SubmitArrangement));
    }
}
