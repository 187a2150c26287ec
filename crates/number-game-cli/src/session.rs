//! Hot-seat terminal session.
//!
//! One task owns the engine and waits on either the next stdin line or the
//! deadline of the pending transition, whichever comes first.

use crate::command::{Command, HELP};
use crate::config::Settings;
use number_game_core::powerup::CARD_COUNT;
use number_game_core::{GameEngine, GameError, GameEvent, GamePhase, GameView, Ticket};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Duration, Instant};
use tracing::{debug, info};

/// Whether to keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    engine: GameEngine,
    settings: Settings,
    /// Pending ticket and when it is due
    deadline: Option<(Ticket, Instant)>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let engine = match settings.seed {
            Some(seed) => GameEngine::with_seed(seed),
            None => GameEngine::new(),
        }
        .with_timing(settings.timing());

        Self {
            engine,
            settings,
            deadline: None,
        }
    }

    /// Parse and apply one input line, returning what to print
    pub fn handle_line(&mut self, line: &str) -> (Flow, Vec<String>) {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => return (Flow::Continue, vec![e.to_string()]),
        };
        debug!(?command, "Command");

        let result = match command {
            Command::Quit => return (Flow::Quit, vec!["Bye!".to_string()]),
            Command::Help => return (Flow::Continue, vec![HELP.to_string()]),
            Command::View => return (Flow::Continue, render(&self.engine.view())),
            Command::Json => {
                let json = serde_json::to_string_pretty(&self.engine.view())
                    .unwrap_or_else(|e| format!("! {}", e));
                return (Flow::Continue, vec![json]);
            }
            Command::Start => self.engine.start_game(self.settings.game.clone()),
            Command::Names(names) => Ok(self.engine.set_player_names(names)),
            Command::Round => self.engine.start_round(),
            Command::Card(card) if card >= CARD_COUNT => {
                return (
                    Flow::Continue,
                    vec![format!("Pick a card from 1 to {}", CARD_COUNT)],
                );
            }
            Command::Card(card) => self.engine.draw_power_up_card(card),
            Command::Digits(input) => self.submit_digits(&input),
            Command::Reset => self.engine.reset_game(),
        };

        let lines = match result {
            Ok(events) => self.describe(&events),
            Err(e) => vec![format!("! {}", e)],
        };
        (Flow::Continue, lines)
    }

    /// Route typed digits to whatever the phase is waiting for
    fn submit_digits(&mut self, input: &str) -> Result<Vec<GameEvent>, GameError> {
        match self.engine.phase() {
            GamePhase::ManualEntry { .. } => self.engine.submit_secret(input),
            GamePhase::Playing => self.engine.submit_guess(input),
            GamePhase::Arrangement => self.engine.submit_arrangement(input),
            _ => Err(GameError::InvalidPhase),
        }
    }

    /// Fire the pending transition if it is due
    pub fn fire_due(&mut self) -> Vec<String> {
        let Some((ticket, _)) = self.deadline.take() else {
            return Vec::new();
        };
        let events = self.engine.fire(ticket);
        self.describe(&events)
    }

    /// Track the deadline of whatever transition is now pending
    fn sync_deadline(&mut self) {
        self.deadline = match (self.engine.pending_transition(), self.deadline) {
            (Some(t), Some((ticket, at))) if t.ticket == ticket => Some((ticket, at)),
            (Some(t), _) => Some((t.ticket, Instant::now() + Duration::from_millis(t.delay_ms))),
            (None, _) => None,
        };
    }

    fn describe(&mut self, events: &[GameEvent]) -> Vec<String> {
        self.sync_deadline();
        let mut lines = Vec::new();

        for event in events {
            match event {
                GameEvent::GameStarted { .. } => {
                    lines.extend(render(&self.engine.view()));
                    lines.push(self.prompt());
                }
                GameEvent::SecretRequested { setter, guesser } => lines.push(format!(
                    "{}: type a secret for {} while they look away",
                    self.engine.display_name(*setter),
                    self.engine.display_name(*guesser)
                )),
                GameEvent::PowerUpRevealed { power_up, .. } => {
                    lines.push(format!("Power-up: {}", power_up.info().description));
                }
                GameEvent::PointsAwarded { player, total, .. } => lines.push(format!(
                    "{} now has {} points",
                    self.engine.display_name(*player),
                    total
                )),
                GameEvent::RoundEnded { .. } | GameEvent::GameReset => lines.push(self.prompt()),
                GameEvent::GameFinished { winner } => {
                    lines.push(format!("{} wins!", self.engine.display_name(*winner)));
                    lines.extend(render(&self.engine.view()));
                    lines.push("Type \"reset\" for a new game".to_string());
                }
                _ => {}
            }
        }

        let message = self.engine.message();
        if !message.is_empty() {
            lines.insert(0, message.to_string());
        }
        let waiting = self
            .engine
            .pending_transition()
            .is_some_and(|t| t.kind.blocks_input());
        if matches!(self.engine.phase(), GamePhase::Playing | GamePhase::Arrangement) && !waiting {
            lines.extend(render_round(&self.engine.view()));
        }
        lines
    }

    fn prompt(&self) -> String {
        let name = self.engine.display_name(self.engine.current_player());
        match self.engine.phase() {
            GamePhase::Menu => "Menu: \"names a, b\" then \"start\"".to_string(),
            GamePhase::Setup => format!("{}'s turn: type \"round\"", name),
            _ => String::new(),
        }
    }

    /// Read commands until stdin closes or the player quits
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("The Number Game. Type \"help\" for commands.");
        println!("{}", self.prompt());

        loop {
            let deadline = self.deadline.map(|(_, at)| at);
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let (flow, output) = self.handle_line(&line);
                    print_lines(&output);
                    if flow == Flow::Quit {
                        break;
                    }
                }
                _ = wait_for(deadline) => {
                    print_lines(&self.fire_due());
                }
            }
        }

        info!("Session ended");
        Ok(())
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn print_lines(lines: &[String]) {
    for line in lines.iter().filter(|l| !l.is_empty()) {
        println!("{}", line);
    }
}

/// Scoreboard lines
fn render(view: &GameView) -> Vec<String> {
    let mut lines = Vec::new();
    for player in &view.players {
        let marker = if player.is_current_turn { ">" } else { " " };
        lines.push(format!("{} {:<15} {:>3}", marker, player.name, player.score));
    }
    if view.config.is_solo() && view.solo_stats.games_won > 0 {
        let stats = &view.solo_stats;
        lines.push(format!(
            "Wins {}  best {} rounds  streak {} (best {})",
            stats.games_won,
            stats.best_rounds.unwrap_or_default(),
            stats.current_streak,
            stats.best_streak
        ));
    }
    lines.extend(render_round(view));
    lines
}

/// Budgets and visible history of the round in progress
fn render_round(view: &GameView) -> Vec<String> {
    let Some(round) = &view.round else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    if let Some(power_up) = round.active_power_up {
        lines.push(format!("Power-up: {}", power_up.name));
    }
    if let Some(revealed) = round.revealed_digit {
        lines.push(format!("Position {} is {}", revealed.position + 1, revealed.digit));
    }
    for record in &round.history {
        lines.push(format!("  {}  {}", record.digits, record.feedback));
    }
    match round.found_digits {
        Some(found) => lines.push(format!(
            "Arrange {}: {} tries left",
            found, round.arrangements_remaining
        )),
        None => lines.push(format!("{} guesses left", round.guesses_remaining)),
    }
    lines
}
