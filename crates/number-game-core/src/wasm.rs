//! WebAssembly bindings for the Number Game engine.
//!
//! Structured values cross the boundary as JSON strings. Every call that
//! changes state returns the resulting events; a `transitionScheduled` event
//! carries the ticket to pass back to `fire` once its delay has elapsed.

use wasm_bindgen::prelude::*;

use crate::actions::{GameAction, GameEvent};
use crate::config::GameConfig;
use crate::game::{GameEngine, GameError};
use crate::schedule::Ticket;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn events_json(events: &[GameEvent]) -> String {
    serde_json::to_string(events).unwrap_or_else(|_| "[]".to_string())
}

fn to_js(result: Result<Vec<GameEvent>, GameError>) -> Result<String, JsValue> {
    match result {
        Ok(events) => Ok(events_json(&events)),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    engine: GameEngine,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create an engine on the menu
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            engine: GameEngine::new(),
        }
    }

    /// Create an engine with a fixed seed
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u64) -> WasmGame {
        WasmGame {
            engine: GameEngine::with_seed(seed),
        }
    }

    /// Start a game from a config JSON, e.g. `{"playerCount":2,"mode":"manual"}`
    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self, config_json: &str) -> Result<String, JsValue> {
        let config: GameConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        to_js(self.engine.start_game(config))
    }

    /// Set names from a JSON array of strings
    #[wasm_bindgen(js_name = setPlayerNames)]
    pub fn set_player_names(&mut self, names_json: &str) -> Result<String, JsValue> {
        let names: Vec<String> = serde_json::from_str(names_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid player names: {}", e)))?;
        Ok(events_json(&self.engine.set_player_names(names)))
    }

    #[wasm_bindgen(js_name = startRound)]
    pub fn start_round(&mut self) -> Result<String, JsValue> {
        to_js(self.engine.start_round())
    }

    #[wasm_bindgen(js_name = submitSecret)]
    pub fn submit_secret(&mut self, input: &str) -> Result<String, JsValue> {
        to_js(self.engine.submit_secret(input))
    }

    #[wasm_bindgen(js_name = drawPowerUpCard)]
    pub fn draw_power_up_card(&mut self, card: usize) -> Result<String, JsValue> {
        to_js(self.engine.draw_power_up_card(card))
    }

    #[wasm_bindgen(js_name = submitGuess)]
    pub fn submit_guess(&mut self, input: &str) -> Result<String, JsValue> {
        to_js(self.engine.submit_guess(input))
    }

    #[wasm_bindgen(js_name = submitArrangement)]
    pub fn submit_arrangement(&mut self, input: &str) -> Result<String, JsValue> {
        to_js(self.engine.submit_arrangement(input))
    }

    #[wasm_bindgen(js_name = resetGame)]
    pub fn reset_game(&mut self) -> Result<String, JsValue> {
        to_js(self.engine.reset_game())
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;
        to_js(self.engine.apply_action(action))
    }

    /// Fire a scheduled transition; stale tickets return an empty array
    pub fn fire(&mut self, ticket: u64) -> String {
        events_json(&self.engine.fire(Ticket(ticket)))
    }

    /// Let `elapsed_ms` pass instead of tracking tickets
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, elapsed_ms: u64) -> String {
        events_json(&self.engine.advance_time(elapsed_ms))
    }

    /// Get the current view as JSON
    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> String {
        serde_json::to_string(&self.engine.view()).unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen(js_name = getSoloStats)]
    pub fn get_solo_stats(&self) -> String {
        serde_json::to_string(self.engine.solo_stats()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the accepted action kinds as JSON array
    #[wasm_bindgen(js_name = getValidActions)]
    pub fn get_valid_actions(&self) -> String {
        serde_json::to_string(&self.engine.valid_actions()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the power-up catalog as JSON array
    #[wasm_bindgen(js_name = getPowerUps)]
    pub fn get_power_ups(&self, party: bool) -> String {
        let cards: Vec<_> = crate::powerup::catalog(party).collect();
        serde_json::to_string(&cards).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }

    /// Get the winner (if game is finished)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        self.engine.winner()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
