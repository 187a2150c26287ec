//! Power-up cards.
//!
//! When power-ups are enabled, each round opens with the player picking one of
//! [`CARD_COUNT`] face-down cards. The pick is cosmetic: the power-up is drawn
//! uniformly from the enabled catalog (8 base cards, plus 5 party cards in
//! party mode). At most one power-up is active per round.

use crate::digits::{Digits, DIGIT_COUNT};
use crate::evaluate::matched_digits;
use crate::round::{RevealedDigit, Round, BASE_ARRANGEMENTS, BASE_GUESSES, MIN_GUESSES};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Face-down cards offered in the draw
pub const CARD_COUNT: usize = 5;

/// Power-up identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpId {
    #[serde(rename = "extra-guess")]
    ExtraGuess,
    #[serde(rename = "extra-arrangement")]
    ExtraArrangement,
    #[serde(rename = "lose-guess")]
    LoseGuess,
    #[serde(rename = "reveal")]
    Reveal,
    #[serde(rename = "double-points")]
    DoublePoints,
    #[serde(rename = "wildcard")]
    Wildcard,
    #[serde(rename = "skip-turn")]
    SkipTurn,
    #[serde(rename = "hide-history")]
    HideHistory,
    // Party cards: social effects only
    #[serde(rename = "chug-2")]
    Chug2,
    #[serde(rename = "chug-5")]
    Chug5,
    #[serde(rename = "finish-drink")]
    FinishDrink,
    #[serde(rename = "drink-and-guess")]
    DrinkAndGuess,
    #[serde(rename = "double-nothing")]
    DoubleNothing,
}

/// Catalog entry shown to players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerUp {
    pub id: PowerUpId,
    pub name: &'static str,
    pub description: &'static str,
}

/// Cards in every power-up game
pub const BASE_POWER_UPS: [PowerUp; 8] = [
    PowerUp {
        id: PowerUpId::ExtraGuess,
        name: "Extra Guess!",
        description: "+1 guess for finding digits",
    },
    PowerUp {
        id: PowerUpId::ExtraArrangement,
        name: "Extra Arrangement!",
        description: "+1 arrangement attempt",
    },
    PowerUp {
        id: PowerUpId::LoseGuess,
        name: "Lose a Guess!",
        description: "-1 guess (min 2)",
    },
    PowerUp {
        id: PowerUpId::Reveal,
        name: "Reveal One!",
        description: "Shows one correct digit",
    },
    PowerUp {
        id: PowerUpId::DoublePoints,
        name: "Double Points!",
        description: "2x score this round",
    },
    PowerUp {
        id: PowerUpId::Wildcard,
        name: "Wildcard!",
        description: "First guess reveals a correct digit",
    },
    PowerUp {
        id: PowerUpId::SkipTurn,
        name: "Skip Turn!",
        description: "Miss this turn entirely",
    },
    PowerUp {
        id: PowerUpId::HideHistory,
        name: "Guess History Hidden!",
        description: "Your guess history is hidden this round",
    },
];

/// Extra cards in party mode
pub const PARTY_POWER_UPS: [PowerUp; 5] = [
    PowerUp {
        id: PowerUpId::Chug2,
        name: "2-Second Chug!",
        description: "Take a 2-second drink",
    },
    PowerUp {
        id: PowerUpId::Chug5,
        name: "5-Second Chug!",
        description: "Take a 5-second drink",
    },
    PowerUp {
        id: PowerUpId::FinishDrink,
        name: "Finish Your Drink!",
        description: "Bottom's up!",
    },
    PowerUp {
        id: PowerUpId::DrinkAndGuess,
        name: "Drink & Guess!",
        description: "Sip before each guess this round",
    },
    PowerUp {
        id: PowerUpId::DoubleNothing,
        name: "Double or Nothing!",
        description: "Win = assign 2 drinks, Lose = take 2",
    },
];

/// Cards a draw picks from
pub fn catalog(party: bool) -> impl Iterator<Item = &'static PowerUp> {
    let party_cards: &'static [PowerUp] = if party { &PARTY_POWER_UPS } else { &[] };
    BASE_POWER_UPS.iter().chain(party_cards.iter())
}

/// Draw a power-up uniformly from the enabled catalog
pub fn draw<R: Rng + ?Sized>(rng: &mut R, party: bool) -> PowerUpId {
    let total = BASE_POWER_UPS.len() + if party { PARTY_POWER_UPS.len() } else { 0 };
    let index = rng.gen_range(0..total);
    match BASE_POWER_UPS.get(index) {
        Some(card) => card.id,
        None => PARTY_POWER_UPS[index - BASE_POWER_UPS.len()].id,
    }
}

impl PowerUpId {
    /// Catalog entry for this power-up
    pub fn info(self) -> &'static PowerUp {
        catalog(true)
            .find(|card| card.id == self)
            .unwrap_or(&BASE_POWER_UPS[0])
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn is_party(self) -> bool {
        PARTY_POWER_UPS.iter().any(|card| card.id == self)
    }

    /// Make this the round's power-up and apply its immediate effect.
    ///
    /// Returns the announcement to display.
    pub fn apply<R: Rng + ?Sized>(self, round: &mut Round, rng: &mut R) -> String {
        round.active_power_up = Some(self);
        let name = self.name();

        match self {
            PowerUpId::ExtraGuess => {
                round.guesses_remaining = BASE_GUESSES + 1;
                format!("{} You have {} guesses!", name, round.guesses_remaining)
            }
            PowerUpId::ExtraArrangement => {
                round.arrangements_remaining = BASE_ARRANGEMENTS + 1;
                format!(
                    "{} You have {} arrangement attempts!",
                    name, round.arrangements_remaining
                )
            }
            PowerUpId::LoseGuess => {
                round.guesses_remaining = (BASE_GUESSES - 1).max(MIN_GUESSES);
                format!("{} You only have {} guesses!", name, round.guesses_remaining)
            }
            PowerUpId::Reveal => {
                let position = rng.gen_range(0..DIGIT_COUNT);
                let digit = round.secret().get(position).unwrap_or_default();
                round.revealed_digit = Some(RevealedDigit {
                    position: position as u8,
                    digit,
                });
                format!("{} Position {} is {}!", name, position + 1, digit)
            }
            PowerUpId::DoublePoints => {
                round.multiplier = 2;
                name.to_string()
            }
            PowerUpId::SkipTurn => format!("{} Oh no! Turn skipped!", name),
            PowerUpId::HideHistory => {
                round.hide_history = true;
                format!("{} Your guess history is hidden this round!", name)
            }
            PowerUpId::Wildcard
            | PowerUpId::Chug2
            | PowerUpId::Chug5
            | PowerUpId::FinishDrink
            | PowerUpId::DrinkAndGuess
            | PowerUpId::DoubleNothing => name.to_string(),
        }
    }
}

impl fmt::Display for PowerUpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hint given by the wildcard on the round's first guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildcardHint {
    /// No guessed digit matched; this secret digit is named instead
    InSecret(u8),
    /// One of the guessed digits that matched
    Matched(u8),
}

impl fmt::Display for WildcardHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WildcardHint::InSecret(d) => write!(f, "{} is one of the numbers", d),
            WildcardHint::Matched(d) => write!(f, "{}", d),
        }
    }
}

/// Hint for a first guess. A full 3-match gets none.
pub fn wildcard_hint<R: Rng + ?Sized>(
    guess: &Digits,
    secret: &Digits,
    rng: &mut R,
) -> Option<WildcardHint> {
    let matched = matched_digits(guess, secret);
    match matched.len() {
        0 => secret
            .get(rng.gen_range(0..DIGIT_COUNT))
            .map(WildcardHint::InSecret),
        1 | 2 => matched.choose(rng).copied().map(WildcardHint::Matched),
        _ => None,
    }
}
