//! Delayed follow-up transitions.
//!
//! Results are shown for a while before the game moves on: the picked card
//! before its power-up is revealed, "round over" before the next player's turn,
//! and so on. Each delay is an explicit [`ScheduledTransition`] identified by a
//! [`Ticket`]. The engine keeps at most one pending; scheduling another replaces
//! it, and firing a ticket that is no longer pending does nothing.

use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Identifies one scheduled transition. Tickets are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ticket(pub u64);

/// What happens when a scheduled transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransitionKind {
    /// Resolve the picked card into a power-up
    RevealPowerUp,
    /// Leave the power-up screen and start guessing
    BeginPlaying,
    /// Forfeit the turn drawn by the skip-turn card
    SkipTurn,
    /// Drop transient guess feedback
    ClearMessage,
    /// Pass the turn to the next player
    EndRound,
    /// Enter the game over screen
    FinishGame { winner: PlayerId },
}

impl TransitionKind {
    /// Whether round actions must wait for this transition
    pub fn blocks_input(self) -> bool {
        !matches!(self, TransitionKind::ClearMessage)
    }
}

/// A pending transition as reported to front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTransition {
    pub ticket: Ticket,
    pub kind: TransitionKind,
    pub delay_ms: u64,
}

#[derive(Debug, Clone)]
struct Pending {
    transition: ScheduledTransition,
    remaining_ms: u64,
}

/// Holds the single pending transition
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    next_ticket: u64,
    pending: Option<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a transition, replacing any pending one
    pub fn schedule(&mut self, kind: TransitionKind, delay_ms: u64) -> ScheduledTransition {
        self.next_ticket += 1;
        let transition = ScheduledTransition {
            ticket: Ticket(self.next_ticket),
            kind,
            delay_ms,
        };
        self.pending = Some(Pending {
            transition,
            remaining_ms: delay_ms,
        });
        transition
    }

    /// Drop the pending transition, if any
    pub fn cancel(&mut self) -> Option<ScheduledTransition> {
        self.pending.take().map(|p| p.transition)
    }

    pub fn pending(&self) -> Option<&ScheduledTransition> {
        self.pending.as_ref().map(|p| &p.transition)
    }

    /// Time left before the pending transition is due
    pub fn remaining_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.remaining_ms)
    }

    pub fn is_blocking(&self) -> bool {
        self.pending().is_some_and(|t| t.kind.blocks_input())
    }

    /// Remove and return the pending transition if `ticket` still names it
    pub fn take(&mut self, ticket: Ticket) -> Option<TransitionKind> {
        if self.pending.as_ref().is_some_and(|p| p.transition.ticket == ticket) {
            self.pending.take().map(|p| p.transition.kind)
        } else {
            None
        }
    }

    /// Count down the pending delay.
    ///
    /// Returns the due ticket and the unused part of `elapsed_ms` once the
    /// delay has run out. The transition stays pending until taken.
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<(Ticket, u64)> {
        let pending = self.pending.as_mut()?;
        if elapsed_ms >= pending.remaining_ms {
            let leftover = elapsed_ms - pending.remaining_ms;
            pending.remaining_ms = 0;
            Some((pending.transition.ticket, leftover))
        } else {
            pending.remaining_ms -= elapsed_ms;
            None
        }
    }
}
