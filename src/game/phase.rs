//! Turn controller phases

use crate::core::Seat;
use serde::{Deserialize, Serialize};

/// States of the turn controller
///
/// The match alternates strictly: a seat stages, locks, and hands over.
/// `RoundAdvance` is the rest between a resolved chain and the next staging
/// phase; the match stays there until `advance_round` is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No match running yet (or after a reset)
    AwaitingStart,

    /// The given seat is staging cards; stage/unstage are legal
    Staging(Seat),

    /// The given seat's play is being resolved; no staging allowed
    Locked(Seat),

    /// A chain just ended; the given seat won it and opens the next one
    RoundAdvance(Seat),
}

impl TurnPhase {
    /// True if the given seat may stage or unstage right now
    pub fn is_staging(&self, seat: Seat) -> bool {
        matches!(self, TurnPhase::Staging(s) if *s == seat)
    }

    pub fn is_running(&self) -> bool {
        !matches!(self, TurnPhase::AwaitingStart)
    }

    /// The seat currently staging, if any
    pub fn staging_seat(&self) -> Option<Seat> {
        match self {
            TurnPhase::Staging(seat) => Some(*seat),
            _ => None,
        }
    }
}
