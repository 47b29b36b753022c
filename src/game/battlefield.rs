//! Persistent cross-turn battlefield state

use crate::core::{CardId, Seat};
use serde::{Deserialize, Serialize};

/// A summon on the battlefield
///
/// Stays active until its one-shot burst is spent, at which point it is
/// removed from play entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSummon {
    pub card_id: CardId,
    pub burst_used: bool,
}

impl ActiveSummon {
    pub fn new(card_id: CardId) -> Self {
        ActiveSummon {
            card_id,
            burst_used: false,
        }
    }
}

/// Persistent state shared across turns
///
/// Mutated exclusively by the turn controller at lock boundaries; staging
/// and previews only ever read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battlefield {
    /// Active field, shared by both seats; persists until replaced
    pub active_field: Option<CardId>,

    /// Active summons per seat
    summons: [Vec<ActiveSummon>; 2],

    /// Round number, monotonic, starts at 1
    pub round: u32,

    /// Threshold counter gating summon legality; increments once per lock
    pub threshold: u32,

    /// Last locked TSV, the baseline the next chained play must beat;
    /// resets to 0 when a chain ends
    pub current_tsv: i32,

    /// Victory points per seat, one awarded per won chain
    victory_points: [u32; 2],
}

impl Battlefield {
    pub fn new() -> Self {
        Battlefield {
            active_field: None,
            summons: [Vec::new(), Vec::new()],
            round: 1,
            threshold: 0,
            current_tsv: 0,
            victory_points: [0, 0],
        }
    }

    /// Victory points a seat has accumulated
    pub fn victory_points(&self, seat: Seat) -> u32 {
        self.victory_points[seat.index()]
    }

    /// Credit a seat with a won chain
    pub fn award_point(&mut self, seat: Seat) {
        self.victory_points[seat.index()] += 1;
    }

    /// Active summons on a seat's side
    pub fn summons(&self, seat: Seat) -> &[ActiveSummon] {
        &self.summons[seat.index()]
    }

    /// Add a newly played summon to a seat's side
    pub fn add_summon(&mut self, seat: Seat, card_id: CardId) {
        self.summons[seat.index()].push(ActiveSummon::new(card_id));
    }

    /// Spend a summon's one-shot burst, removing it from play
    ///
    /// Returns false if the summon is not active on that side.
    pub fn burst_summon(&mut self, seat: Seat, card_id: CardId) -> bool {
        let side = &mut self.summons[seat.index()];
        if let Some(pos) = side
            .iter()
            .position(|s| s.card_id == card_id && !s.burst_used)
        {
            // Flag before removal so the log sees a spent summon
            side[pos].burst_used = true;
            side.remove(pos);
            true
        } else {
            false
        }
    }
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::new()
    }
}
