//! Turn-local staging area and the play-limit legality gate

use crate::core::{Card, CardId, CardKind};
use crate::game::Battlefield;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Cards committed toward the current play, before lock
///
/// Owned exclusively by the acting seat for the duration of one turn and
/// cleared at lock. Every slot move is reversible until then.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Staging {
    /// At most one spell per turn
    pub spell: Option<CardId>,

    /// At most one field change per turn
    pub field: Option<CardId>,

    /// At most two items per turn
    pub items: SmallVec<[CardId; 2]>,

    /// Zero or more summons, each gated by the threshold counter
    pub summons: SmallVec<[CardId; 2]>,
}

impl Staging {
    pub fn new() -> Self {
        Staging::default()
    }

    /// Number of cards currently staged
    pub fn count(&self) -> usize {
        usize::from(self.spell.is_some())
            + usize::from(self.field.is_some())
            + self.items.len()
            + self.summons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Check whether a specific card is staged in any slot
    pub fn contains(&self, card_id: CardId) -> bool {
        self.spell == Some(card_id)
            || self.field == Some(card_id)
            || self.items.contains(&card_id)
            || self.summons.contains(&card_id)
    }

    /// All staged card ids, slot order: spell, field, items, summons
    pub fn staged_cards(&self) -> SmallVec<[CardId; 6]> {
        let mut out = SmallVec::new();
        out.extend(self.spell);
        out.extend(self.field);
        out.extend(self.items.iter().copied());
        out.extend(self.summons.iter().copied());
        out
    }

    /// Clear all slots (at lock; staged cards are consumed, not returned)
    pub fn clear(&mut self) {
        self.spell = None;
        self.field = None;
        self.items.clear();
        self.summons.clear();
    }
}

/// Play-limit legality gate
///
/// All limits must hold simultaneously; a rejected card leaves hand and
/// staging untouched.
pub fn can_stage(card: &Card, staging: &Staging, battlefield: &Battlefield) -> bool {
    match &card.kind {
        CardKind::Spell { .. } => staging.spell.is_none(),
        CardKind::Field { .. } => staging.field.is_none(),
        CardKind::Item { .. } => staging.items.len() < 2,
        CardKind::Summon { threshold, .. } => battlefield.threshold >= *threshold,
    }
}
