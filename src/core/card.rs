//! Card types and definitions

use crate::core::{CardId, CardName, Seat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The elements of Mage Craft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Air,
    Earth,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Air, Element::Earth];
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Fire => write!(f, "Fire"),
            Element::Water => write!(f, "Water"),
            Element::Air => write!(f, "Air"),
            Element::Earth => write!(f, "Earth"),
        }
    }
}

/// Card rarity, consulted only by the attunement roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "Common"),
            Rarity::Uncommon => write!(f, "Uncommon"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Mythic => write!(f, "Mythic"),
        }
    }
}

/// Per-element integer table, used for spell affinity bonuses
///
/// Missing entries in the catalog default to 0, so a spell with no
/// affinity for the active field contributes nothing extra.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementTable {
    pub fire: i32,
    pub water: i32,
    pub air: i32,
    pub earth: i32,
}

impl ElementTable {
    pub fn get(&self, element: Element) -> i32 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Air => self.air,
            Element::Earth => self.earth,
        }
    }
}

/// Card category labels (the variant tags of [`CardKind`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Spell,
    Item,
    Field,
    Summon,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Spell => write!(f, "Spell"),
            Category::Item => write!(f, "Item"),
            Category::Field => write!(f, "Field"),
            Category::Summon => write!(f, "Summon"),
        }
    }
}

/// Category-specific card data
///
/// Each variant carries only the fields its category uses; the resolution
/// engine pattern-matches exhaustively instead of probing optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardKind {
    /// The scoring card: a turn with no spell resolves to 0
    Spell {
        base_value: i32,
        /// Bonus added when the effective field matches the keyed element
        affinity: ElementTable,
    },
    /// Flat modifier plus element-synergy bonuses (text is display-only)
    Item { modifier: i32, synergy_text: String },
    /// Only the element matters to the engine; texts are display-only
    Field {
        effect_text: String,
        duration_text: String,
    },
    /// Threshold-gated permanent with an aura bonus and a one-shot burst
    Summon {
        threshold: u32,
        aura_bonus: i32,
        burst_text: String,
    },
}

impl CardKind {
    pub fn category(&self) -> Category {
        match self {
            CardKind::Spell { .. } => Category::Spell,
            CardKind::Item { .. } => Category::Item,
            CardKind::Field { .. } => Category::Field,
            CardKind::Summon { .. } => Category::Summon,
        }
    }
}

/// A card instance during a match
///
/// Catalog cards are templates; every copy in a deck becomes its own
/// instance with a unique CardId and an owning seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID for this card instance
    pub id: CardId,

    /// Card name (unique within the catalog)
    pub name: CardName,

    /// Exactly one element per card
    pub element: Element,

    /// Rarity, consulted by the attunement roll
    pub rarity: Rarity,

    /// Category-specific data
    pub kind: CardKind,

    /// The seat this copy belongs to
    pub owner: Seat,
}

impl Card {
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn is_spell(&self) -> bool {
        matches!(self.kind, CardKind::Spell { .. })
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, CardKind::Item { .. })
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, CardKind::Field { .. })
    }

    pub fn is_summon(&self) -> bool {
        matches!(self.kind, CardKind::Summon { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_table_lookup() {
        let table = ElementTable {
            fire: 2,
            water: -1,
            ..Default::default()
        };
        assert_eq!(table.get(Element::Fire), 2);
        assert_eq!(table.get(Element::Water), -1);
        assert_eq!(table.get(Element::Air), 0);
        assert_eq!(table.get(Element::Earth), 0);
    }

    #[test]
    fn test_card_category() {
        let card = Card {
            id: CardId::new(1),
            name: CardName::new("Ember Lance"),
            element: Element::Fire,
            rarity: Rarity::Common,
            kind: CardKind::Spell {
                base_value: 3,
                affinity: ElementTable::default(),
            },
            owner: Seat::Player,
        };

        assert!(card.is_spell());
        assert!(!card.is_summon());
        assert_eq!(card.category(), Category::Spell);
        assert_eq!(card.category().to_string(), "Spell");
    }
}
