//! TSV resolution engine
//!
//! Pure scoring functions turning a staged play plus battlefield state into
//! a Turn Strength Value. The only randomness is the attunement roll, drawn
//! exactly once per lock; previews never roll.

use crate::core::{CardKind, CardStore, Element, Rarity, Seat};
use crate::game::{Battlefield, Staging};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configurable rule variants
///
/// Source revisions disagree on how item element synergy stacks; the
/// canonical rule applies both bonuses independently, but each can be
/// switched off to reproduce an older ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFlags {
    /// +1 per staged item whose element matches the spell's element
    pub item_spell_synergy: bool,
    /// +1 per staged item whose element matches the effective field's element
    pub item_field_synergy: bool,
}

impl Default for RuleFlags {
    fn default() -> Self {
        RuleFlags {
            item_spell_synergy: true,
            item_field_synergy: true,
        }
    }
}

/// Outcome of the once-per-turn attunement roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttunementRoll {
    /// The d8 roll, in [1, 8]
    pub roll: u8,
    /// Rarity-indexed difficulty the roll must meet or exceed
    pub difficulty: u8,
    /// Rarity-indexed bonus granted on success
    pub bonus: i32,
    pub succeeded: bool,
}

impl AttunementRoll {
    /// Bonus actually added to the TSV (0 on a failed roll)
    pub fn applied_bonus(&self) -> i32 {
        if self.succeeded {
            self.bonus
        } else {
            0
        }
    }
}

/// A fully resolved turn value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Final TSV, attunement included
    pub value: i32,
    /// None when no spell was staged (scoreless play, no roll attempted)
    pub attunement: Option<AttunementRoll>,
}

fn attunement_difficulty(rarity: Rarity) -> u8 {
    match rarity {
        Rarity::Common => 3,
        Rarity::Uncommon => 5,
        Rarity::Rare => 6,
        Rarity::Mythic => 7,
    }
}

fn attunement_bonus(rarity: Rarity) -> i32 {
    match rarity {
        Rarity::Common => 1,
        Rarity::Uncommon => 2,
        Rarity::Rare => 3,
        Rarity::Mythic => 5,
    }
}

/// Judge a given d8 roll against the rarity table
///
/// Split out from [`resolve`] so the roll-to-bonus mapping is testable
/// without an RNG.
pub fn attune(rarity: Rarity, roll: u8) -> AttunementRoll {
    let difficulty = attunement_difficulty(rarity);
    let bonus = attunement_bonus(rarity);
    AttunementRoll {
        roll,
        difficulty,
        bonus,
        succeeded: roll >= difficulty,
    }
}

/// Compute a play's TSV without the attunement roll
///
/// Safe to call any number of times before lock: it reads state and rolls
/// nothing. Steps, all additive:
/// 1. no staged spell resolves to 0, whatever else is staged
/// 2. spell base value
/// 3. spell affinity keyed by the effective field (staged, else persisted)
/// 4. per item: modifier plus element synergy bonuses per the rule flags
/// 5. aura of every active, un-bursted summon on the acting side
pub fn preview(
    staging: &Staging,
    battlefield: &Battlefield,
    seat: Seat,
    cards: &CardStore,
    rules: &RuleFlags,
) -> i32 {
    let Some(spell_id) = staging.spell else {
        return 0;
    };
    let Ok(spell) = cards.get(spell_id) else {
        return 0;
    };
    let CardKind::Spell {
        base_value,
        affinity,
    } = &spell.kind
    else {
        return 0;
    };

    let mut total = *base_value;

    // The staged field takes precedence over the persisted one
    let field_element: Option<Element> = staging
        .field
        .or(battlefield.active_field)
        .and_then(|id| cards.get(id).ok())
        .map(|card| card.element);

    if let Some(element) = field_element {
        total += affinity.get(element);
    }

    for &item_id in &staging.items {
        let Ok(item) = cards.get(item_id) else {
            continue;
        };
        let CardKind::Item { modifier, .. } = &item.kind else {
            continue;
        };
        // Negative modifiers are permitted and not floored
        total += *modifier;
        if rules.item_spell_synergy && item.element == spell.element {
            total += 1;
        }
        if rules.item_field_synergy && Some(item.element) == field_element {
            total += 1;
        }
    }

    for summon in battlefield.summons(seat) {
        if summon.burst_used {
            continue;
        }
        if let Ok(card) = cards.get(summon.card_id) {
            if let CardKind::Summon { aura_bonus, .. } = card.kind {
                total += aura_bonus;
            }
        }
    }

    total
}

/// Resolve a play's final TSV, attunement included
///
/// Draws the single d8 attunement roll, so this must be called exactly
/// once per lock. A spell-less play resolves to 0 with no roll.
pub fn resolve(
    staging: &Staging,
    battlefield: &Battlefield,
    seat: Seat,
    cards: &CardStore,
    rules: &RuleFlags,
    rng: &mut impl Rng,
) -> Resolution {
    let value = preview(staging, battlefield, seat, cards, rules);

    let rarity = staging
        .spell
        .and_then(|id| cards.get(id).ok())
        .map(|spell| spell.rarity);

    match rarity {
        Some(rarity) => {
            let attunement = attune(rarity, rng.gen_range(1..=8));
            Resolution {
                value: value + attunement.applied_bonus(),
                attunement: Some(attunement),
            }
        }
        None => Resolution {
            value: 0,
            attunement: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardId, CardName, ElementTable};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn add_card(cards: &mut CardStore, element: Element, rarity: Rarity, kind: CardKind) -> CardId {
        let id = cards.next_id();
        cards.insert(
            id,
            Card {
                id,
                name: CardName::new(format!("card-{id}")),
                element,
                rarity,
                kind,
                owner: Seat::Player,
            },
        );
        id
    }

    fn fire_spell(cards: &mut CardStore, base: i32, fire_affinity: i32) -> CardId {
        add_card(
            cards,
            Element::Fire,
            Rarity::Common,
            CardKind::Spell {
                base_value: base,
                affinity: ElementTable {
                    fire: fire_affinity,
                    ..Default::default()
                },
            },
        )
    }

    fn item(cards: &mut CardStore, element: Element, modifier: i32) -> CardId {
        add_card(
            cards,
            element,
            Rarity::Common,
            CardKind::Item {
                modifier,
                synergy_text: String::new(),
            },
        )
    }

    fn field(cards: &mut CardStore, element: Element) -> CardId {
        add_card(
            cards,
            element,
            Rarity::Common,
            CardKind::Field {
                effect_text: String::new(),
                duration_text: String::new(),
            },
        )
    }

    #[test]
    fn test_no_spell_resolves_to_zero() {
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let rules = RuleFlags::default();
        let mut staging = Staging::new();
        staging.items.push(item(&mut cards, Element::Fire, 3));
        staging.items.push(item(&mut cards, Element::Water, 2));
        staging.field = Some(field(&mut cards, Element::Fire));

        assert_eq!(preview(&staging, &bf, Seat::Player, &cards, &rules), 0);

        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let res = resolve(&staging, &bf, Seat::Player, &cards, &rules, &mut rng);
        assert_eq!(res.value, 0);
        assert!(res.attunement.is_none());
    }

    #[test]
    fn test_canonical_scenario() {
        // Spell{base=3, affinityFire=2, Fire} + Field{Fire} + Item{+1, Fire}
        // = 3 + 2 + 1 + 1 (spell synergy) + 1 (field synergy) = 8
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let rules = RuleFlags::default();
        let mut staging = Staging::new();
        staging.spell = Some(fire_spell(&mut cards, 3, 2));
        staging.field = Some(field(&mut cards, Element::Fire));
        staging.items.push(item(&mut cards, Element::Fire, 1));

        assert_eq!(preview(&staging, &bf, Seat::Player, &cards, &rules), 8);
    }

    #[test]
    fn test_synergy_flags_are_independent() {
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let mut staging = Staging::new();
        staging.spell = Some(fire_spell(&mut cards, 3, 0));
        staging.field = Some(field(&mut cards, Element::Fire));
        staging.items.push(item(&mut cards, Element::Fire, 0));

        let both = RuleFlags::default();
        let spell_only = RuleFlags {
            item_field_synergy: false,
            ..Default::default()
        };
        let neither = RuleFlags {
            item_spell_synergy: false,
            item_field_synergy: false,
        };

        assert_eq!(preview(&staging, &bf, Seat::Player, &cards, &both), 5);
        assert_eq!(preview(&staging, &bf, Seat::Player, &cards, &spell_only), 4);
        assert_eq!(preview(&staging, &bf, Seat::Player, &cards, &neither), 3);
    }

    #[test]
    fn test_persisted_field_used_when_none_staged() {
        let mut cards = CardStore::new();
        let mut bf = Battlefield::new();
        let rules = RuleFlags::default();
        bf.active_field = Some(field(&mut cards, Element::Fire));

        let mut staging = Staging::new();
        staging.spell = Some(fire_spell(&mut cards, 3, 2));

        assert_eq!(preview(&staging, &bf, Seat::Player, &cards, &rules), 5);
    }

    #[test]
    fn test_staged_field_overrides_persisted() {
        let mut cards = CardStore::new();
        let mut bf = Battlefield::new();
        let rules = RuleFlags::default();
        bf.active_field = Some(field(&mut cards, Element::Fire));

        let mut staging = Staging::new();
        staging.spell = Some(fire_spell(&mut cards, 3, 2));
        staging.field = Some(field(&mut cards, Element::Water));

        // Water field: no fire affinity applies
        assert_eq!(preview(&staging, &bf, Seat::Player, &cards, &rules), 3);
    }

    #[test]
    fn test_negative_modifier_not_floored() {
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let rules = RuleFlags::default();
        let mut staging = Staging::new();
        staging.spell = Some(fire_spell(&mut cards, 1, 0));
        staging.items.push(item(&mut cards, Element::Water, -4));

        assert_eq!(preview(&staging, &bf, Seat::Player, &cards, &rules), -3);
    }

    #[test]
    fn test_only_acting_side_auras_count() {
        let mut cards = CardStore::new();
        let mut bf = Battlefield::new();
        let rules = RuleFlags::default();

        let mine = add_card(
            &mut cards,
            Element::Earth,
            Rarity::Common,
            CardKind::Summon {
                threshold: 0,
                aura_bonus: 2,
                burst_text: String::new(),
            },
        );
        let theirs = add_card(
            &mut cards,
            Element::Air,
            Rarity::Common,
            CardKind::Summon {
                threshold: 0,
                aura_bonus: 7,
                burst_text: String::new(),
            },
        );
        bf.add_summon(Seat::Player, mine);
        bf.add_summon(Seat::Opponent, theirs);

        let mut staging = Staging::new();
        staging.spell = Some(fire_spell(&mut cards, 3, 0));

        assert_eq!(preview(&staging, &bf, Seat::Player, &cards, &rules), 5);
        assert_eq!(preview(&staging, &bf, Seat::Opponent, &cards, &rules), 10);
    }

    #[test]
    fn test_attunement_table() {
        // Mythic needs a 7; the bonus is +5 exactly once
        let hit = attune(Rarity::Mythic, 7);
        assert!(hit.succeeded);
        assert_eq!(hit.applied_bonus(), 5);

        let miss = attune(Rarity::Mythic, 6);
        assert!(!miss.succeeded);
        assert_eq!(miss.applied_bonus(), 0);

        assert_eq!(attune(Rarity::Common, 3).applied_bonus(), 1);
        assert_eq!(attune(Rarity::Common, 2).applied_bonus(), 0);
        assert_eq!(attune(Rarity::Uncommon, 5).applied_bonus(), 2);
        assert_eq!(attune(Rarity::Rare, 8).applied_bonus(), 3);
    }

    #[test]
    fn test_resolve_is_preview_plus_attunement() {
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let rules = RuleFlags::default();
        let mut staging = Staging::new();
        staging.spell = Some(fire_spell(&mut cards, 3, 0));

        // Preview is roll-free: any number of calls returns the same value
        let p1 = preview(&staging, &bf, Seat::Player, &cards, &rules);
        let p2 = preview(&staging, &bf, Seat::Player, &cards, &rules);
        assert_eq!(p1, p2);

        let mut rng = ChaCha12Rng::seed_from_u64(42);
        let res = resolve(&staging, &bf, Seat::Player, &cards, &rules, &mut rng);
        let attunement = res.attunement.expect("spell staged, roll attempted");
        assert!((1..=8).contains(&attunement.roll));
        assert_eq!(res.value, p1 + attunement.applied_bonus());
    }

    #[test]
    fn test_item_order_irrelevant() {
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let rules = RuleFlags::default();
        let spell = fire_spell(&mut cards, 3, 0);
        let a = item(&mut cards, Element::Fire, 2);
        let b = item(&mut cards, Element::Water, -1);

        let mut forward = Staging::new();
        forward.spell = Some(spell);
        forward.items.extend([a, b]);

        let mut reversed = Staging::new();
        reversed.spell = Some(spell);
        reversed.items.extend([b, a]);

        assert_eq!(
            preview(&forward, &bf, Seat::Player, &cards, &rules),
            preview(&reversed, &bf, Seat::Player, &cards, &rules)
        );
    }
}
