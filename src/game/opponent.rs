//! Opponent decision procedure
//!
//! Brute-force best-response search over every legal staging combination,
//! scored with the same preview function the controller uses. The space is
//! bounded (|spells| x |fields| x O(|items|^2)) and hands cap at 7, so
//! exhaustive enumeration is cheap and guarantees the true optimum.

use crate::core::{CardId, CardStore, Seat};
use crate::game::{preview, Battlefield, RuleFlags, Staging};
use smallvec::SmallVec;

/// The play a seat has decided to make this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestPlay {
    pub spell: CardId,
    /// None means keep (or play under) the persisted field
    pub field: Option<CardId>,
    pub items: SmallVec<[CardId; 2]>,
    /// Threshold-met summons activated alongside the play
    pub summons: SmallVec<[CardId; 2]>,
    /// Predicted TSV, attunement excluded
    pub value: i32,
}

/// Choose the score-maximizing legal play, or None to pass
///
/// Enumeration order is fixed (spells in hand order x fields in hand order
/// with "no field" first x item combos {none, singles, index-ordered pairs})
/// and ties keep the first candidate, so the search is deterministic.
///
/// Attunement is excluded from the comparison; it is rolled once at lock,
/// after the candidate is chosen. Returns None when the hand holds no spell
/// or no candidate reaches `target` - items and fields alone never continue
/// a chain.
pub fn choose_best_play(
    hand: &[CardId],
    cards: &CardStore,
    battlefield: &Battlefield,
    seat: Seat,
    target: i32,
    rules: &RuleFlags,
) -> Option<BestPlay> {
    let spells: Vec<CardId> = filter_hand(hand, cards, |c| c.is_spell());
    if spells.is_empty() {
        return None;
    }
    let fields: Vec<CardId> = filter_hand(hand, cards, |c| c.is_field());
    let items: Vec<CardId> = filter_hand(hand, cards, |c| c.is_item());

    let mut best: Option<BestPlay> = None;
    let mut staging = Staging::new();

    for &spell in &spells {
        for field in std::iter::once(None).chain(fields.iter().copied().map(Some)) {
            for combo in item_combos(&items) {
                staging.clear();
                staging.spell = Some(spell);
                staging.field = field;
                staging.items = combo.clone();

                let value = preview(&staging, battlefield, seat, cards, rules);
                if best.as_ref().map_or(true, |b| value > b.value) {
                    best = Some(BestPlay {
                        spell,
                        field,
                        items: combo,
                        summons: SmallVec::new(),
                        value,
                    });
                }
            }
        }
    }

    let mut play = best?;
    if play.value < target {
        return None;
    }

    play.summons = eligible_summons(hand, cards, battlefield);
    Some(play)
}

/// Hand summons whose threshold is already met
///
/// Summon activation is free and independent of the spell/field/item play,
/// so the controller activates these even when the seat passes.
pub fn eligible_summons(
    hand: &[CardId],
    cards: &CardStore,
    battlefield: &Battlefield,
) -> SmallVec<[CardId; 2]> {
    hand.iter()
        .copied()
        .filter(|&id| {
            cards
                .get(id)
                .is_ok_and(|c| matches!(&c.kind, crate::core::CardKind::Summon { threshold, .. }
                    if battlefield.threshold >= *threshold))
        })
        .collect()
}

fn filter_hand(
    hand: &[CardId],
    cards: &CardStore,
    pred: impl Fn(&crate::core::Card) -> bool,
) -> Vec<CardId> {
    hand.iter()
        .copied()
        .filter(|&id| cards.get(id).is_ok_and(|c| pred(c)))
        .collect()
}

/// Item combinations in enumeration order: none, each single, each pair
/// in index order
fn item_combos(items: &[CardId]) -> Vec<SmallVec<[CardId; 2]>> {
    let mut combos: Vec<SmallVec<[CardId; 2]>> = vec![SmallVec::new()];
    for &a in items {
        combos.push(SmallVec::from_slice(&[a]));
    }
    for (i, &a) in items.iter().enumerate() {
        for &b in &items[i + 1..] {
            combos.push(SmallVec::from_slice(&[a, b]));
        }
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardKind, CardName, Element, ElementTable, Rarity};

    fn add_card(
        cards: &mut CardStore,
        element: Element,
        kind: CardKind,
    ) -> CardId {
        let id = cards.next_id();
        cards.insert(
            id,
            Card {
                id,
                name: CardName::new(format!("card-{id}")),
                element,
                rarity: Rarity::Common,
                kind,
                owner: Seat::Opponent,
            },
        );
        id
    }

    fn spell(cards: &mut CardStore, element: Element, base: i32) -> CardId {
        add_card(
            cards,
            element,
            CardKind::Spell {
                base_value: base,
                affinity: ElementTable::default(),
            },
        )
    }

    fn item(cards: &mut CardStore, element: Element, modifier: i32) -> CardId {
        add_card(
            cards,
            element,
            CardKind::Item {
                modifier,
                synergy_text: String::new(),
            },
        )
    }

    #[test]
    fn test_item_combo_order() {
        let items = [CardId::new(1), CardId::new(2), CardId::new(3)];
        let combos = item_combos(&items);

        // none, 3 singles, 3 pairs
        assert_eq!(combos.len(), 7);
        assert!(combos[0].is_empty());
        assert_eq!(combos[1].as_slice(), &[CardId::new(1)]);
        assert_eq!(combos[4].as_slice(), &[CardId::new(1), CardId::new(2)]);
        assert_eq!(combos[6].as_slice(), &[CardId::new(2), CardId::new(3)]);
    }

    #[test]
    fn test_no_spell_means_pass() {
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let rules = RuleFlags::default();
        let hand = vec![
            item(&mut cards, Element::Fire, 5),
            item(&mut cards, Element::Water, 5),
        ];

        assert!(choose_best_play(&hand, &cards, &bf, Seat::Opponent, 1, &rules).is_none());
    }

    #[test]
    fn test_picks_maximal_combination() {
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let rules = RuleFlags::default();

        let weak = spell(&mut cards, Element::Water, 1);
        let strong = spell(&mut cards, Element::Fire, 4);
        let matching = item(&mut cards, Element::Fire, 2);
        let dud = item(&mut cards, Element::Earth, -3);
        let hand = vec![weak, strong, matching, dud];

        let play =
            choose_best_play(&hand, &cards, &bf, Seat::Opponent, 1, &rules).expect("playable");
        assert_eq!(play.spell, strong);
        assert_eq!(play.items.as_slice(), &[matching]);
        // 4 base + 2 modifier + 1 spell-element synergy
        assert_eq!(play.value, 7);
    }

    #[test]
    fn test_pass_when_target_unreachable() {
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let rules = RuleFlags::default();
        let hand = vec![spell(&mut cards, Element::Fire, 3)];

        assert!(choose_best_play(&hand, &cards, &bf, Seat::Opponent, 10, &rules).is_none());
        assert!(choose_best_play(&hand, &cards, &bf, Seat::Opponent, 3, &rules).is_some());
    }

    #[test]
    fn test_threshold_met_summons_attached() {
        let mut cards = CardStore::new();
        let mut bf = Battlefield::new();
        let rules = RuleFlags::default();

        let s = spell(&mut cards, Element::Fire, 3);
        let ready = add_card(
            &mut cards,
            Element::Earth,
            CardKind::Summon {
                threshold: 1,
                aura_bonus: 2,
                burst_text: String::new(),
            },
        );
        let locked = add_card(
            &mut cards,
            Element::Air,
            CardKind::Summon {
                threshold: 5,
                aura_bonus: 9,
                burst_text: String::new(),
            },
        );
        let hand = vec![s, ready, locked];

        bf.threshold = 1;
        let play =
            choose_best_play(&hand, &cards, &bf, Seat::Opponent, 1, &rules).expect("playable");
        assert_eq!(play.summons.as_slice(), &[ready]);
    }

    #[test]
    fn test_deterministic_rerun() {
        let mut cards = CardStore::new();
        let bf = Battlefield::new();
        let rules = RuleFlags::default();
        let hand = vec![
            spell(&mut cards, Element::Fire, 3),
            spell(&mut cards, Element::Water, 3),
            item(&mut cards, Element::Fire, 1),
            item(&mut cards, Element::Water, 1),
        ];

        let first = choose_best_play(&hand, &cards, &bf, Seat::Opponent, 1, &rules);
        let second = choose_best_play(&hand, &cards, &bf, Seat::Opponent, 1, &rules);
        assert_eq!(first, second);
    }
}
