//! Player representation

use crate::core::{CardId, PlayerName, Seat};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum hand size enforced by the draw step (play never discards down)
pub const HAND_CAP: usize = 7;

/// Represents one side of a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Which seat this player occupies
    pub seat: Seat,

    /// Player name
    pub name: PlayerName,

    /// Deck: a queue of card copies, drawn from the front
    pub deck: VecDeque<CardId>,

    /// Hand: unordered multiset, capped at HAND_CAP by the draw step only
    pub hand: Vec<CardId>,
}

impl Player {
    pub fn new(seat: Seat, name: impl Into<PlayerName>) -> Self {
        Player {
            seat,
            name: name.into(),
            deck: VecDeque::new(),
            hand: Vec::new(),
        }
    }

    /// Draw one card from the front of the deck into hand
    ///
    /// Returns None when the deck is empty or the hand is at cap.
    pub fn draw_card(&mut self) -> Option<CardId> {
        if self.hand.len() >= HAND_CAP {
            return None;
        }
        let card_id = self.deck.pop_front()?;
        self.hand.push(card_id);
        Some(card_id)
    }

    /// Draw up to `count` cards, bounded by deck size and the hand cap
    ///
    /// Returns the number of cards actually drawn.
    pub fn draw_up_to(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            if self.draw_card().is_none() {
                break;
            }
            drawn += 1;
        }
        drawn
    }

    /// Remove a specific card from hand
    ///
    /// Returns false if the card is not in hand.
    pub fn remove_from_hand(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.hand.iter().position(|&c| c == card_id) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    /// Return a card to hand (undoing a stage)
    pub fn return_to_hand(&mut self, card_id: CardId) {
        self.hand.push(card_id);
    }

    pub fn hand_contains(&self, card_id: CardId) -> bool {
        self.hand.contains(&card_id)
    }
}
