//! Card instance ids and storage

use crate::core::Card;
use crate::MagecraftError;
use crate::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for card instances
///
/// Keeps IDs simple and contiguous for human readability and dense storage.
/// IDs are stable for the lifetime of a match - instances are never recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two sides of a match
///
/// Mage Craft is strictly two-seat: the human seat and the scripted
/// opponent. Kept as an enum so a seat can never be out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    /// Index into per-seat arrays (players, staging areas, summons)
    pub fn index(&self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }

    /// The other side of the table
    pub fn other(&self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player => write!(f, "Player"),
            Seat::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Central storage for all card instances in a match
///
/// Provides fast lookup by CardId. Uses FxHashMap for fast hashing of
/// integer keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardStore {
    cards: FxHashMap<CardId, Card>,
    next_id: u32,
}

impl CardStore {
    pub fn new() -> Self {
        CardStore {
            cards: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Generate a new unique CardId
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a card instance with a specific ID
    pub fn insert(&mut self, id: CardId, card: Card) {
        self.cards.insert(id, card);
    }

    /// Get a card by ID
    pub fn get(&self, id: CardId) -> Result<&Card> {
        self.cards
            .get(&id)
            .ok_or(MagecraftError::CardNotFound(id.as_u32()))
    }

    /// Get a mutable reference to a card
    pub fn get_mut(&mut self, id: CardId) -> Result<&mut Card> {
        self.cards
            .get_mut(&id)
            .ok_or(MagecraftError::CardNotFound(id.as_u32()))
    }

    /// Check if a card instance exists
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Iterate over all card instances
    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &Card)> {
        self.cards.iter()
    }

    /// Get count of card instances
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
