//! Core game types and entities

pub mod card;
pub mod entity;
pub mod player;
pub mod types;

pub use card::{Card, CardKind, Category, Element, ElementTable, Rarity};
pub use entity::{CardId, CardStore, Seat};
pub use player::{Player, HAND_CAP};
pub use types::{CardName, PlayerName};
