//! Card catalog and deck list loaders
//!
//! Parsers for the JSON catalog and deck list formats

pub mod catalog;
pub mod deck;
pub mod match_init;

pub use catalog::{CardCatalog, CardTemplate};
pub use deck::{DeckEntry, DeckList, DeckLoader};
pub use match_init::MatchInitializer;
