//! Deck list loader (JSON)

use crate::{MagecraftError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDeckList {
    name: String,
    /// Card name -> copy count. BTreeMap keeps entry order deterministic.
    cards: BTreeMap<String, u8>,
}

/// Represents a deck entry (card name and copy count)
#[derive(Debug, Clone)]
pub struct DeckEntry {
    pub card_name: String,
    pub count: u8,
}

/// A named deck list: which cards, how many copies each
#[derive(Debug, Clone)]
pub struct DeckList {
    pub name: String,
    pub entries: Vec<DeckEntry>,
}

/// Deck list loader for JSON deck files
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck list from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a deck list from its JSON content
    pub fn parse(content: &str) -> Result<DeckList> {
        let raw: RawDeckList = serde_json::from_str(content)
            .map_err(|e| MagecraftError::InvalidDeckFormat(e.to_string()))?;

        let entries: Vec<DeckEntry> = raw
            .cards
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(card_name, count)| DeckEntry { card_name, count })
            .collect();

        if entries.is_empty() {
            return Err(MagecraftError::InvalidDeckFormat(format!(
                "deck '{}' is empty",
                raw.name
            )));
        }

        Ok(DeckList {
            name: raw.name,
            entries,
        })
    }
}

impl DeckList {
    /// Total cards the list expands to
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }
}
