//! Card catalog loader (JSON)
//!
//! The catalog document maps pluralized category names to lists of
//! per-category records; loading normalizes everything into flat
//! [`CardTemplate`]s with lookup by name.

use crate::core::{Card, CardId, CardKind, CardName, Element, ElementTable, Rarity, Seat};
use crate::{MagecraftError, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    spells: Vec<RawSpell>,
    #[serde(default)]
    items: Vec<RawItem>,
    #[serde(default)]
    fields: Vec<RawField>,
    #[serde(default)]
    summons: Vec<RawSummon>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpell {
    name: String,
    element: Element,
    rarity: Rarity,
    base_value: i32,
    #[serde(default)]
    affinity: ElementTable,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    name: String,
    element: Element,
    rarity: Rarity,
    /// Absent modifier means 0
    #[serde(default)]
    modifier: i32,
    #[serde(default)]
    elemental_synergy_effect: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    element: Element,
    rarity: Rarity,
    #[serde(default)]
    effect_text: String,
    #[serde(default)]
    duration_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummon {
    name: String,
    element: Element,
    rarity: Rarity,
    threshold: u32,
    aura_bonus: i32,
    #[serde(default)]
    burst_effect_text: String,
}

/// An immutable card definition from the catalog
///
/// Templates are instantiated into owned [`Card`] copies at deck build
/// time, one per copy requested by the deck list.
#[derive(Debug, Clone)]
pub struct CardTemplate {
    pub name: CardName,
    pub element: Element,
    pub rarity: Rarity,
    pub kind: CardKind,
}

impl CardTemplate {
    /// Create a card instance from this template
    pub fn instantiate(&self, id: CardId, owner: Seat) -> Card {
        Card {
            id,
            name: self.name.clone(),
            element: self.element,
            rarity: self.rarity,
            kind: self.kind.clone(),
            owner,
        }
    }
}

/// Catalog of card templates with lookup by name
#[derive(Debug)]
pub struct CardCatalog {
    templates: FxHashMap<String, CardTemplate>,
}

impl CardCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        CardCatalog {
            templates: FxHashMap::default(),
        }
    }

    /// Load a catalog from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a catalog from JSON content
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(content)
            .map_err(|e| MagecraftError::InvalidCatalogFormat(e.to_string()))?;

        let mut catalog = CardCatalog::new();
        for spell in raw.spells {
            catalog.add_template(CardTemplate {
                name: CardName::new(spell.name),
                element: spell.element,
                rarity: spell.rarity,
                kind: CardKind::Spell {
                    base_value: spell.base_value,
                    affinity: spell.affinity,
                },
            });
        }
        for item in raw.items {
            catalog.add_template(CardTemplate {
                name: CardName::new(item.name),
                element: item.element,
                rarity: item.rarity,
                kind: CardKind::Item {
                    modifier: item.modifier,
                    synergy_text: item.elemental_synergy_effect,
                },
            });
        }
        for field in raw.fields {
            catalog.add_template(CardTemplate {
                name: CardName::new(field.name),
                element: field.element,
                rarity: field.rarity,
                kind: CardKind::Field {
                    effect_text: field.effect_text,
                    duration_text: field.duration_text,
                },
            });
        }
        for summon in raw.summons {
            catalog.add_template(CardTemplate {
                name: CardName::new(summon.name),
                element: summon.element,
                rarity: summon.rarity,
                kind: CardKind::Summon {
                    threshold: summon.threshold,
                    aura_bonus: summon.aura_bonus,
                    burst_text: summon.burst_effect_text,
                },
            });
        }
        Ok(catalog)
    }

    /// Add a single template (last duplicate name wins)
    pub fn add_template(&mut self, template: CardTemplate) {
        self.templates
            .insert(template.name.to_lowercase(), template);
    }

    /// Look up a template by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&CardTemplate> {
        self.templates.get(&name.to_lowercase())
    }

    /// Check if a card exists in the catalog
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(&name.to_lowercase())
    }

    /// Total number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::new()
    }
}
