//! Match initialization from deck lists
//!
//! Expands deck lists against the card catalog into a fresh match state.

use crate::core::Seat;
use crate::game::MatchState;
use crate::loader::{CardCatalog, DeckList};
use crate::{MagecraftError, Result};

/// Match builder: deck lists + catalog -> ready-to-start match
pub struct MatchInitializer<'a> {
    catalog: &'a CardCatalog,
}

impl<'a> MatchInitializer<'a> {
    /// Create a new initializer over a loaded catalog
    pub fn new(catalog: &'a CardCatalog) -> Self {
        MatchInitializer { catalog }
    }

    /// Build a two-seat match from two deck lists
    ///
    /// Fails with [`MagecraftError::UnknownCard`] before any match state is
    /// handed out if a deck list references a card the catalog lacks.
    pub fn init_match(
        &self,
        player_name: impl Into<String>,
        player_deck: &DeckList,
        opponent_name: impl Into<String>,
        opponent_deck: &DeckList,
    ) -> Result<MatchState> {
        let mut state = MatchState::new_two_player(player_name, opponent_name);

        self.load_deck_into_match(&mut state, Seat::Player, player_deck)?;
        self.load_deck_into_match(&mut state, Seat::Opponent, opponent_deck)?;

        Ok(state)
    }

    /// Expand one deck list into a seat's deck
    fn load_deck_into_match(
        &self,
        state: &mut MatchState,
        seat: Seat,
        deck: &DeckList,
    ) -> Result<()> {
        for entry in &deck.entries {
            let template = self
                .catalog
                .get(&entry.card_name)
                .ok_or_else(|| MagecraftError::UnknownCard(entry.card_name.clone()))?;

            for _ in 0..entry.count {
                let card_id = state.cards.next_id();
                let card = template.instantiate(card_id, seat);
                state.cards.insert(card_id, card);
                state.player_mut(seat).deck.push_back(card_id);
            }
        }
        Ok(())
    }
}
