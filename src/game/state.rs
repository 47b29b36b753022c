//! Match state and the turn controller
//!
//! `MatchState` owns everything a match needs: the card store, both
//! players, both staging areas, the battlefield, the RNG, and the logger.
//! All cross-turn mutation happens here, at lock boundaries; staging and
//! previews never touch the battlefield.

use crate::core::{CardId, CardKind, CardName, CardStore, Player, Seat};
use crate::game::{
    can_stage, choose_best_play, eligible_summons, preview, resolve, Battlefield, MatchLogger,
    Resolution, RuleFlags, Staging, TurnPhase,
};
use crate::{MagecraftError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// How a locked turn affected the running chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEvent {
    /// The play scored; the chain continues and the other seat must answer
    Continued,
    /// The chain ended (pass or scoreless play); the winner takes a point
    Ended { winner: Seat },
}

/// Result of locking one turn
#[derive(Debug, Clone, Copy)]
pub struct TurnOutcome {
    pub seat: Seat,
    pub resolution: Resolution,
    pub chain: ChainEvent,
    /// Cards drawn back after the lock (one per card resolved, capped by
    /// deck remaining and the hand cap)
    pub cards_drawn: usize,
}

/// Complete match state
///
/// There are no ambient globals: a match owns one battlefield and two
/// staging areas, created at start and discarded on reset.
#[derive(Debug)]
pub struct MatchState {
    /// All card instances in the match
    pub cards: CardStore,

    /// Both players, indexed by seat
    pub players: [Player; 2],

    /// Turn-local staging areas, indexed by seat
    staging: [Staging; 2],

    /// Persistent cross-turn state
    pub battlefield: Battlefield,

    /// Controller state machine position
    pub phase: TurnPhase,

    /// Rule variant flags
    pub rules: RuleFlags,

    /// Match RNG: shuffles and attunement rolls, deterministic per seed
    pub rng: ChaCha12Rng,

    /// Centralized logger for match events
    pub logger: MatchLogger,
}

impl MatchState {
    /// Create a new match shell with two named players
    ///
    /// Decks are loaded by the match initializer before `start`.
    pub fn new_two_player(player_name: impl Into<String>, opponent_name: impl Into<String>) -> Self {
        MatchState {
            cards: CardStore::new(),
            players: [
                Player::new(Seat::Player, player_name.into()),
                Player::new(Seat::Opponent, opponent_name.into()),
            ],
            staging: [Staging::new(), Staging::new()],
            battlefield: Battlefield::new(),
            phase: TurnPhase::AwaitingStart,
            rules: RuleFlags::default(),
            rng: ChaCha12Rng::seed_from_u64(0),
            logger: MatchLogger::new(),
        }
    }

    /// Set the RNG seed for deterministic matches
    ///
    /// Call before `start` so shuffles and attunement rolls reproduce.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    pub fn staging(&self, seat: Seat) -> &Staging {
        &self.staging[seat.index()]
    }

    pub fn hand(&self, seat: Seat) -> &[CardId] {
        &self.players[seat.index()].hand
    }

    fn shuffle_deck(&mut self, seat: Seat) {
        self.players[seat.index()]
            .deck
            .make_contiguous()
            .shuffle(&mut self.rng);
    }

    /// Start (or restart) the match: shuffle, draw 7 each, reset state
    pub fn start(&mut self) -> Result<()> {
        for seat in [Seat::Player, Seat::Opponent] {
            let player = self.player(seat);
            if player.deck.is_empty() && player.hand.is_empty() {
                return Err(MagecraftError::InvalidAction(format!(
                    "{} has no deck loaded",
                    player.name
                )));
            }
        }

        self.battlefield = Battlefield::new();
        self.staging = [Staging::new(), Staging::new()];

        self.logger.minimal("=== Mage Craft Match Started ===");
        for seat in [Seat::Player, Seat::Opponent] {
            self.shuffle_deck(seat);
            let drawn = self.player_mut(seat).draw_up_to(crate::core::HAND_CAP);
            let player = self.player(seat);
            self.logger
                .normal(&format!("{} draws {} cards", player.name, drawn));
        }

        self.phase = TurnPhase::Staging(Seat::Player);
        self.logger.normal("Awaiting first spell");
        Ok(())
    }

    /// Live TSV preview of a seat's staged play (never rolls attunement)
    pub fn preview_tsv(&self, seat: Seat) -> i32 {
        preview(
            &self.staging[seat.index()],
            &self.battlefield,
            seat,
            &self.cards,
            &self.rules,
        )
    }

    /// Check whether a card could be staged right now
    pub fn can_stage_card(&self, seat: Seat, card_id: CardId) -> bool {
        if !self.phase.is_staging(seat) || !self.player(seat).hand_contains(card_id) {
            return false;
        }
        match self.cards.get(card_id) {
            Ok(card) => can_stage(card, &self.staging[seat.index()], &self.battlefield),
            Err(_) => false,
        }
    }

    /// Move a card from hand into staging
    ///
    /// Rejected plays return false and leave all state unchanged.
    pub fn stage(&mut self, seat: Seat, card_id: CardId) -> bool {
        if !self.can_stage_card(seat, card_id) {
            return false;
        }
        // Legality was checked above; now move atomically
        let (category, name) = {
            let card = self.cards.get(card_id).expect("checked by can_stage_card");
            (card.kind.category(), card.name.clone())
        };
        self.player_mut(seat).remove_from_hand(card_id);
        let staging = &mut self.staging[seat.index()];
        match category {
            crate::core::Category::Spell => staging.spell = Some(card_id),
            crate::core::Category::Field => staging.field = Some(card_id),
            crate::core::Category::Item => staging.items.push(card_id),
            crate::core::Category::Summon => staging.summons.push(card_id),
        }
        self.logger
            .verbose(&format!("{} stages {name}", self.player(seat).name));
        true
    }

    /// Return a staged card to hand, reversing exactly the stage
    ///
    /// Legal any time before lock; has no other side effect.
    pub fn unstage(&mut self, seat: Seat, card_id: CardId) -> bool {
        if !self.phase.is_staging(seat) {
            return false;
        }
        let staging = &mut self.staging[seat.index()];
        let removed = if staging.spell == Some(card_id) {
            staging.spell = None;
            true
        } else if staging.field == Some(card_id) {
            staging.field = None;
            true
        } else if let Some(pos) = staging.items.iter().position(|&c| c == card_id) {
            staging.items.remove(pos);
            true
        } else if let Some(pos) = staging.summons.iter().position(|&c| c == card_id) {
            staging.summons.remove(pos);
            true
        } else {
            false
        };

        if removed {
            self.player_mut(seat).return_to_hand(card_id);
            if let Ok(card) = self.cards.get(card_id) {
                let name = card.name.clone();
                self.logger
                    .verbose(&format!("{} unstages {name}", self.player(seat).name));
            }
        }
        removed
    }

    /// Lock the turn: resolve the staged play and apply it to the battlefield
    ///
    /// This is the only place cross-turn state changes. A lock with no
    /// staged spell is a legal, scoreless play that ends the chain in the
    /// other seat's favor.
    pub fn lock_turn(&mut self, seat: Seat) -> Result<TurnOutcome> {
        if !self.phase.is_staging(seat) {
            return Err(MagecraftError::InvalidAction(format!(
                "{seat} cannot lock: not their staging phase"
            )));
        }

        // Resolve display names up front: a missing card (corrupted store)
        // must fail before the phase flips or any state changes.
        let spell_name = match self.staging[seat.index()].spell {
            Some(id) => Some(self.cards.get(id)?.name.clone()),
            None => None,
        };
        let field_name = match self.staging[seat.index()].field {
            Some(id) => Some(self.cards.get(id)?.name.clone()),
            None => None,
        };
        let mut summon_names: Vec<CardName> = Vec::new();
        for &id in &self.staging[seat.index()].summons {
            summon_names.push(self.cards.get(id)?.name.clone());
        }

        self.phase = TurnPhase::Locked(seat);

        let resolution = resolve(
            &self.staging[seat.index()],
            &self.battlefield,
            seat,
            &self.cards,
            &self.rules,
            &mut self.rng,
        );

        let staging = std::mem::take(&mut self.staging[seat.index()]);
        let resolved_count = staging.count();
        let player_name = self.player(seat).name.clone();

        if let Some(name) = &spell_name {
            self.logger.normal(&format!("{player_name} plays {name}"));
        }
        if let Some(roll) = resolution.attunement {
            self.logger.verbose(&format!(
                "Attunement roll {} vs difficulty {}: {}",
                roll.roll,
                roll.difficulty,
                if roll.succeeded {
                    format!("+{} bonus", roll.bonus)
                } else {
                    "no bonus".to_string()
                }
            ));
        }

        // Persist a newly played field; it replaces the previous one
        if let (Some(field_id), Some(name)) = (staging.field, &field_name) {
            self.battlefield.active_field = Some(field_id);
            self.logger
                .normal(&format!("{player_name} sets the field: {name}"));
        }

        // Newly played summons come down active with their burst unspent
        for (&summon_id, name) in staging.summons.iter().zip(&summon_names) {
            self.battlefield.add_summon(seat, summon_id);
            self.logger.normal(&format!("{player_name} summons {name}"));
        }

        let chain = if staging.spell.is_some() {
            self.battlefield.current_tsv = resolution.value;
            self.logger
                .normal(&format!("TSV is now {}", resolution.value));
            ChainEvent::Continued
        } else {
            let winner = seat.other();
            self.battlefield.current_tsv = 0;
            self.battlefield.award_point(winner);
            let winner_name = self.player(winner).name.clone();
            self.logger.minimal(&format!(
                "{player_name} cannot answer; {winner_name} wins the chain"
            ));
            ChainEvent::Ended { winner }
        };

        // Lock boundary bookkeeping: both counters are monotonic
        self.battlefield.round += 1;
        self.battlefield.threshold += 1;

        let cards_drawn = self.player_mut(seat).draw_up_to(resolved_count);
        if cards_drawn > 0 {
            self.logger
                .verbose(&format!("{player_name} draws {cards_drawn} cards"));
        }

        match chain {
            ChainEvent::Continued => self.phase = TurnPhase::Staging(seat.other()),
            // Rest between chains until the driver advances; the chain
            // winner opens the next one
            ChainEvent::Ended { winner } => self.phase = TurnPhase::RoundAdvance(winner),
        }

        Ok(TurnOutcome {
            seat,
            resolution,
            chain,
            cards_drawn,
        })
    }

    /// Step from the between-chains rest into the next staging phase
    ///
    /// Returns false (and does nothing) unless the phase is `RoundAdvance`.
    pub fn advance_round(&mut self) -> bool {
        if let TurnPhase::RoundAdvance(next) = self.phase {
            self.logger
                .verbose(&format!("Round advances to {}", self.battlefield.round));
            self.phase = TurnPhase::Staging(next);
            true
        } else {
            false
        }
    }

    /// Spend a summon's one-shot burst
    ///
    /// Legal any time the summon is active and un-bursted; the summon
    /// leaves play permanently and its burst text is logged. No TSV effect.
    pub fn burst_summon(&mut self, seat: Seat, card_id: CardId) -> bool {
        if !self.phase.is_running() {
            return false;
        }
        let Ok(card) = self.cards.get(card_id) else {
            return false;
        };
        let CardKind::Summon { burst_text, .. } = &card.kind else {
            return false;
        };
        let name = card.name.clone();
        let text = burst_text.clone();
        if self.battlefield.burst_summon(seat, card_id) {
            self.logger.normal(&format!("{name} bursts: {text}"));
            true
        } else {
            false
        }
    }

    /// Run one full turn for a seat using the best-response search
    ///
    /// Stages the chosen combination and locks. With no qualifying play,
    /// still stages any threshold-met summons (their activation is free),
    /// then locks the spell-less staging area, which is the pass that ends
    /// the chain.
    pub fn auto_turn(&mut self, seat: Seat) -> Result<TurnOutcome> {
        if !self.phase.is_staging(seat) {
            return Err(MagecraftError::InvalidAction(format!(
                "{seat} cannot act: not their staging phase"
            )));
        }

        // A chained play must exceed the standing TSV
        let target = self.battlefield.current_tsv + 1;
        let play = choose_best_play(
            self.hand(seat),
            &self.cards,
            &self.battlefield,
            seat,
            target,
            &self.rules,
        );

        match play {
            Some(play) => {
                let mut picks: Vec<CardId> = vec![play.spell];
                picks.extend(play.field);
                picks.extend(play.items.iter().copied());
                picks.extend(play.summons.iter().copied());
                for card_id in picks {
                    if !self.stage(seat, card_id) {
                        return Err(MagecraftError::InvalidAction(format!(
                            "search chose unstageable card {card_id}"
                        )));
                    }
                }
            }
            None => {
                // Summon activation is free, so a passing seat still plays
                // every threshold-met summon before conceding the chain
                for card_id in eligible_summons(self.hand(seat), &self.cards, &self.battlefield) {
                    if !self.stage(seat, card_id) {
                        return Err(MagecraftError::InvalidAction(format!(
                            "search chose unstageable card {card_id}"
                        )));
                    }
                }
                let name = self.player(seat).name.clone();
                self.logger.normal(&format!("{name} cannot beat the TSV"));
            }
        }

        self.lock_turn(seat)
    }
}
