//! Seeded 52-card deck.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// One standard deck dealt from the top, with its own ChaCha20 stream so a
/// seed fixes every shuffle for the life of the deck.
#[derive(Debug)]
pub struct Deck {
    // Top of the deck is the end of the vector
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Full deck in suit/rank order; call [`Deck::shuffle`] before dealing.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Puts all 52 cards back and randomizes their order.
    pub fn shuffle(&mut self) {
        self.reset();
        self.cards.shuffle(&mut self.rng);
    }

    /// Takes the top card. An exhausted deck is never refilled here.
    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Puts all 52 cards back in unshuffled order.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.extend(full_deck());
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
