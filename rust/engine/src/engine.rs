use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{settle, Outcome};
use crate::hand::{Hand, HandValue};
use crate::rules::DealerRules;

/// Reshuffle at round start when fewer cards than this remain.
pub const RESHUFFLE_THRESHOLD: usize = 15;

const DEFAULT_SEED: u64 = 0xB1AC_4ACE;

/// Where the current round stands.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// No round dealt yet
    Idle,
    /// Player may hit or stand
    PlayerTurn,
    /// Round settled; `outcome()` is available
    Complete,
}

/// Core game engine that runs one player against the dealer, one round at a time.
/// Owns the seeded deck, both hands, and the dealer's drawing rule.
///
/// # Examples
///
/// ```
/// use blackjack_engine::engine::{Engine, Phase};
/// use blackjack_engine::rules::DealerRules;
///
/// let mut engine = Engine::new(Some(12345), DealerRules::default());
/// match engine.start_round() {
///     Ok(Some(outcome)) => println!("settled on the deal: {}", outcome),
///     Ok(None) => {
///         assert_eq!(engine.phase(), Phase::PlayerTurn);
///         let outcome = engine.player_stand().unwrap();
///         println!("outcome: {}", outcome);
///     }
///     Err(e) => println!("Failed to deal: {}", e),
/// }
/// ```
#[derive(Debug)]
pub struct Engine {
    /// The deck used for dealing cards
    deck: Deck,
    player: Hand,
    /// First card dealt to the dealer is the up-card
    dealer: Hand,
    rules: DealerRules,
    reshuffle_threshold: usize,
    phase: Phase,
    /// Number of reshuffles so far, including forced mid-round ones
    reshuffles: u64,
}

impl Engine {
    /// Creates an engine with a freshly shuffled deck.
    pub fn new(seed: Option<u64>, rules: DealerRules) -> Self {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        Self {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            rules,
            reshuffle_threshold: RESHUFFLE_THRESHOLD,
            phase: Phase::Idle,
            reshuffles: 0,
        }
    }

    pub fn with_reshuffle_threshold(mut self, threshold: usize) -> Self {
        self.reshuffle_threshold = threshold;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn dealer_upcard(&self) -> Option<Card> {
        self.dealer.cards().first().copied()
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn reshuffles(&self) -> u64 {
        self.reshuffles
    }

    /// Clears both hands and deals player, dealer, player, dealer.
    ///
    /// Returns `Some(outcome)` when either side holds a natural: the round is
    /// settled on the deal and the player gets no decision.
    pub fn start_round(&mut self) -> Result<Option<Outcome>, GameError> {
        if self.deck.remaining() < self.reshuffle_threshold {
            self.reshuffle();
        }
        self.player.clear();
        self.dealer.clear();
        for _ in 0..2 {
            let c = self.draw()?;
            self.player.push(c);
            let c = self.draw()?;
            self.dealer.push(c);
        }
        if self.player.is_blackjack() || self.dealer.is_blackjack() {
            self.phase = Phase::Complete;
            return Ok(self.outcome());
        }
        self.phase = Phase::PlayerTurn;
        Ok(None)
    }

    /// Deals one card to the player. A bust ends the round.
    pub fn player_hit(&mut self) -> Result<HandValue, GameError> {
        self.require_player_turn()?;
        let c = self.draw()?;
        self.player.push(c);
        let v = self.player.value();
        if v.bust {
            self.phase = Phase::Complete;
        }
        Ok(v)
    }

    /// Ends the player's turn, plays the dealer out, and settles.
    pub fn player_stand(&mut self) -> Result<Outcome, GameError> {
        self.require_player_turn()?;
        self.play_dealer()?;
        self.phase = Phase::Complete;
        self.outcome().ok_or(GameError::NoRoundInProgress)
    }

    /// Settled result, once the round is complete.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Complete => Some(settle(&self.player.value(), &self.dealer.value())),
            _ => None,
        }
    }

    fn play_dealer(&mut self) -> Result<(), GameError> {
        while self.rules.should_hit(&self.dealer.value()) {
            let c = self.draw()?;
            self.dealer.push(c);
        }
        Ok(())
    }

    fn require_player_turn(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::PlayerTurn => Ok(()),
            Phase::Idle => Err(GameError::NoRoundInProgress),
            Phase::Complete => Err(GameError::RoundAlreadyComplete),
        }
    }

    fn reshuffle(&mut self) {
        self.deck.shuffle();
        self.reshuffles += 1;
    }

    // An exhausted deck mid-round is refilled rather than surfaced.
    fn draw(&mut self) -> Result<Card, GameError> {
        match self.deck.deal_card() {
            Err(GameError::EmptyDeck) => {
                self.reshuffle();
                self.deck.deal_card()
            }
            other => other,
        }
    }
}
