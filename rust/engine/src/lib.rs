//! # blackjack-engine: Blackjack Game Engine Core
//!
//! A deterministic single-player-vs-dealer Blackjack engine. Provides cards,
//! a seeded deck, ace-flex hand evaluation, the dealer's drawing rule, round
//! settlement, and JSONL round records.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`engine`] - Round orchestration: deal, player turn, dealer turn, settle
//! - [`game`] - Round outcomes, settlement, and tallies
//! - [`hand`] - Blackjack hand evaluation (totals, soft, bust, natural)
//! - [`player`] - Player actions
//! - [`rules`] - Dealer drawing rule
//! - [`logger`] - RoundRecord serialization
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::hand::evaluate_hand;
//!
//! let cards = [
//!     Card { suit: Suit::Hearts, rank: Rank::Ace },
//!     Card { suit: Suit::Clubs, rank: Rank::Six },
//!     Card { suit: Suit::Spades, rank: Rank::Nine },
//! ];
//!
//! let v = evaluate_hand(&cards);
//! assert_eq!(v.total, 16);
//! assert!(!v.soft);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All game outcomes are reproducible using seeded RNG:
//!
//! ```rust
//! use blackjack_engine::deck::Deck;
//!
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! deck1.shuffle();
//! deck2.shuffle();
//! assert_eq!(deck1.deal_card(), deck2.deal_card());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
