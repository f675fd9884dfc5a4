//! Discrete state keys for the action-value table.
//!
//! A state is the triple the agent can see at a decision point: its own
//! total, the dealer's up-card, and whether it holds a usable (soft) ace.
//! The domain is small and fully enumerable, so every state maps to a slot
//! in `0..STATE_COUNT`.

use blackjack_engine::cards::Card;
use blackjack_engine::errors::GameError;
use blackjack_engine::hand::HandValue;
use serde::{Deserialize, Serialize};

pub const MIN_PLAYER_TOTAL: u8 = 4;
pub const MAX_PLAYER_TOTAL: u8 = 21;
pub const MIN_UPCARD: u8 = 2;
pub const MAX_UPCARD: u8 = 11;

const TOTALS: usize = (MAX_PLAYER_TOTAL - MIN_PLAYER_TOTAL + 1) as usize;
const UPCARDS: usize = (MAX_UPCARD - MIN_UPCARD + 1) as usize;

/// 18 player totals x 10 up-card values x usable-ace flag.
pub const STATE_COUNT: usize = TOTALS * UPCARDS * 2;

/// A decision point inside the encodable domain.
///
/// Fields are private so every `State`, including deserialized ones, has
/// passed the range checks in [`State::new`] and `index()` stays in bounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawState")]
pub struct State {
    player_total: u8,
    dealer_upcard: u8,
    usable_ace: bool,
}

#[derive(Deserialize)]
struct RawState {
    player_total: u8,
    dealer_upcard: u8,
    usable_ace: bool,
}

impl TryFrom<RawState> for State {
    type Error = GameError;

    fn try_from(raw: RawState) -> Result<Self, Self::Error> {
        State::new(raw.player_total, raw.dealer_upcard, raw.usable_ace)
    }
}

impl State {
    /// Builds a state after checking it lies inside the encodable domain.
    pub fn new(player_total: u8, dealer_upcard: u8, usable_ace: bool) -> Result<Self, GameError> {
        if !(MIN_PLAYER_TOTAL..=MAX_PLAYER_TOTAL).contains(&player_total) {
            return Err(GameError::InvalidState { player_total });
        }
        if !(MIN_UPCARD..=MAX_UPCARD).contains(&dealer_upcard) {
            return Err(GameError::InvalidUpcard {
                value: dealer_upcard,
            });
        }
        Ok(Self {
            player_total,
            dealer_upcard,
            usable_ace,
        })
    }

    pub fn player_total(&self) -> u8 {
        self.player_total
    }

    /// Blackjack value of the dealer's visible card, ace counted as 11.
    pub fn dealer_upcard(&self) -> u8 {
        self.dealer_upcard
    }

    pub fn usable_ace(&self) -> bool {
        self.usable_ace
    }

    /// Encodes the player's evaluated hand against the dealer's up-card.
    ///
    /// Bust hands are terminal and fail with [`GameError::InvalidState`].
    ///
    /// # Examples
    ///
    /// ```
    /// use blackjack_ai::state::State;
    /// use blackjack_engine::cards::{Card, Rank, Suit};
    /// use blackjack_engine::hand::evaluate_hand;
    ///
    /// let hand = evaluate_hand(&[
    ///     Card::new(Rank::Ace, Suit::Spades),
    ///     Card::new(Rank::Six, Suit::Hearts),
    /// ]);
    /// let s = State::encode(&hand, Card::new(Rank::Ace, Suit::Clubs)).unwrap();
    /// assert_eq!((s.player_total(), s.dealer_upcard(), s.usable_ace()), (17, 11, true));
    /// ```
    pub fn encode(player: &HandValue, dealer_upcard: Card) -> Result<Self, GameError> {
        Self::new(player.total, dealer_upcard.value(), player.soft)
    }

    /// Dense slot in `0..STATE_COUNT`.
    pub fn index(&self) -> usize {
        let t = (self.player_total - MIN_PLAYER_TOTAL) as usize;
        let u = (self.dealer_upcard - MIN_UPCARD) as usize;
        (t * UPCARDS + u) * 2 + self.usable_ace as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= STATE_COUNT {
            return None;
        }
        let usable_ace = index % 2 == 1;
        let rest = index / 2;
        let u = rest % UPCARDS;
        let t = rest / UPCARDS;
        Some(Self {
            player_total: MIN_PLAYER_TOTAL + t as u8,
            dealer_upcard: MIN_UPCARD + u as u8,
            usable_ace,
        })
    }

    /// Every encodable state in index order.
    pub fn all() -> impl Iterator<Item = State> {
        (0..STATE_COUNT).filter_map(State::from_index)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.usable_ace { "soft" } else { "hard" };
        write!(f, "{} {} vs {}", kind, self.player_total, self.dealer_upcard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn index_is_a_bijection_over_the_domain() {
        let mut seen = HashSet::new();
        for total in MIN_PLAYER_TOTAL..=MAX_PLAYER_TOTAL {
            for up in MIN_UPCARD..=MAX_UPCARD {
                for ace in [false, true] {
                    let s = State::new(total, up, ace).unwrap();
                    let i = s.index();
                    assert!(i < STATE_COUNT);
                    assert!(seen.insert(i), "collision at {}", s);
                    assert_eq!(State::from_index(i), Some(s));
                }
            }
        }
        assert_eq!(seen.len(), STATE_COUNT);
        assert_eq!(STATE_COUNT, 360);
        assert_eq!(State::all().count(), STATE_COUNT);
        assert!(State::from_index(STATE_COUNT).is_none());
    }

    #[test]
    fn out_of_domain_totals_are_rejected() {
        assert_eq!(
            State::new(22, 10, false),
            Err(GameError::InvalidState { player_total: 22 })
        );
        assert_eq!(
            State::new(3, 10, false),
            Err(GameError::InvalidState { player_total: 3 })
        );
        assert_eq!(
            State::new(12, 1, false),
            Err(GameError::InvalidUpcard { value: 1 })
        );
    }

    #[test]
    fn face_upcards_encode_as_ten() {
        use blackjack_engine::cards::{Rank, Suit};
        let hand = HandValue {
            total: 15,
            soft: false,
            bust: false,
            blackjack: false,
        };
        for r in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            let s = State::encode(&hand, Card::new(r, Suit::Hearts)).unwrap();
            assert_eq!(s.dealer_upcard(), 10);
        }
    }

    #[test]
    fn deserializing_checks_the_domain() {
        let ok: State =
            serde_json::from_str(r#"{"player_total":20,"dealer_upcard":10,"usable_ace":false}"#)
                .unwrap();
        assert_eq!(ok, State::new(20, 10, false).unwrap());
        for bad in [
            r#"{"player_total":2,"dealer_upcard":10,"usable_ace":false}"#,
            r#"{"player_total":25,"dealer_upcard":10,"usable_ace":true}"#,
            r#"{"player_total":12,"dealer_upcard":1,"usable_ace":false}"#,
        ] {
            assert!(serde_json::from_str::<State>(bad).is_err(), "{}", bad);
        }
    }
}
