use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Best Blackjack reading of a set of cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandValue {
    /// Best total <= 21 if one exists, otherwise the lowest (bust) total.
    pub total: u8,
    /// An ace is still counted as 11.
    pub soft: bool,
    pub bust: bool,
    /// Exactly two cards totalling 21.
    pub blackjack: bool,
}

/// Evaluates a Blackjack hand under ace-flex rules.
///
/// Every ace starts at 11; while the total is over 21 and an ace is still
/// counted high, one ace is demoted to 1.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::evaluate_hand;
///
/// let v = evaluate_hand(&[
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Hearts),
/// ]);
/// assert_eq!(v.total, 21);
/// assert!(v.blackjack && v.soft && !v.bust);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> HandValue {
    let mut total: u32 = 0;
    let mut high_aces = 0u8;
    for c in cards {
        total += c.value() as u32;
        if c.rank.is_ace() {
            high_aces += 1;
        }
    }
    while total > 21 && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }
    // a hand can never hold more than the whole deck, so this fits in u8
    let total = total.min(u8::MAX as u32) as u8;
    HandValue {
        total,
        soft: high_aces > 0,
        bust: total > 21,
        blackjack: cards.len() == 2 && total == 21,
    }
}

/// Cards held by one participant for the current round.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(6),
        }
    }

    pub fn push(&mut self, c: Card) {
        self.cards.push(c);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> HandValue {
        evaluate_hand(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value().bust
    }

    pub fn is_blackjack(&self) -> bool {
        self.value().blackjack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank as R, Suit as S};

    fn c(r: R) -> Card {
        Card::new(r, S::Clubs)
    }

    #[test]
    fn empty_hand_is_zero() {
        let v = evaluate_hand(&[]);
        assert_eq!(v.total, 0);
        assert!(!v.soft && !v.bust && !v.blackjack);
    }

    #[test]
    fn two_aces_are_soft_twelve() {
        let v = evaluate_hand(&[c(R::Ace), c(R::Ace)]);
        assert_eq!(v.total, 12);
        assert!(v.soft);
    }

    #[test]
    fn hand_accessors_follow_cards() {
        let mut h = Hand::new();
        assert!(h.is_empty());
        h.push(c(R::King));
        h.push(c(R::Queen));
        h.push(c(R::Two));
        assert_eq!(h.len(), 3);
        assert!(h.is_bust());
        h.clear();
        assert!(h.is_empty());
    }
}
