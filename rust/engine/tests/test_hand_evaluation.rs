use blackjack_engine::cards::{all_ranks, all_suits, Card, Rank as R, Suit as S};
use blackjack_engine::hand::evaluate_hand;

fn c(r: R, s: S) -> Card {
    Card { suit: s, rank: r }
}

fn ten_valued() -> [R; 4] {
    [R::Ten, R::Jack, R::Queen, R::King]
}

#[test]
fn ace_with_any_ten_value_card_is_blackjack_in_any_order() {
    for &s1 in &all_suits() {
        for &s2 in &all_suits() {
            for r in ten_valued() {
                for hand in [[c(R::Ace, s1), c(r, s2)], [c(r, s2), c(R::Ace, s1)]] {
                    let v = evaluate_hand(&hand);
                    assert!(v.blackjack, "{:?} should be blackjack", hand);
                    assert_eq!(v.total, 21);
                    assert!(v.soft);
                }
            }
        }
    }
}

#[test]
fn three_card_twenty_one_is_not_blackjack() {
    let v = evaluate_hand(&[c(R::Seven, S::Clubs), c(R::Seven, S::Hearts), c(R::Seven, S::Spades)]);
    assert_eq!(v.total, 21);
    assert!(!v.blackjack);
}

#[test]
fn face_cards_count_ten() {
    let v = evaluate_hand(&[c(R::King, S::Clubs), c(R::Queen, S::Hearts)]);
    assert_eq!(v.total, 20);
    assert!(!v.soft);
}

#[test]
fn aces_are_demoted_one_at_a_time() {
    // A + 6 = soft 17
    let v = evaluate_hand(&[c(R::Ace, S::Clubs), c(R::Six, S::Hearts)]);
    assert_eq!((v.total, v.soft), (17, true));

    // A + 6 + 9 = hard 16
    let v = evaluate_hand(&[c(R::Ace, S::Clubs), c(R::Six, S::Hearts), c(R::Nine, S::Spades)]);
    assert_eq!((v.total, v.soft), (16, false));

    // A + A + 9 = soft 21, one ace still high
    let v = evaluate_hand(&[c(R::Ace, S::Clubs), c(R::Ace, S::Hearts), c(R::Nine, S::Spades)]);
    assert_eq!((v.total, v.soft), (21, true));
}

#[test]
fn bust_without_aces() {
    let v = evaluate_hand(&[c(R::King, S::Clubs), c(R::Six, S::Hearts), c(R::Nine, S::Spades)]);
    assert_eq!(v.total, 25);
    assert!(v.bust);
    assert!(!v.soft);
}

#[test]
fn adjusted_total_never_exceeds_21_when_an_ace_can_absorb_the_overflow() {
    // Every three-card hand with at least one ace.
    let ranks = all_ranks();
    for &a in &ranks {
        for &b in &ranks {
            let cards = [c(R::Ace, S::Spades), c(a, S::Hearts), c(b, S::Clubs)];
            let raw: u32 = cards.iter().map(|x| x.value() as u32).sum();
            let v = evaluate_hand(&cards);
            let aces = cards.iter().filter(|x| x.rank == R::Ace).count() as u32;
            if raw > 21 && raw - 10 * aces <= 21 {
                assert!(v.total <= 21, "{:?} -> {}", cards, v.total);
                assert!(!v.bust);
            }
        }
    }
}

#[test]
fn two_card_hands_stay_within_range() {
    for &a in &all_ranks() {
        for &b in &all_ranks() {
            let cards = [c(a, S::Spades), c(b, S::Hearts)];
            let raw: u32 = cards.iter().map(|x| x.value() as u32).sum();
            assert!((4..=22).contains(&raw));
            let v = evaluate_hand(&cards);
            assert!((4..=21).contains(&v.total), "{:?} -> {}", cards, v.total);
            assert!(!v.bust);
        }
    }
}
