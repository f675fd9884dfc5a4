//! Card, hand, and strategy-chart formatters for terminal display.
//!
//! Pure functions only. Suits render as Unicode symbols, with an ASCII
//! fallback on Windows consoles that are not known to handle them.
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_cli::formatters::{format_card, format_cards};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert!(format_cards(&[ace]).starts_with('A'));
//! ```

use blackjack_ai::qtable::QTable;
use blackjack_ai::state::{MAX_PLAYER_TOTAL, MAX_UPCARD, MIN_UPCARD, State};
use blackjack_engine::cards::{Card, Suit};
use blackjack_engine::hand::HandValue;
use blackjack_engine::player::PlayerAction;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM), or VS Code (VSCODE_INJECTION). Elsewhere assumes yes.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(&card.suit))
}

/// Space-separated cards, e.g. `"A♠ 7♥"`.
pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

/// Short description of an evaluated hand.
///
/// ```rust
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::evaluate_hand;
/// use blackjack_cli::formatters::format_value;
///
/// let v = evaluate_hand(&[Card::new(Rank::Ace, Suit::Clubs), Card::new(Rank::Six, Suit::Hearts)]);
/// assert_eq!(format_value(&v), "soft 17");
/// ```
pub fn format_value(value: &HandValue) -> String {
    if value.blackjack {
        "blackjack".to_string()
    } else if value.bust {
        format!("bust {}", value.total)
    } else if value.soft {
        format!("soft {}", value.total)
    } else {
        value.total.to_string()
    }
}

/// Comma-separated actions, or `-` when the round settled on the deal.
pub fn format_actions(actions: &[PlayerAction]) -> String {
    if actions.is_empty() {
        "-".to_string()
    } else {
        actions
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Column header for a dealer up-card value (11 shown as `A`).
fn upcard_label(up: u8) -> String {
    if up == MAX_UPCARD {
        "A".to_string()
    } else {
        up.to_string()
    }
}

/// Renders the greedy action for every state as an H/S grid.
///
/// Rows are player totals, columns dealer up-cards 2..A. A `.` marks a state
/// the table never learned anything about (both values still zero).
pub fn strategy_chart(table: &QTable, soft: bool) -> Vec<String> {
    // A usable ace means at least soft 12 (A-A)
    let first_total = if soft { 12 } else { 4 };
    let mut lines = Vec::new();

    let mut header = String::from("     ");
    for up in MIN_UPCARD..=MAX_UPCARD {
        header.push_str(&format!("{:>3}", upcard_label(up)));
    }
    lines.push(header);

    for total in first_total..=MAX_PLAYER_TOTAL {
        let mut row = format!("{:>4} ", total);
        for up in MIN_UPCARD..=MAX_UPCARD {
            let cell = match State::new(total, up, soft) {
                Ok(s) => {
                    let [hit, stand] = table.action_values(&s);
                    if hit == 0.0 && stand == 0.0 {
                        '.'
                    } else if table.best_action(&s) == PlayerAction::Hit {
                        'H'
                    } else {
                        'S'
                    }
                }
                Err(_) => '?',
            };
            row.push_str(&format!("{:>3}", cell));
        }
        lines.push(row);
    }
    lines
}
