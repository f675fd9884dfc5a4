use serde::{Deserialize, Serialize};

use crate::hand::HandValue;

/// Terminal result of a round from the player's point of view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Natural (two-card 21) against a dealer without one
    Blackjack,
    Win,
    Push,
    Loss,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Blackjack => "blackjack",
            Outcome::Win => "win",
            Outcome::Push => "push",
            Outcome::Loss => "loss",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compares finished hands and decides the round.
///
/// Order of precedence: player bust loses (even if the dealer also busts),
/// naturals beat everything else, dealer bust wins, then higher total wins.
pub fn settle(player: &HandValue, dealer: &HandValue) -> Outcome {
    if player.bust {
        return Outcome::Loss;
    }
    match (player.blackjack, dealer.blackjack) {
        (true, true) => return Outcome::Push,
        (true, false) => return Outcome::Blackjack,
        (false, true) => return Outcome::Loss,
        (false, false) => {}
    }
    if dealer.bust {
        return Outcome::Win;
    }
    match player.total.cmp(&dealer.total) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Equal => Outcome::Push,
        std::cmp::Ordering::Less => Outcome::Loss,
    }
}

/// Running win/push/loss tally across many rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: u64,
    pub blackjacks: u64,
    pub pushes: u64,
    pub losses: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Blackjack => self.blackjacks += 1,
            Outcome::Win => self.wins += 1,
            Outcome::Push => self.pushes += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    pub fn rounds(&self) -> u64 {
        self.wins + self.blackjacks + self.pushes + self.losses
    }

    /// Fraction of rounds the player won, naturals included.
    pub fn win_rate(&self) -> f64 {
        let n = self.rounds();
        if n == 0 {
            0.0
        } else {
            (self.wins + self.blackjacks) as f64 / n as f64
        }
    }
}
