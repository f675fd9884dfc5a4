use blackjack_engine::game::Outcome;
use serde::{Deserialize, Serialize};

/// Terminal payoff for each round outcome. Non-terminal transitions pay 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    pub win: f64,
    /// Natural two-card 21 against a dealer without one
    pub blackjack: f64,
    pub push: f64,
    pub loss: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            win: 1.0,
            blackjack: 1.5,
            push: 0.0,
            loss: -1.0,
        }
    }
}

impl RewardConfig {
    pub fn reward(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Blackjack => self.blackjack,
            Outcome::Win => self.win,
            Outcome::Push => self.push,
            Outcome::Loss => self.loss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Defaults: +1 win, +1.5 natural, 0 push, -1 loss.
    #[test]
    fn default_payoffs() {
        let r = RewardConfig::default();
        assert_eq!(r.reward(Outcome::Win), 1.0);
        assert_eq!(r.reward(Outcome::Blackjack), 1.5);
        assert_eq!(r.reward(Outcome::Push), 0.0);
        assert_eq!(r.reward(Outcome::Loss), -1.0);
    }
}
