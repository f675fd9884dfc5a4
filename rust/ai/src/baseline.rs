//! Fixed-threshold baseline policy.
//!
//! Mirrors the dealer: draw below a total, stand at or above it. Useful as a
//! yardstick when judging how much a trained table actually learned.

use crate::Policy;
use crate::state::State;
use blackjack_engine::player::PlayerAction;
use blackjack_engine::rules::DEALER_STAND_ON;

/// Hits below `stand_on`, stands otherwise. Ignores the dealer's up-card.
///
/// # Example
///
/// ```rust
/// use blackjack_ai::Policy;
/// use blackjack_ai::baseline::ThresholdPolicy;
/// use blackjack_ai::state::State;
/// use blackjack_engine::player::PlayerAction;
///
/// let p = ThresholdPolicy::new(17);
/// let s = State::new(16, 10, false).unwrap();
/// assert_eq!(p.choose_action(&s), PlayerAction::Hit);
/// assert_eq!(p.name(), "threshold");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ThresholdPolicy {
    stand_on: u8,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(DEALER_STAND_ON)
    }
}

impl ThresholdPolicy {
    pub fn new(stand_on: u8) -> Self {
        Self { stand_on }
    }
}

impl Policy for ThresholdPolicy {
    fn choose_action(&self, state: &State) -> PlayerAction {
        if state.player_total() < self.stand_on {
            PlayerAction::Hit
        } else {
            PlayerAction::Stand
        }
    }

    fn name(&self) -> &str {
        "threshold"
    }
}
