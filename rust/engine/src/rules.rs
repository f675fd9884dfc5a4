use serde::{Deserialize, Serialize};

use crate::hand::HandValue;

/// Default total at which the dealer stops drawing.
pub const DEALER_STAND_ON: u8 = 17;

/// Fixed house drawing rule for the dealer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DealerRules {
    /// Dealer stands on this total or higher.
    pub stand_on: u8,
    /// Dealer also hits a soft total equal to `stand_on` ("H17" tables).
    pub hits_soft_17: bool,
}

impl Default for DealerRules {
    fn default() -> Self {
        Self {
            stand_on: DEALER_STAND_ON,
            hits_soft_17: false,
        }
    }
}

impl DealerRules {
    pub fn with_hits_soft_17(hits_soft_17: bool) -> Self {
        Self {
            hits_soft_17,
            ..Self::default()
        }
    }

    /// Decides whether the dealer draws another card.
    ///
    /// # Examples
    ///
    /// ```
    /// use blackjack_engine::hand::HandValue;
    /// use blackjack_engine::rules::DealerRules;
    ///
    /// let soft_17 = HandValue { total: 17, soft: true, bust: false, blackjack: false };
    /// assert!(!DealerRules::default().should_hit(&soft_17));
    /// assert!(DealerRules::with_hits_soft_17(true).should_hit(&soft_17));
    /// ```
    pub fn should_hit(&self, hand: &HandValue) -> bool {
        if hand.bust {
            return false;
        }
        if hand.total < self.stand_on {
            return true;
        }
        self.hits_soft_17 && hand.soft && hand.total == self.stand_on
    }
}
