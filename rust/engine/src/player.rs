use serde::{Deserialize, Serialize};

/// A player decision at a Blackjack decision point.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerAction {
    /// Take another card
    Hit,
    /// Keep the current hand and end the turn
    Stand,
}

impl PlayerAction {
    /// Both actions in table order.
    pub const ALL: [PlayerAction; 2] = [PlayerAction::Hit, PlayerAction::Stand];

    /// Column index used by flat action-value tables.
    pub fn index(self) -> usize {
        match self {
            PlayerAction::Hit => 0,
            PlayerAction::Stand => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerAction::Hit => "hit",
            PlayerAction::Stand => "stand",
        }
    }
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

