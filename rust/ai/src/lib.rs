//! # blackjack-ai: Learning Agent for Blackjack
//!
//! Tabular Q-learning on top of `blackjack-engine`: state encoding, the
//! action-value table and its file format, exploration schedules, the
//! training loop, and the greedy execution loop.
//!
//! ## Core Components
//!
//! - [`Policy`] - Trait for anything that picks hit or stand in a state
//! - [`state`] - Encodes (player total, dealer up-card, usable ace) into a flat index
//! - [`qtable`] - Fixed-size action-value table with the one-step TD update
//! - [`model`] - Versioned JSON persistence for trained tables
//! - [`schedule`] - Epsilon decay schedules
//! - [`trainer`] - Episode simulation and learning
//! - [`executor`] - Greedy replay against the dealer
//! - [`baseline`] - Threshold baseline for comparison
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_ai::executor::{play_games, ExecutionConfig};
//! use blackjack_ai::greedy::GreedyPolicy;
//! use blackjack_ai::qtable::QTable;
//! use blackjack_ai::trainer::{Trainer, TrainingConfig};
//!
//! let mut table = QTable::new();
//! let config = TrainingConfig { episodes: 500, seed: Some(7), ..TrainingConfig::default() };
//! let report = Trainer::new(config).train(&mut table).expect("training failed");
//! assert_eq!(report.episodes, 500);
//!
//! let policy = GreedyPolicy::new(&table);
//! let exec = ExecutionConfig { games: 100, seed: Some(7), ..ExecutionConfig::default() };
//! let summary = play_games(&policy, &exec, |_| {}).expect("execution failed");
//! assert_eq!(summary.tally.rounds(), 100);
//! ```

use blackjack_engine::player::PlayerAction;

pub mod baseline;
pub mod errors;
pub mod executor;
pub mod greedy;
pub mod model;
pub mod qtable;
pub mod reward;
pub mod schedule;
pub mod state;
pub mod trainer;

use errors::PolicyError;
use qtable::QTable;
use state::State;

/// Trait defining the interface for hit/stand decision makers.
///
/// # Example Implementation
///
/// ```rust
/// use blackjack_ai::Policy;
/// use blackjack_ai::state::State;
/// use blackjack_engine::player::PlayerAction;
///
/// struct AlwaysStand;
///
/// impl Policy for AlwaysStand {
///     fn choose_action(&self, _state: &State) -> PlayerAction {
///         PlayerAction::Stand
///     }
///
///     fn name(&self) -> &str {
///         "always-stand"
///     }
/// }
/// ```
pub trait Policy: Send + Sync {
    /// Pick an action for a non-terminal state.
    fn choose_action(&self, state: &State) -> PlayerAction;

    /// Return the name/identifier of this policy.
    fn name(&self) -> &str;
}

/// Factory function to create policies by type string.
///
/// # Supported Policy Types
///
/// - `"greedy"` - argmax over `table` (requires a table)
/// - `"threshold"` - stand on 17 or more
/// - `"threshold:N"` - stand on N or more
///
/// # Example
///
/// ```rust
/// use blackjack_ai::create_policy;
///
/// let p = create_policy("threshold:15", None).unwrap();
/// assert_eq!(p.name(), "threshold");
/// assert!(create_policy("greedy", None).is_err());
/// assert!(create_policy("mystery", None).is_err());
/// ```
pub fn create_policy<'a>(
    policy_type: &str,
    table: Option<&'a QTable>,
) -> Result<Box<dyn Policy + 'a>, PolicyError> {
    match policy_type.split_once(':') {
        None if policy_type == "greedy" => table
            .map(|t| Box::new(greedy::GreedyPolicy::new(t)) as Box<dyn Policy + 'a>)
            .ok_or_else(|| PolicyError::MissingTable(policy_type.to_string())),
        None if policy_type == "threshold" => Ok(Box::new(baseline::ThresholdPolicy::default())),
        Some(("threshold", n)) => n
            .parse::<u8>()
            .ok()
            .filter(|n| (state::MIN_PLAYER_TOTAL..=state::MAX_PLAYER_TOTAL + 1).contains(n))
            .map(|n| Box::new(baseline::ThresholdPolicy::new(n)) as Box<dyn Policy + 'a>)
            .ok_or_else(|| PolicyError::Unknown(policy_type.to_string())),
        _ => Err(PolicyError::Unknown(policy_type.to_string())),
    }
}
