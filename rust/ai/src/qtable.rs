//! Tabular action-value estimates.

use blackjack_engine::player::PlayerAction;

use crate::state::{STATE_COUNT, State};

/// Expected return for every (state, action) pair.
///
/// Backed by a fixed array over the enumerated state space; entries that
/// were never updated read as `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: [[f64; 2]; STATE_COUNT],
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

impl QTable {
    pub fn new() -> Self {
        Self {
            values: [[0.0; 2]; STATE_COUNT],
        }
    }

    pub fn get(&self, state: &State, action: PlayerAction) -> f64 {
        self.values[state.index()][action.index()]
    }

    pub fn set(&mut self, state: &State, action: PlayerAction, value: f64) {
        self.values[state.index()][action.index()] = value;
    }

    /// Both action values for a state, in `PlayerAction::ALL` order.
    pub fn action_values(&self, state: &State) -> [f64; 2] {
        self.values[state.index()]
    }

    pub fn max_value(&self, state: &State) -> f64 {
        let [hit, stand] = self.action_values(state);
        hit.max(stand)
    }

    /// Greedy action; ties go to `Stand`.
    pub fn best_action(&self, state: &State) -> PlayerAction {
        let [hit, stand] = self.action_values(state);
        if hit > stand {
            PlayerAction::Hit
        } else {
            PlayerAction::Stand
        }
    }

    /// One-step Q-learning update:
    /// `Q(S,A) += alpha * (reward + gamma * max_a Q(S',a) - Q(S,A))`.
    ///
    /// `next` is `None` for terminal transitions, which bootstrap from 0.
    /// Returns the new value of `Q(S,A)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blackjack_ai::qtable::QTable;
    /// use blackjack_ai::state::State;
    /// use blackjack_engine::player::PlayerAction;
    ///
    /// let mut q = QTable::new();
    /// let s = State::new(20, 10, false).unwrap();
    /// let v = q.update(&s, PlayerAction::Stand, 1.0, None, 0.5, 1.0);
    /// assert_eq!(v, 0.5);
    /// ```
    pub fn update(
        &mut self,
        state: &State,
        action: PlayerAction,
        reward: f64,
        next: Option<&State>,
        alpha: f64,
        gamma: f64,
    ) -> f64 {
        let bootstrap = next.map_or(0.0, |s| self.max_value(s));
        let old = self.get(state, action);
        let new = old + alpha * (reward + gamma * bootstrap - old);
        self.set(state, action, new);
        new
    }

    /// All entries in state-index order, hit before stand.
    pub fn iter(&self) -> impl Iterator<Item = (State, PlayerAction, f64)> + '_ {
        State::all().flat_map(move |s| {
            PlayerAction::ALL
                .into_iter()
                .map(move |a| (s, a, self.get(&s, a)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(total: u8, up: u8) -> State {
        State::new(total, up, false).unwrap()
    }

    #[test]
    fn unvisited_states_read_zero_and_prefer_stand() {
        let q = QTable::new();
        let st = s(12, 6);
        assert_eq!(q.action_values(&st), [0.0, 0.0]);
        assert_eq!(q.best_action(&st), PlayerAction::Stand);
    }

    #[test]
    fn best_action_follows_larger_value() {
        let mut q = QTable::new();
        let st = s(12, 6);
        q.set(&st, PlayerAction::Hit, 0.2);
        assert_eq!(q.best_action(&st), PlayerAction::Hit);
        q.set(&st, PlayerAction::Stand, 0.2);
        assert_eq!(q.best_action(&st), PlayerAction::Stand);
    }

    #[test]
    fn self_loop_with_zero_reward_converges_to_state_max() {
        let mut q = QTable::new();
        let st = s(15, 9);
        q.set(&st, PlayerAction::Stand, 0.5);
        for _ in 0..200 {
            q.update(&st, PlayerAction::Hit, 0.0, Some(&st), 0.1, 1.0);
        }
        assert!((q.get(&st, PlayerAction::Hit) - 0.5).abs() < 1e-6);

        // The maximizing action is already a fixed point.
        let before = q.get(&st, PlayerAction::Stand);
        q.update(&st, PlayerAction::Stand, 0.0, Some(&st), 0.1, 1.0);
        assert!((q.get(&st, PlayerAction::Stand) - before).abs() < 1e-12);
    }

    #[test]
    fn terminal_update_moves_toward_reward() {
        let mut q = QTable::new();
        let st = s(16, 10);
        let v = q.update(&st, PlayerAction::Hit, -1.0, None, 0.25, 0.9);
        assert!((v + 0.25).abs() < 1e-12);
        let v = q.update(&st, PlayerAction::Hit, -1.0, None, 0.25, 0.9);
        assert!((v + 0.4375).abs() < 1e-12);
    }

    #[test]
    fn non_terminal_update_discounts_next_state() {
        let mut q = QTable::new();
        let st = s(12, 4);
        let next = s(19, 4);
        q.set(&next, PlayerAction::Stand, 0.8);
        let v = q.update(&st, PlayerAction::Hit, 0.0, Some(&next), 1.0, 0.5);
        assert!((v - 0.4).abs() < 1e-12);
    }

    #[test]
    fn iter_covers_every_pair() {
        let q = QTable::new();
        assert_eq!(q.iter().count(), STATE_COUNT * 2);
    }
}
