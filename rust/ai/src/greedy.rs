use crate::Policy;
use crate::qtable::QTable;
use crate::state::State;
use blackjack_engine::player::PlayerAction;

/// Always takes the highest-valued action in a borrowed table (ties stand).
///
/// Holds a shared reference, so execution can never write to the table.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPolicy<'a> {
    table: &'a QTable,
}

impl<'a> GreedyPolicy<'a> {
    pub fn new(table: &'a QTable) -> Self {
        Self { table }
    }
}

impl Policy for GreedyPolicy<'_> {
    fn choose_action(&self, state: &State) -> PlayerAction {
        self.table.best_action(state)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}
