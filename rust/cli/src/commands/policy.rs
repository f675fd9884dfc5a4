//! Policy chart command: prints the greedy action for every state.

use std::io::Write;

use blackjack_ai::model::Model;

use crate::config;
use crate::error::CliError;
use crate::formatters::strategy_chart;

/// Handle the policy command.
///
/// Prints a hard-total chart and a soft-total chart. `H` is hit, `S` is
/// stand, `.` is a state the model has no information about.
pub fn handle_policy_command(model: Option<String>, out: &mut dyn Write) -> Result<(), CliError> {
    let path = match model {
        Some(p) => p,
        None => config::load()?.model,
    };
    let loaded = Model::load(&path)?;
    let meta = &loaded.meta;

    writeln!(
        out,
        "Model: {} ({} episodes, alpha {}, gamma {}, dealer hits soft 17: {})",
        path, meta.episodes, meta.learning_rate, meta.discount, meta.dealer_hits_soft_17
    )?;
    writeln!(out)?;
    writeln!(out, "Hard totals")?;
    for line in strategy_chart(&loaded.table, false) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    writeln!(out, "Soft totals")?;
    for line in strategy_chart(&loaded.table, true) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
