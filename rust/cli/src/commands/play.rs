//! Play command handler.
//!
//! Loads a trained model, plays greedy games against the dealer, prints one
//! line per game and a totals block, and optionally writes JSONL records.

use std::io::Write;

use blackjack_ai::executor::{ExecutionConfig, ExecutionReport, play_games};
use blackjack_ai::greedy::GreedyPolicy;
use blackjack_ai::model::Model;
use blackjack_engine::hand::evaluate_hand;
use blackjack_engine::logger::{RoundLogger, RoundRecord};
use blackjack_engine::rules::DealerRules;

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_actions, format_cards, format_value};
use crate::ui;

/// Handle the play command.
///
/// The model is loaded before anything else happens, so a missing or corrupt
/// file fails without creating the output file or dealing a card.
pub fn handle_play_command(
    model: Option<String>,
    games: Option<u64>,
    seed: Option<u64>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let path = model.unwrap_or(cfg.model);
    let games = games.unwrap_or(cfg.games);
    if games == 0 {
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }

    let loaded = Model::load(&path)?;
    let rules = resolve_rules(&loaded, cfg.hits_soft_17, err)?;
    let mut logger = output.as_ref().map(RoundLogger::create).transpose()?;

    let exec = ExecutionConfig {
        games,
        seed: seed.or(cfg.seed),
        rules,
        ..ExecutionConfig::default()
    };
    let policy = GreedyPolicy::new(&loaded.table);

    let mut write_failure: Option<std::io::Error> = None;
    let report = play_games(&policy, &exec, |record| {
        if write_failure.is_some() {
            return;
        }
        let res = writeln!(out, "{}", format_round(record)).and_then(|_| match logger.as_mut() {
            Some(l) => l.write(record),
            None => Ok(()),
        });
        if let Err(e) = res {
            write_failure = Some(e);
        }
    })?;
    if let Some(e) = write_failure {
        return Err(e.into());
    }
    if let Some(l) = logger.as_mut() {
        l.flush()?;
    }

    write_totals(out, &report)?;
    if let Some(p) = output {
        writeln!(out, "Records written to {}", p)?;
    }
    Ok(())
}

/// Dealer rules come from the model; a conflicting configuration only warns.
pub(crate) fn resolve_rules(
    model: &Model,
    configured_h17: bool,
    err: &mut dyn Write,
) -> Result<DealerRules, CliError> {
    let trained = model.meta.dealer_hits_soft_17;
    if trained != configured_h17 {
        ui::display_warning(
            err,
            &format!(
                "model was trained with dealer_hits_soft_17={}, ignoring configured {}",
                trained, configured_h17
            ),
        )?;
    }
    Ok(DealerRules::with_hits_soft_17(trained))
}

fn format_round(r: &RoundRecord) -> String {
    format!(
        "{}  player: {} ({})  dealer: {} ({})  actions: {}  -> {} {:+.1}",
        r.game_id,
        format_cards(&r.player_cards),
        format_value(&evaluate_hand(&r.player_cards)),
        format_cards(&r.dealer_cards),
        format_value(&evaluate_hand(&r.dealer_cards)),
        format_actions(&r.actions),
        r.outcome,
        r.reward
    )
}

fn write_totals(out: &mut dyn Write, report: &ExecutionReport) -> std::io::Result<()> {
    let t = &report.tally;
    let n = report.games();
    writeln!(out, "Games: {} (seed {})", n, report.seed)?;
    writeln!(
        out,
        "Wins: {} ({})  Blackjacks: {}  Pushes: {} ({})  Losses: {} ({})",
        t.wins,
        ui::percent(t.wins, n),
        t.blackjacks,
        t.pushes,
        ui::percent(t.pushes, n),
        t.losses,
        ui::percent(t.losses, n)
    )?;
    writeln!(
        out,
        "Net reward: {:+.1} ({:+.4} per game)",
        report.net_reward,
        report.mean_reward()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_ai::model::ModelMeta;
    use blackjack_ai::qtable::QTable;

    fn model(h17: bool) -> Model {
        Model::new(
            QTable::new(),
            ModelMeta {
                dealer_hits_soft_17: h17,
                ..ModelMeta::default()
            },
        )
    }

    #[test]
    fn matching_rules_do_not_warn() {
        let mut err = Vec::new();
        let rules = resolve_rules(&model(false), false, &mut err).unwrap();
        assert!(!rules.hits_soft_17);
        assert!(err.is_empty());
    }

    #[test]
    fn model_rules_win_over_configuration() {
        let mut err = Vec::new();
        let rules = resolve_rules(&model(true), false, &mut err).unwrap();
        assert!(rules.hits_soft_17);
        assert!(String::from_utf8(err).unwrap().starts_with("WARNING:"));
    }
}
