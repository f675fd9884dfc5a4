//! Policy evaluation command.
//!
//! Plays the greedy model and a fixed-threshold baseline on paired deals:
//! game `i` of both runs opens with the same cards (deck seeded with
//! `seed + i`, same rules). Prints a side-by-side comparison.

use std::io::Write;

use blackjack_ai::create_policy;
use blackjack_ai::executor::{ExecutionConfig, ExecutionReport, play_games};
use blackjack_ai::model::Model;

use crate::commands::play::resolve_rules;
use crate::config;
use crate::error::CliError;
use crate::ui;

/// Handle the eval command.
///
/// # Arguments
///
/// * `model` - Model path, defaulting to the configured one
/// * `games` - Games per policy
/// * `seed` - Shared seed; drawn at random and printed when absent
/// * `baseline` - Threshold the baseline stands on
pub fn handle_eval_command(
    model: Option<String>,
    games: Option<u64>,
    seed: Option<u64>,
    baseline: u8,
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
    let exec = ExecutionConfig {
        games,
        // Pin the seed so both runs share it
        seed: Some(seed.or(cfg.seed).unwrap_or_else(rand::random)),
        rules,
        paired_deals: true,
        ..ExecutionConfig::default()
    };

    let greedy = create_policy("greedy", Some(&loaded.table))?;
    let threshold = create_policy(&format!("threshold:{}", baseline), None)?;
    let a = play_games(greedy.as_ref(), &exec, |_| {})?;
    let b = play_games(threshold.as_ref(), &exec, |_| {})?;

    writeln!(out, "Evaluation: {} games per policy (seed {})", games, a.seed)?;
    writeln!(
        out,
        "{:<16} {:>8} {:>8} {:>8} {:>10} {:>12}",
        "policy", "win", "push", "loss", "blackjack", "reward/game"
    )?;
    write_row(out, "greedy", &a)?;
    write_row(out, &format!("threshold:{}", baseline), &b)?;
    writeln!(
        out,
        "Difference (greedy - threshold): {:+.4} per game",
        a.mean_reward() - b.mean_reward()
    )?;
    Ok(())
}

fn write_row(out: &mut dyn Write, name: &str, r: &ExecutionReport) -> std::io::Result<()> {
    let t = &r.tally;
    let n = r.games();
    writeln!(
        out,
        "{:<16} {:>8} {:>8} {:>8} {:>10} {:>+12.4}",
        name,
        ui::percent(t.wins + t.blackjacks, n),
        ui::percent(t.pushes, n),
        ui::percent(t.losses, n),
        t.blackjacks,
        r.mean_reward()
    )
}
