//! Training command handler.
//!
//! Resolves hyperparameters (configuration layered under flags), runs the
//! Q-learning trainer, saves the model, and prints a summary.
//!
//! # Environment Variables
//!
//! - `BLACKJACK_TRAIN_BREAK_AFTER`: stop after N episodes as if interrupted,
//!   saving the partial model and exiting with code 130

use std::io::Write;

use blackjack_ai::model::Model;
use blackjack_ai::qtable::QTable;
use blackjack_ai::schedule::{DecayKind, EpsilonSchedule};
use blackjack_ai::trainer::{ConvergenceCheck, Trainer, TrainingConfig};
use blackjack_engine::rules::DealerRules;

use crate::cli::{ScheduleKind, TrainArgs};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

const DEFAULT_EXPONENTIAL_RATE: f64 = 0.9995;

/// Handle the train command.
///
/// # Errors
///
/// `CliError::Config` for invalid hyperparameters, `CliError::Model` when
/// the model cannot be written, `CliError::Interrupted` when training was
/// cut short by `BLACKJACK_TRAIN_BREAK_AFTER`.
pub fn handle_train_command(
    args: &TrainArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut cfg = config::load()?;
    apply_flags(&mut cfg, args);
    cfg.validate()?;

    let schedule = build_schedule(args.schedule, &cfg, args.decay)?;
    let mut training = TrainingConfig {
        episodes: cfg.episodes,
        learning_rate: cfg.learning_rate,
        discount: cfg.discount,
        schedule,
        rules: DealerRules::with_hits_soft_17(cfg.hits_soft_17),
        seed: cfg.seed,
        log_interval: args.log_interval,
        convergence: args.converge_window.map(|window| ConvergenceCheck {
            window,
            ..ConvergenceCheck::default()
        }),
        ..TrainingConfig::default()
    };

    let requested = training.episodes;
    let break_after = std::env::var("BLACKJACK_TRAIN_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|b| *b < requested);
    if let Some(b) = break_after {
        training.episodes = b;
    }

    let output = args.output.clone().unwrap_or_else(|| cfg.model.clone());
    let mut table = QTable::new();
    let mut trainer = Trainer::new(training);
    let report = trainer.train(&mut table)?;
    let meta = report.model_meta(trainer.config());
    Model::new(table, meta).save(&output)?;

    let t = &report.tally;
    writeln!(out, "Trained {} episodes (seed {})", report.episodes, report.seed)?;
    writeln!(
        out,
        "Wins: {}  Blackjacks: {}  Pushes: {}  Losses: {}",
        t.wins, t.blackjacks, t.pushes, t.losses
    )?;
    writeln!(
        out,
        "Win rate: {}",
        ui::percent(t.wins + t.blackjacks, t.rounds())
    )?;
    writeln!(out, "Final epsilon: {:.4}", report.final_epsilon)?;
    if let Some(at) = report.converged_at {
        writeln!(out, "Converged at episode {}", at)?;
    }
    writeln!(out, "Model saved to {}", output)?;

    if break_after.is_some() {
        let msg = format!("saved {}/{} episodes", report.episodes, requested);
        ui::display_warning(err, &format!("training interrupted, {}", msg))?;
        return Err(CliError::Interrupted(msg));
    }
    Ok(())
}

fn apply_flags(cfg: &mut Config, args: &TrainArgs) {
    if let Some(v) = args.episodes {
        cfg.episodes = v;
    }
    if let Some(v) = args.alpha {
        cfg.learning_rate = v;
    }
    if let Some(v) = args.gamma {
        cfg.discount = v;
    }
    if let Some(v) = args.epsilon_start {
        cfg.epsilon_start = v;
    }
    if let Some(v) = args.epsilon_floor {
        cfg.epsilon_floor = v;
    }
    if args.hits_soft_17 {
        cfg.hits_soft_17 = true;
    }
    if args.no_hits_soft_17 {
        cfg.hits_soft_17 = false;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
}

fn build_schedule(
    kind: ScheduleKind,
    cfg: &Config,
    decay: Option<f64>,
) -> Result<EpsilonSchedule, CliError> {
    let kind = match kind {
        ScheduleKind::Constant => DecayKind::Constant,
        ScheduleKind::Exponential => DecayKind::Exponential {
            rate: decay.unwrap_or(DEFAULT_EXPONENTIAL_RATE),
        },
        ScheduleKind::Linear => {
            let episodes = decay.unwrap_or(cfg.episodes as f64);
            if !(episodes.is_finite() && episodes >= 0.0) {
                return Err(CliError::InvalidInput(format!(
                    "--decay for the linear schedule must be a number of episodes, got {}",
                    episodes
                )));
            }
            DecayKind::Linear {
                decay_episodes: episodes as u64,
            }
        }
    };
    Ok(EpsilonSchedule::new(cfg.epsilon_start, cfg.epsilon_floor, kind)?)
}
