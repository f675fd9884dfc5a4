//! # Blackjack CLI Library
//!
//! Command-line front end for the Blackjack engine and its Q-learning agent.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, dispatches to a subcommand handler, and maps the
//! result onto an exit code. Output streams are injected so the whole CLI can
//! be driven from tests with in-memory buffers.
//!
//! ## Available Subcommands
//!
//! - `train`: Train a Q-table and save it as a model file
//! - `play`: Play greedy games with a saved model
//! - `eval`: Compare a saved model against a threshold baseline
//! - `policy`: Print the learned hit/stand chart
//! - `deal`: Deal a single round for inspection
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
mod macros;
pub mod ui;

use cli::{BlackjackCli, Commands};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_policy_command, handle_train_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["blackjack", "deal", "--seed", "42"];
/// let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["train", "play", "eval", "policy", "deal", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Blackjack Q-learning CLI");
            write_or_exit!(err, "Usage: blackjack <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: blackjack --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Train(args) => handle_train_command(&args, out, err),
        Commands::Play {
            model,
            games,
            seed,
            output,
        } => handle_play_command(model, games, seed, output, out, err),
        Commands::Eval {
            model,
            games,
            seed,
            baseline,
        } => handle_eval_command(model, games, seed, baseline, out, err),
        Commands::Policy { model } => handle_policy_command(model, out),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            tracing::warn!(reason = %msg, "command interrupted");
            exit_code::INTERRUPTED
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
