//! Command-line argument definitions (clap derive).
//!
//! Every hyperparameter flag is optional: when absent the value comes from
//! the resolved configuration (defaults, `BLACKJACK_CONFIG` file, then
//! `BLACKJACK_*` environment variables).

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Blackjack simulator with a tabular Q-learning agent"
)]
pub struct BlackjackCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a Q-table by self-play against the dealer and save it
    Train(TrainArgs),
    /// Play greedy games with a saved model
    Play {
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        games: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Write one JSON record per game to this file
        #[arg(long)]
        output: Option<String>,
    },
    /// Compare a saved model against the threshold baseline on the same deals
    Eval {
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        games: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Baseline stands on this total or more
        #[arg(long, default_value_t = 17, value_parser = clap::value_parser!(u8).range(4..=22))]
        baseline: u8,
    },
    /// Print the learned hit/stand chart
    Policy {
        #[arg(long)]
        model: Option<String>,
    },
    /// Deal one round and show the hands and the encoded state
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show resolved configuration with value sources
    Cfg,
}

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    #[arg(long)]
    pub episodes: Option<u64>,
    /// Learning rate
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Discount factor
    #[arg(long)]
    pub gamma: Option<f64>,
    #[arg(long)]
    pub epsilon_start: Option<f64>,
    #[arg(long)]
    pub epsilon_floor: Option<f64>,
    #[arg(long, value_enum, default_value_t = ScheduleKind::Exponential)]
    pub schedule: ScheduleKind,
    /// Per-episode rate for `exponential`, decay length in episodes for `linear`
    #[arg(long)]
    pub decay: Option<f64>,
    /// Dealer hits soft 17
    #[arg(long)]
    pub hits_soft_17: bool,
    /// Dealer stands on soft 17, even if configuration says otherwise
    #[arg(long, conflicts_with = "hits_soft_17")]
    pub no_hits_soft_17: bool,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Model file to write
    #[arg(long)]
    pub output: Option<String>,
    /// Log progress every N episodes (0 disables)
    #[arg(long, default_value_t = 10_000)]
    pub log_interval: u64,
    /// Stop early once the win rate is flat over windows of this many episodes
    #[arg(long)]
    pub converge_window: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScheduleKind {
    Exponential,
    Linear,
    Constant,
}
