//! Command handler modules for the `blackjack` CLI.
//!
//! Each subcommand lives in its own module and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, taking its output
//! streams as `&mut dyn Write` so tests can capture them.

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod play;
pub mod policy;
pub mod train;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use policy::handle_policy_command;
pub use train::handle_train_command;
