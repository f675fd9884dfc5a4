//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value paired with where
//! it came from (`default`, `file`, or `env`).
//!
//! ```json
//! {
//!   "episodes": { "value": 50000, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "seed": { "value": config.seed, "source": sources.seed },
        "episodes": { "value": config.episodes, "source": sources.episodes },
        "games": { "value": config.games, "source": sources.games },
        "learning_rate": { "value": config.learning_rate, "source": sources.learning_rate },
        "discount": { "value": config.discount, "source": sources.discount },
        "epsilon_start": { "value": config.epsilon_start, "source": sources.epsilon_start },
        "epsilon_floor": { "value": config.epsilon_floor, "source": sources.epsilon_floor },
        "hits_soft_17": { "value": config.hits_soft_17, "source": sources.hits_soft_17 },
        "model": { "value": config.model, "source": sources.model },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
