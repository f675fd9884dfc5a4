//! Deal command handler: one round dealt for inspection.
//!
//! Shows both opening hands, the dealer's hole card face down, and the state
//! the agent would see. Rounds with a natural are settled on the spot.

use crate::error::CliError;
use crate::formatters::{format_card, format_cards, format_value};
use blackjack_ai::state::State;
use blackjack_engine::engine::Engine;
use blackjack_engine::errors::GameError;
use blackjack_engine::rules::DealerRules;
use std::io::Write;

/// Handle the deal command.
///
/// # Examples
///
/// ```ignore
/// let mut out = Vec::new();
/// handle_deal_command(Some(42), &mut out).unwrap();
/// ```
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let mut eng = Engine::new(Some(base_seed), DealerRules::default());
    let settled = eng.start_round()?;

    let player = eng.player_hand();
    let dealer = eng.dealer_hand();
    let upcard = eng.dealer_upcard().ok_or(GameError::NoRoundInProgress)?;

    writeln!(out, "Seed: {}", base_seed)?;
    writeln!(
        out,
        "Player: {} ({})",
        format_cards(player.cards()),
        format_value(&player.value())
    )?;
    match settled {
        Some(outcome) => {
            writeln!(
                out,
                "Dealer: {} ({})",
                format_cards(dealer.cards()),
                format_value(&dealer.value())
            )?;
            writeln!(out, "Settled on the deal: {}", outcome)?;
        }
        None => {
            writeln!(out, "Dealer: {} [hidden]", format_card(&upcard))?;
            let state = State::encode(&player.value(), upcard)?;
            writeln!(out, "State: {} (index {})", state, state.index())?;
        }
    }
    Ok(())
}
