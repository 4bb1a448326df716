pub mod analytics;
pub mod compare;
pub mod config;
pub mod error;
pub mod game;
#[cfg(feature = "python")]
mod python;
pub mod round;
pub mod sim;
pub mod stats;
pub mod theory;

pub use crate::compare::{run_comparison, ComparisonReport};
pub use crate::error::{Result, SimError};
pub use crate::game::{available_cards, outcome_cards, Card, GameDefinition, GameVariant};
pub use crate::sim::run_simulation;
pub use crate::stats::{DetailedData, SimulationResult};
pub use crate::theory::TheoreticalEv;

/// Closed-form expected value of a built-in variant at the given bet.
pub fn theoretical_ev(variant: GameVariant, bet: f64) -> Result<TheoreticalEv> {
    sim::check_bet(bet)?;
    Ok(theory::theoretical_ev(&variant.game(), bet))
}
