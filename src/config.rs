use crate::error::{Result, SimError};
use crate::game::{Card, GameVariant};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CARD: &str = "10";
pub const DEFAULT_ROUNDS: i64 = 10_000;
pub const DEFAULT_BET: f64 = 1.0;
pub const DEFAULT_SEED: i64 = 42;

/// Any signed seed maps onto the engine's `u64` seed space one to one.
pub fn engine_seed(seed: i64) -> u64 {
    seed as u64
}

/// What to run: a single variant or both side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Single(GameVariant),
    Compare,
}

impl FromStr for Mode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("compare") {
            Ok(Mode::Compare)
        } else {
            s.parse().map(Mode::Single)
        }
    }
}

/// Raw request as read from JSON or the command line. Signed fields so that
/// bad input is reported instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationRequest {
    pub game: String,
    pub chosen_card: String,
    pub num_rounds: i64,
    pub bet_amount: f64,
    pub seed: Option<i64>,
    pub detailed: bool,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            game: "compare".to_string(),
            chosen_card: DEFAULT_CARD.to_string(),
            num_rounds: DEFAULT_ROUNDS,
            bet_amount: DEFAULT_BET,
            seed: Some(DEFAULT_SEED),
            detailed: true,
        }
    }
}

/// Checked parameters ready to hand to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub mode: Mode,
    pub chosen_card: Card,
    pub rounds: usize,
    pub bet: f64,
    pub seed: Option<u64>,
    pub detailed: bool,
}

impl SimulationRequest {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn validate(&self) -> Result<SimulationParams> {
        let mode = self.game.parse()?;
        let rounds = usize::try_from(self.num_rounds).map_err(|_| {
            SimError::InvalidParameter(format!(
                "round count must be non-negative, got {}",
                self.num_rounds
            ))
        })?;
        crate::sim::check_bet(self.bet_amount)?;

        Ok(SimulationParams {
            mode,
            chosen_card: Card::new(self.chosen_card.trim()),
            rounds,
            bet: self.bet_amount,
            seed: self.seed.map(engine_seed),
            detailed: self.detailed,
        })
    }
}
