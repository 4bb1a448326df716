use crate::error::{Result, SimError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Bettable cards shared by both variants, in table order.
pub const CARDS: [&str; 6] = ["9", "10", "J", "Q", "K", "A"];

/// House-only outcome added by the tweaked variant.
pub const JOKER: &str = "Joker";

pub const BALLS_PER_ROUND: u8 = 3;

/// Hit count -> multiplier of the bet.
pub const PAYOUTS: [(u8, f64); 4] = [(0, -1.0), (1, 1.0), (2, 2.0), (3, 3.0)];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(String);

impl Card {
    pub fn new(label: impl Into<String>) -> Self {
        Card(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Card {
    fn from(label: &str) -> Self {
        Card::new(label)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PayoutStructure {
    multipliers: BTreeMap<u8, f64>,
}

impl PayoutStructure {
    pub fn new(entries: impl IntoIterator<Item = (u8, f64)>) -> Self {
        PayoutStructure {
            multipliers: entries.into_iter().collect(),
        }
    }

    pub fn multiplier(&self, hits: u8) -> Option<f64> {
        self.multipliers.get(&hits).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.multipliers.iter().map(|(&h, &m)| (h, m))
    }

    fn covers(&self, balls: u8) -> bool {
        (0..=balls).all(|h| self.multipliers.contains_key(&h))
    }
}

impl Default for PayoutStructure {
    fn default() -> Self {
        PayoutStructure::new(PAYOUTS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameVariant {
    Fair,
    Tweaked,
}

impl GameVariant {
    pub const ALL: [GameVariant; 2] = [GameVariant::Fair, GameVariant::Tweaked];

    pub fn name(self) -> &'static str {
        match self {
            GameVariant::Fair => "fair",
            GameVariant::Tweaked => "tweaked",
        }
    }

    /// Builds a fresh, independent game for this variant.
    pub fn game(self) -> GameDefinition {
        match self {
            GameVariant::Fair => GameDefinition::fair(),
            GameVariant::Tweaked => GameDefinition::tweaked(),
        }
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameVariant {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fair" => Ok(GameVariant::Fair),
            "tweaked" => Ok(GameVariant::Tweaked),
            other => Err(SimError::InvalidParameter(format!(
                "unsupported game variant '{other}' (expected 'fair' or 'tweaked')"
            ))),
        }
    }
}

/// Cards a player may bet on.
pub fn available_cards(variant: GameVariant) -> Vec<Card> {
    variant.game().bettable
}

/// Every card a ball can land on, house-only outcomes included.
pub fn outcome_cards(variant: GameVariant) -> Vec<Card> {
    variant.game().outcomes
}

/// Immutable rule set of one game variant. Balls land uniformly over `outcomes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameDefinition {
    name: String,
    bettable: Vec<Card>,
    outcomes: Vec<Card>,
    balls_per_round: u8,
    payouts: PayoutStructure,
}

impl GameDefinition {
    pub fn new(
        name: impl Into<String>,
        bettable: Vec<Card>,
        house_only: Vec<Card>,
        balls_per_round: u8,
        payouts: PayoutStructure,
    ) -> Result<Self> {
        let name = name.into();
        if bettable.is_empty() {
            return Err(SimError::InvalidParameter(format!(
                "game '{name}' has no bettable cards"
            )));
        }
        if balls_per_round == 0 {
            return Err(SimError::InvalidParameter(format!(
                "game '{name}' must drop at least one ball per round"
            )));
        }
        if !payouts.covers(balls_per_round) {
            return Err(SimError::InvalidParameter(format!(
                "game '{name}' payout table must cover every hit count 0..={balls_per_round}"
            )));
        }
        if payouts.iter().any(|(_, m)| !m.is_finite()) {
            return Err(SimError::InvalidParameter(format!(
                "game '{name}' payout multipliers must be finite"
            )));
        }

        let outcomes: Vec<Card> = bettable.iter().chain(house_only.iter()).cloned().collect();
        let mut seen = HashSet::new();
        if let Some(dup) = outcomes.iter().find(|c| !seen.insert(*c)) {
            return Err(SimError::InvalidParameter(format!(
                "game '{name}' lists card '{dup}' more than once"
            )));
        }

        Ok(GameDefinition {
            name,
            bettable,
            outcomes,
            balls_per_round,
            payouts,
        })
    }

    pub fn fair() -> Self {
        Self::standard(GameVariant::Fair, &[])
    }

    pub fn tweaked() -> Self {
        Self::standard(GameVariant::Tweaked, &[JOKER])
    }

    // The built-in tables are checked once in tests rather than on every construction.
    fn standard(variant: GameVariant, house_only: &[&str]) -> Self {
        let bettable: Vec<Card> = CARDS.iter().map(|&c| Card::from(c)).collect();
        let outcomes = bettable
            .iter()
            .cloned()
            .chain(house_only.iter().map(|&c| Card::from(c)))
            .collect();
        GameDefinition {
            name: variant.name().to_string(),
            bettable,
            outcomes,
            balls_per_round: BALLS_PER_ROUND,
            payouts: PayoutStructure::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bettable(&self) -> &[Card] {
        &self.bettable
    }

    pub fn outcomes(&self) -> &[Card] {
        &self.outcomes
    }

    pub fn balls_per_round(&self) -> u8 {
        self.balls_per_round
    }

    pub fn payouts(&self) -> &PayoutStructure {
        &self.payouts
    }

    /// Probability that a single ball lands on any given card.
    pub fn single_ball_probability(&self) -> f64 {
        1.0 / self.outcomes.len() as f64
    }

    pub fn is_bettable(&self, card: &Card) -> bool {
        self.bettable.contains(card)
    }

    pub fn check_choice(&self, card: &Card) -> Result<()> {
        if self.is_bettable(card) {
            Ok(())
        } else {
            Err(SimError::InvalidChoice {
                card: card.to_string(),
                variant: self.name.clone(),
            })
        }
    }

    pub(crate) fn multiplier(&self, hits: u8) -> f64 {
        // Every hit count up to balls_per_round is present after construction.
        self.payouts.multiplier(hits).unwrap_or(0.0)
    }

    /// Lands one ball uniformly over the full outcome set.
    pub fn draw<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a Card {
        &self.outcomes[rng.gen_range(0..self.outcomes.len())]
    }
}
