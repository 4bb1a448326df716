use crate::game::Card;
use serde::Serialize;
use std::collections::BTreeMap;

/// Upper bound on rounds reserved up front; longer runs grow the series as they go.
pub(crate) const PREALLOC_ROUNDS: usize = 1 << 20;

/// Per-round series, only collected for detailed runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailedData {
    pub cumulative_profit: Vec<f64>,
    pub per_round_payouts: Vec<f64>,
    /// Balls landed per outcome, every outcome listed.
    pub card_frequencies: BTreeMap<Card, u64>,
    /// Rounds in which a card took exactly one ball.
    pub single_hit_cards: BTreeMap<Card, u64>,
    pub double_hit_cards: BTreeMap<Card, u64>,
    pub triple_hit_cards: BTreeMap<Card, u64>,
}

impl DetailedData {
    pub(crate) fn new(outcomes: &[Card], rounds: usize) -> Self {
        let reserve = rounds.min(PREALLOC_ROUNDS);
        Self {
            cumulative_profit: Vec::with_capacity(reserve),
            per_round_payouts: Vec::with_capacity(reserve),
            card_frequencies: outcomes.iter().map(|c| (c.clone(), 0)).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, drawn: &[&Card], payout: f64) {
        let running = self.cumulative_profit.last().copied().unwrap_or(0.0) + payout;
        self.cumulative_profit.push(running);
        self.per_round_payouts.push(payout);

        let mut landed: BTreeMap<&Card, u8> = BTreeMap::new();
        for &card in drawn {
            *self.card_frequencies.entry(card.clone()).or_insert(0) += 1;
            *landed.entry(card).or_insert(0) += 1;
        }
        for (card, count) in landed {
            let bucket = match count {
                1 => &mut self.single_hit_cards,
                2 => &mut self.double_hit_cards,
                3 => &mut self.triple_hit_cards,
                _ => continue,
            };
            *bucket.entry(card.clone()).or_insert(0) += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub total_profit: f64,
    pub average_return_per_play: f64,
    pub win_rate: f64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
    pub rounds: u64,
    /// Hit count -> rounds, every possible hit count listed.
    pub hits_distribution: BTreeMap<u8, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_data: Option<DetailedData>,
}

impl SimulationResult {
    pub(crate) fn new(max_hits: u8) -> Self {
        Self {
            total_profit: 0.0,
            average_return_per_play: 0.0,
            win_rate: 0.0,
            wins: 0,
            losses: 0,
            pushes: 0,
            rounds: 0,
            hits_distribution: (0..=max_hits).map(|h| (h, 0)).collect(),
            detailed_data: None,
        }
    }

    pub(crate) fn finish(&mut self) {
        if self.rounds > 0 {
            let n = self.rounds as f64;
            self.win_rate = self.wins as f64 / n;
            self.average_return_per_play = self.total_profit / n;
        }
    }

    pub fn per_round_payouts(&self) -> Option<&[f64]> {
        self.detailed_data
            .as_ref()
            .map(|d| d.per_round_payouts.as_slice())
    }
}
