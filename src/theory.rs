//! Closed-form expected value of a game, independent of any simulation.
//!
//! Each ball lands on the chosen card with probability `p = 1 / outcomes`, so the
//! hit count of a round is binomial over the balls dropped.

use crate::game::{GameDefinition, GameVariant};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvContribution {
    pub hits: u8,
    pub probability: f64,
    pub payout: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TheoreticalEv {
    pub total_ev: f64,
    /// `None` when the bet is zero.
    pub house_edge: Option<f64>,
    pub bet_amount: f64,
    pub breakdown: Vec<EvContribution>,
}

/// Headline figures per variant at a unit bet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub variant: GameVariant,
    pub cards: usize,
    /// Chance in percent that one ball lands on the chosen card.
    pub probability: f64,
    pub ev: f64,
    pub house_edge: f64,
}

fn binomial(n: u8, k: u8) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * f64::from(n - i) / f64::from(i + 1))
}

pub fn hit_probability(game: &GameDefinition, hits: u8) -> f64 {
    let n = game.balls_per_round();
    if hits > n {
        return 0.0;
    }
    let p = game.single_ball_probability();
    binomial(n, hits) * p.powi(i32::from(hits)) * (1.0 - p).powi(i32::from(n - hits))
}

pub fn theoretical_ev(game: &GameDefinition, bet: f64) -> TheoreticalEv {
    let breakdown: Vec<EvContribution> = (0..=game.balls_per_round())
        .map(|hits| {
            let probability = hit_probability(game, hits);
            let payout = game.multiplier(hits) * bet;
            EvContribution {
                hits,
                probability,
                payout,
                contribution: probability * payout,
            }
        })
        .collect();
    let total_ev = breakdown.iter().map(|c| c.contribution).sum();

    TheoreticalEv {
        total_ev,
        house_edge: house_edge(total_ev, bet),
        bet_amount: bet,
        breakdown,
    }
}

/// `-(ev / bet) * 100`, undefined for a zero bet.
pub fn house_edge(ev: f64, bet: f64) -> Option<f64> {
    (bet != 0.0).then(|| -(ev / bet) * 100.0)
}

pub fn summary(variant: GameVariant) -> GameSummary {
    let game = variant.game();
    let ev = theoretical_ev(&game, 1.0).total_ev;
    GameSummary {
        variant,
        cards: game.outcomes().len(),
        probability: game.single_ball_probability() * 100.0,
        ev,
        house_edge: -ev * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Card, PayoutStructure, CARDS};

    const EPS: f64 = 1e-12;

    #[test]
    fn fair_ev_matches_hand_computation() {
        let ev = theoretical_ev(&GameDefinition::fair(), 1.0);
        assert!((ev.total_ev - (-17.0 / 216.0)).abs() < EPS);
        let probs: Vec<f64> = ev.breakdown.iter().map(|c| c.probability).collect();
        let expected = [125.0 / 216.0, 75.0 / 216.0, 15.0 / 216.0, 1.0 / 216.0];
        for (got, want) in probs.iter().zip(expected) {
            assert!((got - want).abs() < EPS);
        }
    }

    #[test]
    fn tweaked_ev_matches_hand_computation() {
        let ev = theoretical_ev(&GameDefinition::tweaked(), 1.0);
        assert!((ev.total_ev - (-69.0 / 343.0)).abs() < EPS);
        assert!((ev.house_edge.unwrap() - 6900.0 / 343.0).abs() < 1e-9);
    }

    #[test]
    fn probabilities_sum_to_one() {
        for game in [GameDefinition::fair(), GameDefinition::tweaked()] {
            let ev = theoretical_ev(&game, 1.0);
            let total: f64 = ev.breakdown.iter().map(|c| c.probability).sum();
            assert!((total - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn single_ball_five_to_one_breaks_even() {
        let cards = CARDS.iter().map(|&c| Card::from(c)).collect();
        let payouts = PayoutStructure::new([(0, -1.0), (1, 5.0)]);
        let game = GameDefinition::new("single", cards, vec![], 1, payouts).unwrap();
        let ev = theoretical_ev(&game, 1.0);
        assert!(ev.total_ev.abs() < EPS);
        assert_eq!(ev.breakdown.len(), 2);
    }

    #[test]
    fn ev_scales_with_bet_and_zero_bet_has_no_edge() {
        let game = GameDefinition::fair();
        let unit = theoretical_ev(&game, 1.0);
        let ten = theoretical_ev(&game, 10.0);
        assert!((ten.total_ev - unit.total_ev * 10.0).abs() < 1e-12);
        assert!((ten.house_edge.unwrap() - unit.house_edge.unwrap()).abs() < 1e-9);
        let zero = theoretical_ev(&game, 0.0);
        assert_eq!(zero.total_ev, 0.0);
        assert_eq!(zero.house_edge, None);
    }

    #[test]
    fn summary_reports_outcome_counts() {
        let fair = summary(GameVariant::Fair);
        let tweaked = summary(GameVariant::Tweaked);
        assert_eq!(fair.cards, 6);
        assert_eq!(tweaked.cards, 7);
        assert!(tweaked.house_edge > fair.house_edge);
        assert!((fair.probability - 100.0 / 6.0).abs() < 1e-9);
    }
}
