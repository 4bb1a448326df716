//! Secondary metrics derived from a finished run.
//!
//! Divisions that have no meaning (zero bet, zero investment, zero theoretical
//! return) yield `None` for that metric only.

use crate::stats::SimulationResult;
use crate::theory::{self, TheoreticalEv};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streaks {
    pub max_win_streak: u64,
    pub max_loss_streak: u64,
    /// Positive for an active win run, negative for a loss run.
    pub current_streak: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameMetrics {
    pub roi: Option<f64>,
    pub actual_house_edge: Option<f64>,
    pub theoretical_vs_actual_deviation: Option<f64>,
    /// Only available for detailed runs.
    pub streaks: Option<Streaks>,
}

/// Profit as a percentage of the total amount staked.
pub fn roi(total_profit: f64, rounds: u64, bet: f64) -> Option<f64> {
    let investment = rounds as f64 * bet;
    (investment > 0.0).then(|| total_profit / investment * 100.0)
}

pub fn actual_house_edge(average_return: f64, bet: f64) -> Option<f64> {
    theory::house_edge(average_return, bet)
}

pub fn deviation_pct(actual_return: f64, theoretical_return: f64) -> Option<f64> {
    (theoretical_return != 0.0)
        .then(|| (actual_return - theoretical_return) / theoretical_return.abs() * 100.0)
}

/// Single left-to-right pass; a push resets both runs.
pub fn streaks(payouts: &[f64]) -> Streaks {
    let mut s = Streaks::default();
    let mut wins = 0u64;
    let mut losses = 0u64;

    for &payout in payouts {
        if payout > 0.0 {
            wins += 1;
            losses = 0;
            s.max_win_streak = s.max_win_streak.max(wins);
            s.current_streak = wins as i64;
        } else if payout < 0.0 {
            losses += 1;
            wins = 0;
            s.max_loss_streak = s.max_loss_streak.max(losses);
            s.current_streak = -(losses as i64);
        } else {
            wins = 0;
            losses = 0;
            s.current_streak = 0;
        }
    }

    s
}

/// ROI after each round, empty when nothing was staked.
pub fn roi_over_time(cumulative_profit: &[f64], bet: f64) -> Vec<f64> {
    if bet <= 0.0 {
        return Vec::new();
    }
    cumulative_profit
        .iter()
        .enumerate()
        .map(|(i, profit)| profit / ((i + 1) as f64 * bet) * 100.0)
        .collect()
}

pub fn game_metrics(result: &SimulationResult, ev: &TheoreticalEv, bet: f64) -> GameMetrics {
    if bet == 0.0 {
        warn!("bet amount is zero; ROI and house edge are undefined");
    }
    GameMetrics {
        roi: roi(result.total_profit, result.rounds, bet),
        actual_house_edge: actual_house_edge(result.average_return_per_play, bet),
        theoretical_vs_actual_deviation: deviation_pct(result.average_return_per_play, ev.total_ev),
        streaks: result.per_round_payouts().map(streaks),
    }
}
