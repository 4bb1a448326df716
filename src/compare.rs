//! Fair vs tweaked run under identical draws.

use crate::analytics::{game_metrics, roi_over_time, GameMetrics};
use crate::error::Result;
use crate::game::{Card, GameVariant};
use crate::sim::run_simulation;
use crate::stats::SimulationResult;
use crate::theory::{theoretical_ev, TheoreticalEv};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    pub results: SimulationResult,
    pub theoretical: TheoreticalEv,
    pub metrics: GameMetrics,
    pub roi_over_time: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    /// Fair profit minus tweaked profit.
    pub profit_difference: f64,
    pub win_rate_difference: f64,
    /// Tweaked actual edge minus fair actual edge.
    pub house_edge_difference: Option<f64>,
    /// Same figure as `house_edge_difference`, kept under the name web clients read.
    pub house_edge_increase_rate: Option<f64>,
    pub roi_difference: Option<f64>,
    /// Tweaked profit minus fair profit; negative means more for the house.
    pub house_profit_increase: f64,
    pub fair_better: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub chosen_card: Card,
    pub num_rounds: u64,
    pub bet_amount: f64,
    pub seed_used: Option<u64>,
    pub fair_game: GameReport,
    pub tweaked_game: GameReport,
    pub comparison: ComparisonMetrics,
}

pub fn game_report(
    variant: GameVariant,
    chosen: &Card,
    rounds: usize,
    bet: f64,
    seed: Option<u64>,
) -> Result<GameReport> {
    let results = run_simulation(variant, chosen, rounds, bet, seed, true)?;
    let theoretical = theoretical_ev(&variant.game(), bet);
    let metrics = game_metrics(&results, &theoretical, bet);
    let roi_over_time = results
        .detailed_data
        .as_ref()
        .map(|d| roi_over_time(&d.cumulative_profit, bet))
        .unwrap_or_default();

    Ok(GameReport {
        results,
        theoretical,
        metrics,
        roi_over_time,
    })
}

fn difference(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

/// Runs both variants one after the other with the same seed.
pub fn run_comparison(
    chosen: &Card,
    rounds: usize,
    bet: f64,
    seed: Option<u64>,
) -> Result<ComparisonReport> {
    let fair = game_report(GameVariant::Fair, chosen, rounds, bet, seed)?;
    let tweaked = game_report(GameVariant::Tweaked, chosen, rounds, bet, seed)?;

    let profit_difference = fair.results.total_profit - tweaked.results.total_profit;
    let house_edge_difference = difference(
        tweaked.metrics.actual_house_edge,
        fair.metrics.actual_house_edge,
    );
    let comparison = ComparisonMetrics {
        profit_difference,
        win_rate_difference: fair.results.win_rate - tweaked.results.win_rate,
        house_edge_difference,
        house_edge_increase_rate: house_edge_difference,
        roi_difference: difference(tweaked.metrics.roi, fair.metrics.roi),
        house_profit_increase: tweaked.results.total_profit - fair.results.total_profit,
        fair_better: profit_difference > 0.0,
    };
    info!(
        card = %chosen,
        rounds,
        profit_difference,
        fair_better = comparison.fair_better,
        "comparison finished"
    );

    Ok(ComparisonReport {
        chosen_card: chosen.clone(),
        num_rounds: rounds as u64,
        bet_amount: bet,
        seed_used: seed,
        fair_game: fair,
        tweaked_game: tweaked,
        comparison,
    })
}
