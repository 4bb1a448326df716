use crate::error::{Result, SimError};
use crate::game::{Card, GameDefinition, GameVariant};
use crate::round::resolve_unchecked;
use crate::stats::{DetailedData, SimulationResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Seeded runs are reproducible bit-for-bit; unseeded runs pull fresh entropy.
pub fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub(crate) fn check_bet(bet: f64) -> Result<()> {
    if !bet.is_finite() || bet < 0.0 {
        return Err(SimError::InvalidParameter(format!(
            "bet amount must be a finite non-negative number, got {bet}"
        )));
    }
    Ok(())
}

/// Plays `rounds` independent rounds of `game` against the supplied RNG.
pub fn simulate<R: Rng + ?Sized>(
    game: &GameDefinition,
    chosen: &Card,
    rounds: usize,
    bet: f64,
    detailed: bool,
    rng: &mut R,
) -> Result<SimulationResult> {
    game.check_choice(chosen)?;
    check_bet(bet)?;

    let mut result = SimulationResult::new(game.balls_per_round());
    let mut detail = detailed.then(|| DetailedData::new(game.outcomes(), rounds));

    for _ in 0..rounds {
        let round = resolve_unchecked(game, chosen, bet, rng);

        result.total_profit += round.payout;
        if round.is_win() {
            result.wins += 1;
        } else if round.is_loss() {
            result.losses += 1;
        } else {
            result.pushes += 1;
        }
        *result.hits_distribution.entry(round.hits).or_insert(0) += 1;

        if let Some(detail) = detail.as_mut() {
            detail.record(&round.drawn, round.payout);
        }
    }

    result.rounds = rounds as u64;
    result.detailed_data = detail;
    result.finish();
    Ok(result)
}

/// Builds a fresh game and RNG for one run so that no state leaks between calls.
pub fn run_simulation(
    variant: GameVariant,
    chosen: &Card,
    rounds: usize,
    bet: f64,
    seed: Option<u64>,
    detailed: bool,
) -> Result<SimulationResult> {
    let game = variant.game();
    debug!(%variant, card = %chosen, rounds, bet, ?seed, detailed, "starting simulation");
    let mut rng = rng_for(seed);
    let result = simulate(&game, chosen, rounds, bet, detailed, &mut rng)?;
    info!(
        %variant,
        rounds,
        total_profit = result.total_profit,
        win_rate = result.win_rate,
        "simulation finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::JOKER;

    fn ten() -> Card {
        Card::from("10")
    }

    #[test]
    fn zero_rounds_is_well_defined() {
        let result = run_simulation(GameVariant::Fair, &ten(), 0, 1.0, Some(1), true).unwrap();
        assert_eq!(result.wins, 0);
        assert_eq!(result.losses, 0);
        assert_eq!(result.average_return_per_play, 0.0);
        assert_eq!(result.win_rate, 0.0);
        assert!(result.hits_distribution.values().all(|&v| v == 0));
        let detail = result.detailed_data.unwrap();
        assert!(detail.cumulative_profit.is_empty());
        assert!(detail.card_frequencies.values().all(|&v| v == 0));
    }

    #[test]
    fn counts_are_conserved() {
        let result =
            run_simulation(GameVariant::Tweaked, &ten(), 5_000, 2.0, Some(11), false).unwrap();
        assert_eq!(result.wins + result.losses + result.pushes, 5_000);
        assert_eq!(result.hits_distribution.values().sum::<u64>(), 5_000);
        assert!(result.detailed_data.is_none());
    }

    #[test]
    fn detailed_series_agree_with_totals() {
        let queen = Card::from("Q");
        let result = run_simulation(GameVariant::Fair, &queen, 2_000, 1.0, Some(5), true).unwrap();
        let detail = result.detailed_data.as_ref().unwrap();
        assert_eq!(detail.per_round_payouts.len(), 2_000);
        let total: f64 = detail.per_round_payouts.iter().sum();
        assert!((total - result.total_profit).abs() < 1e-9);
        assert!((detail.cumulative_profit.last().unwrap() - result.total_profit).abs() < 1e-9);
        assert_eq!(detail.card_frequencies.values().sum::<u64>(), 6_000);
        assert!(!detail.card_frequencies.contains_key(&Card::from(JOKER)));
    }

    #[test]
    fn tweaked_detail_counts_joker() {
        let result =
            run_simulation(GameVariant::Tweaked, &ten(), 2_000, 1.0, Some(5), true).unwrap();
        let detail = result.detailed_data.unwrap();
        assert!(detail.card_frequencies[&Card::from(JOKER)] > 0);
    }

    #[test]
    fn rejects_bad_inputs_before_drawing() {
        let joker = Card::from(JOKER);
        let err = run_simulation(GameVariant::Tweaked, &joker, 10, 1.0, None, false).unwrap_err();
        assert_eq!(err.kind(), "InvalidChoice");
        let err = run_simulation(GameVariant::Fair, &ten(), 10, -1.0, None, false).unwrap_err();
        assert_eq!(err.kind(), "InvalidParameter");
        let err =
            run_simulation(GameVariant::Fair, &ten(), 10, f64::NAN, None, false).unwrap_err();
        assert_eq!(err.kind(), "InvalidParameter");
    }

    #[test]
    fn huge_detailed_request_fails_cleanly_on_bad_input() {
        let joker = Card::from(JOKER);
        let huge = usize::MAX / 4;
        let err =
            run_simulation(GameVariant::Tweaked, &joker, huge, 1.0, Some(1), true).unwrap_err();
        assert_eq!(err.kind(), "InvalidChoice");
        let err = run_simulation(GameVariant::Fair, &ten(), huge, -2.0, Some(1), true).unwrap_err();
        assert_eq!(err.kind(), "InvalidParameter");
    }

    #[test]
    fn zero_bet_runs_as_pushes() {
        let result = run_simulation(GameVariant::Fair, &ten(), 100, 0.0, Some(3), false).unwrap();
        assert_eq!(result.pushes, 100);
        assert_eq!(result.total_profit, 0.0);
    }
}
