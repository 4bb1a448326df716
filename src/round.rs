use crate::error::Result;
use crate::game::{Card, GameDefinition};
use rand::Rng;

/// One resolved round. Borrowed from the game so rounds never allocate labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome<'a> {
    pub drawn: Vec<&'a Card>,
    pub hits: u8,
    pub payout: f64,
}

impl RoundOutcome<'_> {
    pub fn is_win(&self) -> bool {
        self.payout > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.payout < 0.0
    }
}

/// Drops every ball for one round and settles the bet on `chosen`.
pub fn resolve_round<'a, R: Rng + ?Sized>(
    game: &'a GameDefinition,
    chosen: &Card,
    bet: f64,
    rng: &mut R,
) -> Result<RoundOutcome<'a>> {
    game.check_choice(chosen)?;
    Ok(resolve_unchecked(game, chosen, bet, rng))
}

/// Resolver for callers that already validated `chosen` once up front.
pub(crate) fn resolve_unchecked<'a, R: Rng + ?Sized>(
    game: &'a GameDefinition,
    chosen: &Card,
    bet: f64,
    rng: &mut R,
) -> RoundOutcome<'a> {
    let drawn: Vec<&Card> = (0..game.balls_per_round())
        .map(|_| game.draw(rng))
        .collect();
    let hits = drawn.iter().filter(|&&c| c == chosen).count() as u8;
    let payout = game.multiplier(hits) * bet;

    RoundOutcome { drawn, hits, payout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PayoutStructure, JOKER};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_joker_and_unknown_cards() {
        let game = GameDefinition::tweaked();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for bad in [JOKER, "2", ""] {
            let err = resolve_round(&game, &Card::from(bad), 1.0, &mut rng).unwrap_err();
            assert_eq!(err.kind(), "InvalidChoice");
        }
    }

    #[test]
    fn payout_follows_hit_count() {
        let game = GameDefinition::fair();
        let chosen = Card::from("10");
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..500 {
            let round = resolve_round(&game, &chosen, 2.5, &mut rng).unwrap();
            assert_eq!(round.drawn.len(), 3);
            let hits = round.drawn.iter().filter(|c| ***c == chosen).count() as u8;
            assert_eq!(round.hits, hits);
            let expected = match hits {
                0 => -2.5,
                1 => 2.5,
                2 => 5.0,
                _ => 7.5,
            };
            assert_eq!(round.payout, expected);
        }
    }

    #[test]
    fn same_seed_same_draws() {
        let game = GameDefinition::tweaked();
        let chosen = Card::from("A");
        let mut a = ChaCha8Rng::seed_from_u64(2024);
        let mut b = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..100 {
            assert_eq!(
                resolve_round(&game, &chosen, 1.0, &mut a).unwrap(),
                resolve_round(&game, &chosen, 1.0, &mut b).unwrap()
            );
        }
    }

    #[test]
    fn single_ball_game_is_binary() {
        let cards = crate::game::CARDS.iter().map(|&c| Card::from(c)).collect();
        let game = GameDefinition::new(
            "single",
            cards,
            vec![],
            1,
            PayoutStructure::new([(0, -1.0), (1, 5.0)]),
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let round = resolve_round(&game, &Card::from("K"), 1.0, &mut rng).unwrap();
            assert!(round.hits <= 1);
            assert!(round.payout == -1.0 || round.payout == 5.0);
        }
    }
}
