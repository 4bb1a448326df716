use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use drop_ball::analytics::{game_metrics, GameMetrics};
use drop_ball::config::{Mode, SimulationRequest};
use drop_ball::theory::{self, TheoreticalEv};
use drop_ball::{run_comparison, run_simulation, GameVariant, SimulationResult};

#[derive(Parser)]
#[command(name = "drop_ball")]
#[command(about = "Drop Ball fair vs tweaked Monte Carlo simulation", long_about = None)]
struct Args {
    /// Request JSON file; flags below override its values
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Game to play: fair, tweaked or compare
    #[arg(short, long)]
    game: Option<String>,

    /// Card to bet on
    #[arg(short, long)]
    card: Option<String>,

    /// Number of rounds to simulate
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    rounds: Option<i64>,

    /// Bet amount per round
    #[arg(short, long)]
    bet: Option<f64>,

    /// Seed for reproducible runs
    #[arg(short, long, conflicts_with = "unseeded", allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Draw fresh entropy instead of seeding
    #[arg(long)]
    unseeded: bool,

    /// Output JSON file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn request(&self) -> anyhow::Result<SimulationRequest> {
        let mut req = match &self.request {
            Some(path) => SimulationRequest::from_path(path)
                .with_context(|| format!("failed to read request {}", path.display()))?,
            None => SimulationRequest::default(),
        };
        if let Some(game) = &self.game {
            req.game = game.clone();
        }
        if let Some(card) = &self.card {
            req.chosen_card = card.clone();
        }
        if let Some(rounds) = self.rounds {
            req.num_rounds = rounds;
        }
        if let Some(bet) = self.bet {
            req.bet_amount = bet;
        }
        if self.seed.is_some() {
            req.seed = self.seed;
        }
        if self.unseeded {
            req.seed = None;
        }
        Ok(req)
    }
}

fn print_game(
    variant: GameVariant,
    results: &SimulationResult,
    ev: &TheoreticalEv,
    metrics: &GameMetrics,
) {
    let pct = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}%"));

    println!("=== {} game ===", variant);
    println!("  total profit      {:.2}", results.total_profit);
    println!(
        "  average return    {:.4} (theoretical {:.4})",
        results.average_return_per_play, ev.total_ev
    );
    println!("  win rate          {:.2}%", results.win_rate * 100.0);
    println!("  wins / losses     {} / {}", results.wins, results.losses);
    println!("  ROI               {}", pct(metrics.roi));
    println!(
        "  house edge        {} (theoretical {})",
        pct(metrics.actual_house_edge),
        pct(ev.house_edge)
    );
    println!("  deviation         {}", pct(metrics.theoretical_vs_actual_deviation));
    for (hits, count) in &results.hits_distribution {
        println!("  {hits} hits           {count}");
    }
    if let Some(s) = metrics.streaks {
        println!(
            "  streaks           max win {}, max loss {}, current {}",
            s.max_win_streak, s.max_loss_streak, s.current_streak
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let params = args.request()?.validate()?;
    println!(
        "Betting {:.2} on '{}' for {} rounds (seed: {})...",
        params.bet,
        params.chosen_card,
        params.rounds,
        params.seed.map_or_else(|| "random".to_string(), |s| s.to_string())
    );
    let start = std::time::Instant::now();

    let json = match params.mode {
        Mode::Single(variant) => {
            let results = run_simulation(
                variant,
                &params.chosen_card,
                params.rounds,
                params.bet,
                params.seed,
                params.detailed,
            )?;
            let ev = theory::theoretical_ev(&variant.game(), params.bet);
            let metrics = game_metrics(&results, &ev, params.bet);
            print_game(variant, &results, &ev, &metrics);
            serde_json::json!({
                "game_type": variant,
                "chosen_card": params.chosen_card,
                "num_rounds": params.rounds,
                "results": results,
                "theoretical_ev": ev,
                "metrics": metrics,
            })
        }
        Mode::Compare => {
            for variant in GameVariant::ALL {
                let s = theory::summary(variant);
                println!(
                    "{}: {} outcomes, {:.1}% per ball, unit EV {:.4}, house edge {:.2}%",
                    variant, s.cards, s.probability, s.ev, s.house_edge
                );
            }
            let report =
                run_comparison(&params.chosen_card, params.rounds, params.bet, params.seed)?;
            let fair = &report.fair_game;
            let tweaked = &report.tweaked_game;
            print_game(GameVariant::Fair, &fair.results, &fair.theoretical, &fair.metrics);
            print_game(
                GameVariant::Tweaked,
                &tweaked.results,
                &tweaked.theoretical,
                &tweaked.metrics,
            );
            println!("=== Comparison ===");
            println!("  profit difference {:.2}", report.comparison.profit_difference);
            println!(
                "  better for player {}",
                if report.comparison.fair_better { "fair" } else { "tweaked" }
            );
            serde_json::to_value(&report)?
        }
    };

    println!("\nCompleted in {:.2}s", start.elapsed().as_secs_f64());

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, serde_json::to_string_pretty(&json)?)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        println!("Wrote {}", output_path.display());
    }

    Ok(())
}
