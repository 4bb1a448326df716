use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Serialize;

use crate::compare::run_comparison;
use crate::config::engine_seed;
use crate::error::SimError;
use crate::game::{self, Card, GameVariant};
use crate::sim::run_simulation;

fn py_err(e: SimError) -> PyErr {
    PyValueError::new_err(format!("{}: {}", e.kind(), e))
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn rounds_from(num_rounds: i64) -> PyResult<usize> {
    usize::try_from(num_rounds).map_err(|_| {
        py_err(SimError::InvalidParameter(format!(
            "round count must be non-negative, got {num_rounds}"
        )))
    })
}

#[pyfunction]
#[pyo3(signature = (
    game_type, chosen_card, num_rounds, bet_amount=1.0, seed=None, detailed=true
))]
fn run_sim(
    game_type: &str,
    chosen_card: &str,
    num_rounds: i64,
    bet_amount: f64,
    seed: Option<i64>,
    detailed: bool,
) -> PyResult<String> {
    let variant: GameVariant = game_type.parse().map_err(py_err)?;
    let result = run_simulation(
        variant,
        &Card::from(chosen_card),
        rounds_from(num_rounds)?,
        bet_amount,
        seed.map(engine_seed),
        detailed,
    )
    .map_err(py_err)?;
    to_json(&result)
}

#[pyfunction]
#[pyo3(signature = (game_type, bet_amount=1.0))]
fn theoretical(game_type: &str, bet_amount: f64) -> PyResult<String> {
    let variant: GameVariant = game_type.parse().map_err(py_err)?;
    to_json(&crate::theoretical_ev(variant, bet_amount).map_err(py_err)?)
}

#[pyfunction]
fn available_cards(game_type: &str) -> PyResult<Vec<String>> {
    let variant: GameVariant = game_type.parse().map_err(py_err)?;
    Ok(game::available_cards(variant)
        .into_iter()
        .map(|c| c.to_string())
        .collect())
}

#[pyfunction]
#[pyo3(signature = (chosen_card, num_rounds, bet_amount=1.0, seed=None))]
fn compare(
    chosen_card: &str,
    num_rounds: i64,
    bet_amount: f64,
    seed: Option<i64>,
) -> PyResult<String> {
    let report = run_comparison(
        &Card::from(chosen_card),
        rounds_from(num_rounds)?,
        bet_amount,
        seed.map(engine_seed),
    )
    .map_err(py_err)?;
    to_json(&report)
}

#[pymodule]
fn drop_ball(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(run_sim, m)?)?;
    m.add_function(wrap_pyfunction!(theoretical, m)?)?;
    m.add_function(wrap_pyfunction!(available_cards, m)?)?;
    m.add_function(wrap_pyfunction!(compare, m)?)?;
    Ok(())
}
