//! Bracketed bisection for the gross-weight fixed point W0 = W_fixed / (1 − Wf/W0 − We/W0).
//!
//! The residual reports infeasible trial weights explicitly instead of as a number, so
//! a trial where fuel and empty fractions consume the whole aircraft never looks like a
//! sign change.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::WeightError;

/// Outcome of one residual evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Residual {
    /// W0_calc − W0 at a trial weight with a positive useful-load margin.
    Feasible(f64),
    /// Fuel plus empty fractions reach or exceed one at the trial weight.
    Infeasible,
}

/// Residual of the weight balance at `trial` for a fixed fuel fraction.
pub fn weight_residual(
    fixed_weight: f64,
    fuel_fraction: f64,
    empty_fraction: f64,
    trial: f64,
) -> Residual {
    let margin = 1.0 - fuel_fraction - empty_fraction;
    if margin <= 0.0 {
        return Residual::Infeasible;
    }
    Residual::Feasible(fixed_weight / margin - trial)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub initial_guess: f64,
    pub absolute_tolerance: f64,
    pub relative_tolerance: f64,
    pub max_iterations: usize,
    /// Doublings allowed while searching for the upper bracket.
    pub max_bracket_expansions: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_guess: 10_000.0,
            absolute_tolerance: 1.0e-6,
            relative_tolerance: 1.0e-10,
            max_iterations: 200,
            max_bracket_expansions: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub gross_weight: f64,
    pub residual: f64,
    pub iterations: usize,
}

/// Solve `residual(W) = 0` for W above `lower`.
///
/// `lower` must sit on the positive or infeasible side of the root; the fixed (crew plus
/// payload) weight always does. `fuel_fraction` is only used for error reporting.
pub fn solve<F>(
    residual: F,
    lower: f64,
    fuel_fraction: f64,
    settings: &SolverSettings,
) -> Result<Solution, WeightError>
where
    F: Fn(f64) -> Residual,
{
    let guess = settings.initial_guess.max(lower);
    let (mut lo, mut hi, mut hi_residual) = match residual(guess) {
        Residual::Feasible(r) if r.abs() <= tolerance(settings, guess) => {
            return Ok(Solution {
                gross_weight: guess,
                residual: r,
                iterations: 0,
            });
        }
        Residual::Feasible(r) if r < 0.0 => (lower, guess, r),
        _ => expand_upper(&residual, guess, fuel_fraction, settings)?,
    };
    debug!(lo, hi, "bracketed gross weight");

    let mut last = hi_residual;
    for iteration in 1..=settings.max_iterations {
        // The upper end stays feasible, so a collapsed bracket pins the root at `hi`.
        if hi - lo <= tolerance(settings, hi) {
            debug!(iteration, gross_weight = hi, residual = hi_residual, "bracket collapsed");
            return Ok(Solution {
                gross_weight: hi,
                residual: hi_residual,
                iterations: iteration,
            });
        }
        let mid = 0.5 * (lo + hi);
        match residual(mid) {
            Residual::Infeasible => lo = mid,
            Residual::Feasible(r) => {
                last = r;
                if r.abs() <= tolerance(settings, mid) {
                    debug!(iteration, gross_weight = mid, residual = r, "converged");
                    return Ok(Solution {
                        gross_weight: mid,
                        residual: r,
                        iterations: iteration,
                    });
                }
                if r > 0.0 {
                    lo = mid;
                } else {
                    hi = mid;
                    hi_residual = r;
                }
            }
        }
    }

    Err(WeightError::NotConverged {
        iterations: settings.max_iterations,
        residual: last,
    })
}

fn expand_upper<F>(
    residual: &F,
    start: f64,
    fuel_fraction: f64,
    settings: &SolverSettings,
) -> Result<(f64, f64, f64), WeightError>
where
    F: Fn(f64) -> Residual,
{
    let mut lo = start;
    let mut hi = start * 2.0;
    for _ in 0..settings.max_bracket_expansions {
        if !hi.is_finite() {
            break;
        }
        match residual(hi) {
            Residual::Feasible(r) if r <= 0.0 => return Ok((lo, hi, r)),
            _ => {
                lo = hi;
                hi *= 2.0;
            }
        }
    }
    Err(WeightError::NoFeasibleBracket {
        fuel_fraction,
        searched_to: lo,
    })
}

fn tolerance(settings: &SolverSettings, weight: f64) -> f64 {
    settings.absolute_tolerance + settings.relative_tolerance * weight.abs()
}
