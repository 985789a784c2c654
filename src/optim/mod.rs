//! Derivative-free minimization of scalar objectives.
mod nelder_mead;

pub use nelder_mead::{NelderMead, NelderMeadOptions};

use crate::error::Result;

/// Outcome of a minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// Best parameter vector found.
    pub x: Vec<f64>,
    /// Objective value at `x`.
    pub value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of objective evaluations.
    pub evaluations: usize,
    /// Whether the convergence tolerances were met before a limit was hit.
    pub converged: bool,
}

/// A method that minimizes an objective over a parameter vector, starting
/// from an initial guess.
pub trait Minimize {
    /// Minimizes `objective` starting from `x0`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x0` is empty or the objective is not finite at
    /// `x0`.
    fn minimize<F>(&self, objective: F, x0: &[f64]) -> Result<Minimum>
    where
        F: Fn(&[f64]) -> f64;
}
