use std::cell::Cell;

use nalgebra::DVector;
use tracing::{debug, trace, warn};

use crate::error::{FitError, Result};

use super::{Minimize, Minimum};

/// Parameters controlling the downhill simplex search.
#[derive(Debug, Clone, Copy)]
pub struct NelderMeadOptions {
    /// Absolute spread of the simplex vertices accepted for convergence.
    pub xatol: f64,
    /// Absolute spread of the objective values accepted for convergence.
    pub fatol: f64,
    /// Iteration limit; `None` means `200 * n` for `n` parameters.
    pub max_iterations: Option<usize>,
    /// Evaluation limit; `None` means `200 * n` for `n` parameters.
    pub max_evaluations: Option<usize>,
    /// Reflection coefficient.
    pub reflection: f64,
    /// Expansion coefficient.
    pub expansion: f64,
    /// Contraction coefficient.
    pub contraction: f64,
    /// Shrink coefficient.
    pub shrink: f64,
}

impl Default for NelderMeadOptions {
    fn default() -> Self {
        Self {
            xatol: 1e-4,
            fatol: 1e-4,
            max_iterations: None,
            max_evaluations: None,
            reflection: 1.0,
            expansion: 2.0,
            contraction: 0.5,
            shrink: 0.5,
        }
    }
}

/// Nelder-Mead downhill simplex minimizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NelderMead {
    options: NelderMeadOptions,
}

/// Relative perturbation of each coordinate in the initial simplex.
const NONZERO_DELTA: f64 = 0.05;
/// Absolute perturbation used for coordinates that start at zero.
const ZERO_DELTA: f64 = 0.000_25;

impl NelderMead {
    /// Creates a minimizer with the given options.
    #[must_use]
    pub fn new(options: NelderMeadOptions) -> Self {
        Self { options }
    }
}

/// Simplex vertices with their objective values, kept sorted best first.
struct Simplex {
    points: Vec<DVector<f64>>,
    values: Vec<f64>,
}

impl Simplex {
    fn sort(&mut self) {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&a, &b| self.values[a].total_cmp(&self.values[b]));
        self.points = order.iter().map(|&i| self.points[i].clone()).collect();
        self.values = order.iter().map(|&i| self.values[i]).collect();
    }

    fn replace_worst(&mut self, point: DVector<f64>, value: f64) {
        let last = self.values.len() - 1;
        self.points[last] = point;
        self.values[last] = value;
    }

    fn x_spread(&self) -> f64 {
        let best = &self.points[0];
        self.points[1..]
            .iter()
            .map(|p| (p - best).amax())
            .fold(0.0, f64::max)
    }

    fn f_spread(&self) -> f64 {
        let best = self.values[0];
        self.values[1..]
            .iter()
            .map(|v| (v - best).abs())
            .fold(0.0, f64::max)
    }
}

impl Minimize for NelderMead {
    #[allow(clippy::cast_precision_loss, clippy::many_single_char_names)]
    fn minimize<F>(&self, objective: F, x0: &[f64]) -> Result<Minimum>
    where
        F: Fn(&[f64]) -> f64,
    {
        let n = x0.len();
        if n == 0 {
            return Err(
                FitError::InvalidArgument("initial guess must not be empty".into()).into(),
            );
        }
        let opts = &self.options;
        let max_iterations = opts.max_iterations.unwrap_or(200 * n);
        let max_evaluations = opts.max_evaluations.unwrap_or(200 * n);

        let evaluations = Cell::new(0_usize);
        let eval = |x: &DVector<f64>| {
            evaluations.set(evaluations.get() + 1);
            objective(x.as_slice())
        };

        let start = DVector::from_column_slice(x0);
        let f0 = eval(&start);
        if !f0.is_finite() {
            return Err(FitError::NonFiniteObjective.into());
        }

        let mut simplex = Simplex {
            points: vec![start.clone()],
            values: vec![f0],
        };
        for k in 0..n {
            let mut p = start.clone();
            p[k] = if p[k] == 0.0 {
                ZERO_DELTA
            } else {
                (1.0 + NONZERO_DELTA) * p[k]
            };
            let v = eval(&p);
            simplex.points.push(p);
            simplex.values.push(v);
        }
        simplex.sort();

        let (rho, chi, psi, sigma) = (
            opts.reflection,
            opts.expansion,
            opts.contraction,
            opts.shrink,
        );
        let mut iterations = 1;
        let mut converged = false;

        while iterations < max_iterations && evaluations.get() < max_evaluations {
            if simplex.x_spread() <= opts.xatol && simplex.f_spread() <= opts.fatol {
                converged = true;
                break;
            }

            let centroid = simplex.points[..n]
                .iter()
                .fold(DVector::zeros(n), |acc, p| acc + p)
                / n as f64;
            let worst = simplex.points[n].clone();

            let xr = &centroid * (1.0 + rho) - &worst * rho;
            let fxr = eval(&xr);

            let mut shrink = false;
            if fxr < simplex.values[0] {
                let xe = &centroid * (1.0 + rho * chi) - &worst * (rho * chi);
                let fxe = eval(&xe);
                if fxe < fxr {
                    simplex.replace_worst(xe, fxe);
                } else {
                    simplex.replace_worst(xr, fxr);
                }
            } else if fxr < simplex.values[n - 1] {
                simplex.replace_worst(xr, fxr);
            } else if fxr < simplex.values[n] {
                // outside contraction
                let xc = &centroid * (1.0 + psi * rho) - &worst * (psi * rho);
                let fxc = eval(&xc);
                if fxc <= fxr {
                    simplex.replace_worst(xc, fxc);
                } else {
                    shrink = true;
                }
            } else {
                // inside contraction
                let xcc = &centroid * (1.0 - psi) + &worst * psi;
                let fxcc = eval(&xcc);
                if fxcc < simplex.values[n] {
                    simplex.replace_worst(xcc, fxcc);
                } else {
                    shrink = true;
                }
            }

            if shrink {
                let best = simplex.points[0].clone();
                for j in 1..=n {
                    let p = &best + (&simplex.points[j] - &best) * sigma;
                    simplex.values[j] = eval(&p);
                    simplex.points[j] = p;
                }
            }

            simplex.sort();
            iterations += 1;
            trace!(iterations, best = simplex.values[0], shrink, "simplex step");
        }

        let evaluations = evaluations.get();
        if converged {
            debug!(iterations, evaluations, value = simplex.values[0], "nelder-mead converged");
        } else {
            warn!(
                iterations,
                evaluations,
                value = simplex.values[0],
                "nelder-mead stopped at its iteration or evaluation limit"
            );
        }

        Ok(Minimum {
            x: simplex.points[0].as_slice().to_vec(),
            value: simplex.values[0],
            iterations,
            evaluations,
            converged,
        })
    }
}
