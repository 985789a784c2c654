use std::f64::consts::{PI, TAU};

use tracing::{debug, warn};

use crate::error::{MediumError, Result};
use crate::math::{db_to_neper, neper_to_db, spaced_points, Spacing, TOLERANCE};
use crate::optim::{Minimize, NelderMead};

/// Number of frequencies sampled over the fitting band.
const FIT_FREQUENCIES: usize = 200;

/// Absorption parameters to configure a simulation with so that its
/// effective absorption follows a requested power law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawFit {
    /// Absorption prefactor in dB/(MHz^y cm).
    pub a0: f64,
    /// Power law exponent.
    pub y: f64,
    /// Remaining L2 error between the requested and effective absorption
    /// over the fitting band, in Np/m.
    pub residual: f64,
}

/// Fits the power law parameters that make the absorption of the
/// fractional Laplacian wave equation follow `a0 f^y` over
/// `[f_min, f_max]` Hz, with `a0` in dB/(MHz^y cm) and `c0` in m/s.
///
/// The correction matters for large absorption or high frequencies, where
/// the effective absorption of the model departs from the plain power law.
///
/// # Errors
///
/// Returns an error if `c0` is not positive, the frequency band is empty or
/// not positive, or the objective is not finite at the requested
/// parameters.
pub fn fit_power_law_params(a0: f64, y: f64, c0: f64, f_min: f64, f_max: f64) -> Result<PowerLawFit> {
    fit_power_law_params_with(&NelderMead::default(), a0, y, c0, f_min, f_max)
}

/// As [`fit_power_law_params`], with a caller-supplied minimizer.
///
/// # Errors
///
/// See [`fit_power_law_params`]; minimizer errors are passed through.
pub fn fit_power_law_params_with<M: Minimize>(
    minimizer: &M,
    a0: f64,
    y: f64,
    c0: f64,
    f_min: f64,
    f_max: f64,
) -> Result<PowerLawFit> {
    if !(c0.is_finite() && c0 > 0.0) {
        return Err(MediumError::InvalidArgument(format!(
            "sound speed must be positive, got {c0}"
        ))
        .into());
    }
    if !(f_min > 0.0 && f_max > f_min && f_max.is_finite()) {
        return Err(MediumError::InvalidArgument(format!(
            "frequency band [{f_min}, {f_max}] must be positive and non-empty"
        ))
        .into());
    }

    let w: Vec<f64> = spaced_points(f_min, f_max, FIT_FREQUENCIES, Spacing::Linear)?
        .into_iter()
        .map(|f| TAU * f)
        .collect();
    let a0_np = db_to_neper(a0, y);
    let desired: Vec<f64> = w.iter().map(|&w| a0_np * w.powf(y)).collect();

    let fit = minimizer.minimize(
        |trial| absorption_residual(trial[0], trial[1], c0, &w, &desired),
        &[a0_np, y],
    )?;
    let (a0_np_fit, y_fit) = (fit.x[0], fit.x[1]);
    let result = PowerLawFit {
        a0: neper_to_db(a0_np_fit, y_fit),
        y: y_fit,
        residual: fit.value,
    };
    debug!(a0, y, a0_fit = result.a0, y_fit = result.y, residual = result.residual, "power law fit");
    Ok(result)
}

/// L2 distance between the requested absorption and the effective
/// absorption produced by trial parameters `a0_np` (Np/((rad/s)^y m)) and
/// `y`.
fn absorption_residual(a0_np: f64, y: f64, c0: f64, w: &[f64], desired: &[f64]) -> f64 {
    let dispersion = (y + 1.0) * a0_np * c0 * (PI * y / 2.0).tan();
    w.iter()
        .zip(desired)
        .map(|(&w, &d)| {
            let actual = a0_np * w.powf(y) / (1.0 - dispersion * w.powf(y - 1.0));
            (d - actual).powi(2)
        })
        .sum::<f64>()
        .sqrt()
}

/// Sound speed at each angular frequency in `w` (rad/s) for a medium with
/// power law absorption `a0 w^y`, `a0` in Np/((rad/s)^y m), given the sound
/// speed `c0` at the reference frequency `w0`. Kramers-Kronig relations.
///
/// The relations only hold for `0 < y < 3`; outside that range a warning is
/// logged and `c0` is returned for every frequency.
#[must_use]
pub fn power_law_kramers_kronig(w: &[f64], w0: f64, c0: f64, a0: f64, y: f64) -> Vec<f64> {
    if !(y > 0.0 && y < 3.0) {
        warn!(y, "power law exponent must be within (0, 3); dispersion ignored");
        return vec![c0; w.len()];
    }
    if (y - 1.0).abs() < TOLERANCE {
        w.iter()
            .map(|&w| 1.0 / (1.0 / c0 - 2.0 * a0 * (w / w0).ln() / PI))
            .collect()
    } else {
        let tan = (y * PI / 2.0).tan();
        w.iter()
            .map(|&w| 1.0 / (1.0 / c0 + a0 * tan * (w.powf(y - 1.0) - w0.powf(y - 1.0))))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fit_improves_on_requested_parameters() {
        let (a0, y, c0, f_min, f_max) = (0.75, 1.5, 1500.0, 1e6, 10e6);
        let fit = fit_power_law_params(a0, y, c0, f_min, f_max).unwrap();

        let w: Vec<f64> = spaced_points(f_min, f_max, FIT_FREQUENCIES, Spacing::Linear)
            .unwrap()
            .into_iter()
            .map(|f| TAU * f)
            .collect();
        let a0_np = db_to_neper(a0, y);
        let desired: Vec<f64> = w.iter().map(|&w| a0_np * w.powf(y)).collect();
        let initial = absorption_residual(a0_np, y, c0, &w, &desired);

        assert!(fit.residual <= initial);
        assert!(fit.residual < initial / 10.0);
        assert!((fit.y - y).abs() < 0.05, "y_fit = {}", fit.y);
        assert_relative_eq!(fit.a0, a0, max_relative = 0.05);
    }

    #[test]
    fn fit_rejects_bad_inputs() {
        assert!(fit_power_law_params(0.75, 1.5, 0.0, 1e6, 10e6).is_err());
        assert!(fit_power_law_params(0.75, 1.5, 1500.0, 10e6, 1e6).is_err());
        assert!(fit_power_law_params(0.75, 1.5, 1500.0, 0.0, 1e6)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn kramers_kronig_reference_frequency_is_c0() {
        let w0 = TAU * 1e6;
        let c = power_law_kramers_kronig(&[w0], w0, 1500.0, db_to_neper(0.5, 1.5), 1.5);
        assert_relative_eq!(c[0], 1500.0, max_relative = 1e-12);
    }

    #[test]
    fn kramers_kronig_dispersion() {
        let w0 = TAU * 1e6;
        let c = power_law_kramers_kronig(&[2.0 * w0], w0, 1500.0, db_to_neper(0.5, 1.5), 1.5);
        assert_relative_eq!(c[0], 1500.854_338_440_569_6, max_relative = 1e-9);
    }

    #[test]
    fn kramers_kronig_linear_exponent() {
        let w0 = TAU * 1e6;
        let c = power_law_kramers_kronig(&[2.0 * w0], w0, 1500.0, db_to_neper(0.5, 1.0), 1.0);
        assert_relative_eq!(c[0], 1500.910_180_182_636_2, max_relative = 1e-9);
    }

    #[test]
    fn kramers_kronig_out_of_range_exponent() {
        let c = power_law_kramers_kronig(&[1.0, 2.0, 3.0], 1.0, 1480.0, 0.1, 3.0);
        assert_eq!(c, vec![1480.0; 3]);
        let c = power_law_kramers_kronig(&[1.0], 1.0, 1480.0, 0.1, 0.0);
        assert_eq!(c, vec![1480.0]);
    }
}
