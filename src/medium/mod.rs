//! Acoustic material properties: water, soft tissue and bone from CT
//! numbers, and power-law absorption.
mod absorption;
mod tissue;
mod water;

pub use absorption::{
    fit_power_law_params, fit_power_law_params_with, power_law_kramers_kronig, PowerLawFit,
};
pub use tissue::{hounsfield_to_density, hounsfield_to_sound_speed};
pub use water::{water_absorption, water_density, water_non_linearity, water_sound_speed};

use crate::error::{MediumError, Result};

/// Evaluates a polynomial with coefficients ordered from the highest power
/// down to the constant term.
fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Rejects `value` unless it lies in `[min, max]`. NaN is always rejected.
fn check_range(parameter: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(MediumError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        }
        .into())
    }
}
