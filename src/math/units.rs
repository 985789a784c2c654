//! Absorption unit conversion between dB/(MHz^y cm) and Np/((rad/s)^y m).
use std::f64::consts::{LOG10_E, TAU};

/// Decibels per Neper, `20 log10(e)`.
pub const DB_PER_NEPER: f64 = 20.0 * LOG10_E;

/// Converts a power-law absorption prefactor from dB/(MHz^y cm) to
/// Np/((rad/s)^y m).
#[must_use]
pub fn db_to_neper(alpha: f64, y: f64) -> f64 {
    100.0 * alpha * (1e-6 / TAU).powf(y) / DB_PER_NEPER
}

/// Converts a power-law absorption prefactor from Np/((rad/s)^y m) to
/// dB/(MHz^y cm). Inverse of [`db_to_neper`].
#[must_use]
pub fn neper_to_db(alpha: f64, y: f64) -> f64 {
    DB_PER_NEPER * alpha * (TAU * 1e6).powf(y) / 100.0
}
