//! Linearly and logarithmically spaced sample points.
use std::str::FromStr;

use crate::error::{invalid_argument, GeometryError, Result, SonogridError};

/// Distribution of points produced by [`spaced_points`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    /// Constant difference between neighbours.
    #[default]
    Linear,
    /// Constant ratio between neighbours. The endpoints are the actual start
    /// and stop values, not decades.
    Log,
}

impl FromStr for Spacing {
    type Err = SonogridError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            other => Err(GeometryError::InvalidArgument(format!(
                "spacing {other:?} is not valid, choose \"linear\" or \"log\""
            ))
            .into()),
        }
    }
}

/// Generates `n` points from `start` to `stop` inclusive.
///
/// If `n < 2` the single value `stop` is returned.
///
/// # Errors
///
/// Returns an error if `stop <= start`, or if log spacing is requested with
/// a non-positive `start`.
#[allow(clippy::cast_precision_loss)]
pub fn spaced_points(start: f64, stop: f64, n: usize, spacing: Spacing) -> Result<Vec<f64>> {
    if stop <= start {
        return invalid_argument("stop must be larger than start");
    }
    if n < 2 {
        return Ok(vec![stop]);
    }
    let steps = (n - 1) as f64;

    let points = match spacing {
        Spacing::Linear => {
            let step = (stop - start) / steps;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
        Spacing::Log => {
            if start <= 0.0 {
                return invalid_argument("log spacing requires a positive start value");
            }
            let (ls, le) = (start.ln(), stop.ln());
            let step = (le - ls) / steps;
            (0..n)
                .map(|i| match i {
                    0 => start,
                    i if i == n - 1 => stop,
                    i => (ls + step * i as f64).exp(),
                })
                .collect()
        }
    };
    Ok(points)
}
