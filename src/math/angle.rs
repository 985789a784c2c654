//! Angle utilities.
use std::f64::consts::{PI, TAU};

/// Wraps an angle in radians into the half-open interval `(-π, π]`.
///
/// `-π` maps to `π`, so both spellings of the backwards direction land on
/// the same value.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Angle between two 2D vectors in `[0, π]`, from the normalized dot product.
///
/// The cosine is clamped before `acos` so rounding on nearly parallel
/// vectors cannot produce NaN. Returns `None` if either vector has zero
/// length.
#[must_use]
pub fn angle_between(ux: f64, uy: f64, vx: f64, vy: f64) -> Option<f64> {
    let lu = ux.hypot(uy);
    let lv = vx.hypot(vy);
    if lu < super::TOLERANCE || lv < super::TOLERANCE {
        return None;
    }
    let cos = ((ux * vx + uy * vy) / (lu * lv)).clamp(-1.0, 1.0);
    Some(cos.acos())
}
