use std::f64::consts::{FRAC_PI_2, TAU};

use tracing::debug;

use crate::error::{invalid_argument, Result};
use crate::math::{CartesianPoints, Point2, Vector2};

/// Samples points evenly over a circle or arc in continuous 2D coordinates.
///
/// Sampling starts at angle `π/2`, i.e. at `(cx, cy - r)`, and proceeds
/// clockwise in the `x`-`y` plane. A full circle yields `num_points`
/// distinct points; an arc includes both of its endpoints.
pub struct MakeCartCircle {
    radius: f64,
    num_points: usize,
    center: Point2,
    arc_angle: f64,
}

impl MakeCartCircle {
    /// Creates a new full-circle `MakeCartCircle` centred on the origin.
    #[must_use]
    pub fn new(radius: f64, num_points: usize) -> Self {
        Self {
            radius,
            num_points,
            center: Point2::origin(),
            arc_angle: TAU,
        }
    }

    /// Sets the centre.
    #[must_use]
    pub fn center(mut self, center: Point2) -> Self {
        self.center = center;
        self
    }

    /// Restricts sampling to an arc of the given aperture in radians.
    ///
    /// Only an aperture of exactly `2π` samples the full circle. Larger
    /// apertures are kept as given, so the sampled arc wraps past its start.
    #[must_use]
    pub fn arc_angle(mut self, arc_angle: f64) -> Self {
        self.arc_angle = arc_angle;
        self
    }

    /// Returns `true` if the full circle is sampled.
    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        (self.arc_angle - TAU).abs() < f64::EPSILON
    }

    /// Executes the operation, returning one column per point.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or arc angle is negative or not
    /// finite, or if there are too few points: at least one for a full
    /// circle and two for an arc.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<CartesianPoints> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return invalid_argument(format!(
                "circle radius must be finite and non-negative, got {}",
                self.radius
            ));
        }
        if !self.arc_angle.is_finite() || self.arc_angle < 0.0 {
            return invalid_argument(format!(
                "arc angle must be finite and non-negative, got {}",
                self.arc_angle
            ));
        }
        let full = self.is_full_circle();
        let steps = if full {
            self.num_points
        } else {
            self.num_points.saturating_sub(1)
        };
        if steps == 0 {
            return invalid_argument(format!(
                "{} needs at least {} points, got {}",
                if full { "a circle" } else { "an arc" },
                if full { 1 } else { 2 },
                self.num_points
            ));
        }
        debug!(
            radius = self.radius,
            num_points = self.num_points,
            center = ?self.center,
            arc_angle = self.arc_angle,
            "make_cart_circle"
        );

        let step = self.arc_angle / steps as f64;
        let columns: Vec<Vector2> = (0..self.num_points)
            .map(|k| {
                let theta = k as f64 * step + FRAC_PI_2;
                self.center.coords + Vector2::new(theta.cos(), -theta.sin()) * self.radius
            })
            .collect();
        Ok(CartesianPoints::from_columns(&columns))
    }
}
