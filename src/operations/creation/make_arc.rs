use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::{debug, trace};

use crate::error::{invalid_argument, GridError, Result};
use crate::grid::coord::{signed, GridPoint};
use crate::grid::{Grid, Occupancy};
use crate::math::angle::angle_between;

use super::make_circle::draw_circle;
use super::MakeLine;

/// Radius of curvature of an arc, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radius {
    Finite(u32),
    /// A flat arc: a straight segment perpendicular to the focus direction.
    Infinite,
}

impl From<u32> for Radius {
    fn from(r: u32) -> Self {
        Self::Finite(r)
    }
}

/// Creates a one-cell-thick arc within a 2D grid.
///
/// The arc is centred on `arc_pos`, curves around the circle of the given
/// radius whose centre lies in the direction of `focus_pos`, and spans a
/// chord of `diameter` cells. Positions are 1-based.
pub struct MakeArc {
    size: [usize; 2],
    arc_pos: GridPoint,
    radius: Radius,
    diameter: u32,
    focus_pos: GridPoint,
}

impl MakeArc {
    /// Creates a new `MakeArc` operation.
    #[must_use]
    pub fn new(
        size: [usize; 2],
        arc_pos: GridPoint,
        radius: Radius,
        diameter: u32,
        focus_pos: GridPoint,
    ) -> Self {
        Self {
            size,
            arc_pos,
            radius,
            diameter,
            focus_pos,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a grid size is zero, the radius or diameter is
    /// zero, the arc position lies outside the grid, the diameter exceeds
    /// twice the radius or is even, or the focus coincides with the arc
    /// position.
    pub fn execute<T: Occupancy>(&self) -> Result<Grid<T>> {
        let [nx, ny] = self.size;
        if nx == 0 || ny == 0 {
            return Err(GridError::InvalidShape {
                shape: self.size.to_vec(),
            }
            .into());
        }
        if self.radius == Radius::Finite(0) {
            return invalid_argument("the radius must be positive");
        }
        if self.diameter == 0 {
            return invalid_argument("the diameter must be positive");
        }
        if !self.arc_pos.in_grid(nx, ny) {
            return invalid_argument("the centre of the arc must be within the grid");
        }
        if let Radius::Finite(r) = self.radius {
            if u64::from(self.diameter) > 2 * u64::from(r) {
                return invalid_argument(
                    "the diameter of the arc must be no more than twice the radius of curvature",
                );
            }
        }
        if self.diameter % 2 != 1 {
            return invalid_argument("the diameter must be an odd number of grid points");
        }
        if self.arc_pos == self.focus_pos {
            return invalid_argument("the focus position must be different to the arc position");
        }
        debug!(
            size = ?self.size,
            arc_pos = ?self.arc_pos,
            radius = ?self.radius,
            diameter = self.diameter,
            focus_pos = ?self.focus_pos,
            "make_arc"
        );

        match self.radius {
            Radius::Finite(r) => self.curved(r),
            Radius::Infinite => self.flat(),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn curved<T: Occupancy>(&self, radius: u32) -> Result<Grid<T>> {
        let r = f64::from(radius);
        let half_angle = (f64::from(self.diameter) / 2.0 / r).asin();

        let (ax, ay) = (self.arc_pos.x as f64, self.arc_pos.y as f64);
        let (fx, fy) = (self.focus_pos.x as f64, self.focus_pos.y as f64);
        let dist = (fx - ax).hypot(fy - ay);
        let center = GridPoint::new(
            (ax + r * (fx - ax) / dist).round_ties_even() as i64,
            (ay + r * (fy - ay) / dist).round_ties_even() as i64,
        );
        trace!(?center, half_angle, "arc circle");

        let mut grid = Grid::new(&self.size)?;
        draw_circle(&mut grid, center.to_zero_based(), i64::from(radius), TAU);

        let (vx, vy) = (
            (self.arc_pos.x - center.x) as f64,
            (self.arc_pos.y - center.y) as f64,
        );
        for index in grid.filled_indices() {
            let p = GridPoint::from_zero_based(signed(index[0]), signed(index[1]));
            let theta = angle_between(vx, vy, (p.x - center.x) as f64, (p.y - center.y) as f64);
            if theta.is_some_and(|t| t > half_angle) {
                grid.set(&index, T::EMPTY)?;
            }
        }
        Ok(grid)
    }

    #[allow(clippy::cast_precision_loss)]
    fn flat<T: Occupancy>(&self) -> Result<Grid<T>> {
        let dx = (self.focus_pos.x - self.arc_pos.x) as f64;
        let dy = (self.focus_pos.y - self.arc_pos.y) as f64;
        // dy == 0 gives ±inf, and atan(±inf) is the expected ±π/2.
        let angle = (dx / dy).atan() + FRAC_PI_2;
        let length = f64::from((self.diameter - 1) / 2);
        trace!(angle, length, "flat arc");

        let [nx, ny] = self.size;
        let forward: Grid<T> = MakeLine::angled(nx, ny, self.arc_pos, angle, length).execute()?;
        let backward: Grid<T> =
            MakeLine::angled(nx, ny, self.arc_pos, angle + PI, length).execute()?;
        forward.union(&backward)
    }
}
