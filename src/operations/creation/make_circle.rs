use std::f64::consts::{PI, TAU};

use tracing::{debug, trace};

use crate::error::{invalid_argument, GridError, Result};
use crate::grid::coord::resolve_center;
use crate::grid::{Grid, Occupancy};

/// Creates a one-cell-thick circle or arc within a 2D grid using the
/// midpoint circle algorithm.
///
/// A single cell is the centre, so the full circle always spans an odd
/// number of cells. Neither the centre nor the radius is constrained by the
/// grid: cells falling outside are dropped, which can leave a partial
/// circle or an empty grid.
///
/// With an arc angle below `2π` only cells whose angle
/// `atan2(dx, dy) + π` about the centre is within the aperture are kept.
/// That angle starts just past the `-y` direction and grows through `-x`
/// (`π/2`), `+y` (`π`) and `+x` (`3π/2`); `-y` itself is at `2π`.
pub struct MakeCircle {
    nx: usize,
    ny: usize,
    cx: i64,
    cy: i64,
    radius: f64,
    arc_angle: f64,
}

impl MakeCircle {
    /// Creates a new full-circle `MakeCircle` operation.
    ///
    /// `cx`, `cy` are 1-based; `0` selects the grid midpoint on that axis.
    /// The radius is rounded to the nearest whole number of cells, with
    /// halves going to the even neighbour.
    #[must_use]
    pub fn new(nx: usize, ny: usize, cx: i64, cy: i64, radius: f64) -> Self {
        Self {
            nx,
            ny,
            cx,
            cy,
            radius,
            arc_angle: TAU,
        }
    }

    /// Restricts the circle to an arc of the given aperture in radians,
    /// clamped to `[0, 2π]`.
    #[must_use]
    pub fn arc_angle(mut self, arc_angle: f64) -> Self {
        self.arc_angle = arc_angle.clamp(0.0, TAU);
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a grid size is zero, or the radius is negative
    /// or not finite.
    pub fn execute<T: Occupancy>(&self) -> Result<Grid<T>> {
        if self.nx == 0 || self.ny == 0 {
            return Err(GridError::InvalidShape {
                shape: vec![self.nx, self.ny],
            }
            .into());
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return invalid_argument(format!(
                "circle radius must be finite and non-negative, got {}",
                self.radius
            ));
        }
        let cx = resolve_center(self.cx, self.nx);
        let cy = resolve_center(self.cy, self.ny);
        #[allow(clippy::cast_possible_truncation)]
        let radius = self.radius.round_ties_even() as i64;
        debug!(nx = self.nx, ny = self.ny, cx, cy, radius, arc_angle = self.arc_angle, "make_circle");

        let mut grid = Grid::new(&[self.nx, self.ny])?;
        let center = (cx.saturating_sub(1), cy.saturating_sub(1));
        draw_circle(&mut grid, center, radius, self.arc_angle);
        Ok(grid)
    }
}

/// Marks the circle of integer `radius` about the 0-based `center`, keeping
/// only cells inside the grid and within `arc_angle`.
pub(super) fn draw_circle<T: Occupancy>(
    grid: &mut Grid<T>,
    center: (i64, i64),
    radius: i64,
    arc_angle: f64,
) {
    let (cx, cy) = center;
    for (dx, dy) in midpoint_offsets(radius) {
        #[allow(clippy::cast_precision_loss)]
        let angle = (dx as f64).atan2(dy as f64) + PI;
        if angle <= arc_angle {
            grid.set_2d_checked(cx.saturating_add(dx), cy.saturating_add(dy), T::FILLED);
        }
    }
}

/// Offsets from the centre visited by the midpoint circle algorithm, in
/// plotting order: the four cardinal points, then one 8-way symmetric group
/// per step. Cells on the diagonals may appear more than once.
///
/// Offsets are produced lazily, so memory use does not grow with the radius.
fn midpoint_offsets(radius: i64) -> impl Iterator<Item = (i64, i64)> {
    let mut x = 0_i64;
    let mut y = radius;
    let mut d = 1 - radius;

    let steps = std::iter::from_fn(move || {
        if x >= y - 1 {
            return None;
        }
        x += 1;
        if d < 0 {
            d += 2 * x + 1;
        } else {
            y -= 1;
            d += 2 * (x - y + 1);
        }
        trace!(x, y, d, "midpoint step");
        Some([
            (x, y),
            (y, x),
            (y, -x),
            (x, -y),
            (-x, -y),
            (-y, -x),
            (-y, x),
            (-x, y),
        ])
    });
    [(0, -radius), (0, radius), (radius, 0), (-radius, 0)]
        .into_iter()
        .chain(steps.flatten())
}
