use tracing::{debug, trace, warn};

use crate::error::{invalid_argument, GridError, Result};
use crate::grid::coord::{extent, GridPoint};
use crate::grid::{Grid, Occupancy};
use crate::math::{normalize_angle, TOLERANCE};

/// How a line is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSpec {
    /// A segment joining two distinct grid points.
    Between { start: GridPoint, end: GridPoint },
    /// A ray from `start` in the direction `angle` (radians), extended until
    /// its Euclidean length reaches `length` or it meets the grid edge.
    ///
    /// An angle of `0` points towards decreasing `y`, `π/2` towards
    /// decreasing `x`, `±π` towards increasing `y` and `-π/2` towards
    /// increasing `x`.
    Angled {
        start: GridPoint,
        angle: f64,
        length: f64,
    },
}

/// Creates a one-cell-thick straight line within a 2D grid.
///
/// Each step picks, from a small fixed set of neighbouring cells, the one
/// closest to the ideal continuous line; ties go to the first candidate.
pub struct MakeLine {
    nx: usize,
    ny: usize,
    spec: LineSpec,
}

impl MakeLine {
    /// Creates a line between two 1-based grid points.
    #[must_use]
    pub fn between(nx: usize, ny: usize, start: GridPoint, end: GridPoint) -> Self {
        Self {
            nx,
            ny,
            spec: LineSpec::Between { start, end },
        }
    }

    /// Creates a line from a 1-based start point at the given angle and length.
    #[must_use]
    pub fn angled(nx: usize, ny: usize, start: GridPoint, angle: f64, length: f64) -> Self {
        Self {
            nx,
            ny,
            spec: LineSpec::Angled {
                start,
                angle,
                length,
            },
        }
    }

    /// Executes the operation.
    ///
    /// A line stopped by the grid edge is returned truncated; that is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a grid size is zero; in two-point mode if the
    /// points coincide or either lies outside the grid; in angle mode if the
    /// angle is not finite or the length is negative or NaN.
    pub fn execute<T: Occupancy>(&self) -> Result<Grid<T>> {
        if self.nx == 0 || self.ny == 0 {
            return Err(GridError::InvalidShape {
                shape: vec![self.nx, self.ny],
            }
            .into());
        }
        match self.spec {
            LineSpec::Between { start, end } => {
                if start == end {
                    return invalid_argument("the first and last points cannot be the same");
                }
                if !start.in_grid(self.nx, self.ny) || !end.in_grid(self.nx, self.ny) {
                    return invalid_argument(format!(
                        "both the start and end points must lie within the grid, between [1 1] and [{} {}]",
                        self.nx, self.ny
                    ));
                }
                debug!(nx = self.nx, ny = self.ny, ?start, ?end, "make_line between");
                let mut grid = Grid::new(&[self.nx, self.ny])?;
                trace_between(&mut grid, start.to_zero_based(), end.to_zero_based());
                Ok(grid)
            }
            LineSpec::Angled {
                start,
                angle,
                length,
            } => {
                if !angle.is_finite() {
                    return invalid_argument(format!("line angle must be finite, got {angle}"));
                }
                if length.is_nan() || length < 0.0 {
                    return invalid_argument(format!(
                        "line length must be non-negative, got {length}"
                    ));
                }
                if !start.in_grid(self.nx, self.ny) {
                    warn!(
                        ?start,
                        nx = self.nx,
                        ny = self.ny,
                        "angled line starts outside the grid; only in-grid cells are drawn"
                    );
                }
                let angle = normalize_angle(angle);
                debug!(nx = self.nx, ny = self.ny, ?start, angle, length, "make_line angled");
                let mut grid = Grid::new(&[self.nx, self.ny])?;
                trace_angled(&mut grid, start.to_zero_based(), angle, length);
                Ok(grid)
            }
        }
    }
}

/// Returns the first candidate with the smallest deviation.
fn nearest_candidate(candidates: &[(i64, i64)], deviation: impl Fn(i64, i64) -> f64) -> (i64, i64) {
    let mut best = candidates[0];
    let mut best_dev = deviation(best.0, best.1);
    for &(x, y) in &candidates[1..] {
        let dev = deviation(x, y);
        if dev < best_dev {
            best = (x, y);
            best_dev = dev;
        }
    }
    best
}

/// Traces the segment between two distinct 0-based points.
#[allow(clippy::cast_precision_loss)]
fn trace_between<T: Occupancy>(grid: &mut Grid<T>, a: (i64, i64), b: (i64, i64)) {
    // Endpoint order must not change the cells chosen.
    let (a, b) = if b < a { (b, a) } else { (a, b) };

    // Vertical lines have no finite gradient; walk straight up in y.
    if a.0 == b.0 {
        let (x, y0, y1) = (a.0, a.1.min(b.1), a.1.max(b.1));
        for y in y0..=y1 {
            grid.set_2d_checked(x, y, T::FILLED);
        }
        return;
    }

    let m = (b.1 - a.1) as f64 / (b.0 - a.0) as f64;
    let c = a.1 as f64 - m * a.0 as f64;
    trace!(m, c, "line equation");

    if m.abs() < 1.0 {
        // Shallow: advance in x from the endpoint with the smaller x.
        let ((mut x, mut y), x_end) = if a.0 < b.0 { (a, b.0) } else { (b, a.0) };
        grid.set_2d_checked(x, y, T::FILLED);
        while x < x_end {
            (x, y) = nearest_candidate(
                &[(x, y - 1), (x, y + 1), (x + 1, y - 1), (x + 1, y), (x + 1, y + 1)],
                |px, py| (py as f64 - (m * px as f64 + c)).powi(2),
            );
            grid.set_2d_checked(x, y, T::FILLED);
        }
    } else {
        // Steep: advance in y from the endpoint with the smaller y.
        let ((mut x, mut y), y_end) = if a.1 < b.1 { (a, b.1) } else { (b, a.1) };
        grid.set_2d_checked(x, y, T::FILLED);
        while y < y_end {
            (x, y) = nearest_candidate(
                &[(x - 1, y), (x + 1, y), (x - 1, y + 1), (x, y + 1), (x + 1, y + 1)],
                |px, py| (px as f64 - (py as f64 - c) / m).powi(2),
            );
            grid.set_2d_checked(x, y, T::FILLED);
        }
    }
}

/// Direction class of an angled line, named by the index directions it
/// moves in. Each sector owns its stepping rule and the grid edges it can
/// leave through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sector {
    /// `angle = ±π`
    PlusY,
    /// `π/2 < angle < π`
    MinusXPlusY,
    /// `angle = π/2`
    MinusX,
    /// `0 < angle < π/2`
    MinusXMinusY,
    /// `angle = 0`
    MinusY,
    /// `-π/2 < angle < 0`
    PlusXMinusY,
    /// `angle = -π/2`
    PlusX,
    /// `-π < angle < -π/2`
    PlusXPlusY,
}

impl Sector {
    /// Classifies an angle already normalized into `(-π, π]`. Angles within
    /// [`TOLERANCE`] of an axis direction are treated as on that axis.
    fn classify(angle: f64) -> Self {
        use std::f64::consts::{FRAC_PI_2, PI};
        let near = |target: f64| (angle - target).abs() < TOLERANCE;

        if near(PI) || near(-PI) {
            Self::PlusY
        } else if near(FRAC_PI_2) {
            Self::MinusX
        } else if near(0.0) {
            Self::MinusY
        } else if near(-FRAC_PI_2) {
            Self::PlusX
        } else if angle > FRAC_PI_2 {
            Self::MinusXPlusY
        } else if angle > 0.0 {
            Self::MinusXMinusY
        } else if angle > -FRAC_PI_2 {
            Self::PlusXMinusY
        } else {
            Self::PlusXPlusY
        }
    }

    /// Next cell after `(x, y)`; diagonal sectors pick the candidate whose
    /// `y` is closest to the line `y = m x + c`.
    #[allow(clippy::cast_precision_loss)]
    fn step(self, x: i64, y: i64, m: f64, c: f64) -> (i64, i64) {
        let diagonal = |candidates: &[(i64, i64)]| {
            nearest_candidate(candidates, |px, py| (py as f64 - (m * px as f64 + c)).powi(2))
        };
        let (left, right) = (x.saturating_sub(1), x.saturating_add(1));
        let (down, up) = (y.saturating_sub(1), y.saturating_add(1));
        match self {
            Self::PlusY => (x, up),
            Self::MinusX => (left, y),
            Self::MinusY => (x, down),
            Self::PlusX => (right, y),
            Self::MinusXPlusY => diagonal(&[(left, y), (left, up), (x, up)]),
            Self::MinusXMinusY => diagonal(&[(left, y), (left, down), (x, down)]),
            Self::PlusXMinusY => diagonal(&[(right, y), (right, down), (x, down)]),
            Self::PlusXPlusY => diagonal(&[(right, y), (right, up), (x, up)]),
        }
    }

    /// Whether the 0-based cell `(x, y)` has crossed one of the edges this
    /// sector moves towards.
    fn leaves_grid(self, x: i64, y: i64, nx: i64, ny: i64) -> bool {
        match self {
            Self::PlusY => y >= ny,
            Self::MinusXPlusY => x < 0 || y >= ny,
            Self::MinusX => x < 0,
            Self::MinusXMinusY => x < 0 || y < 0,
            Self::MinusY => y < 0,
            Self::PlusXMinusY => x >= nx || y < 0,
            Self::PlusX => x >= nx,
            Self::PlusXPlusY => x >= nx || y >= ny,
        }
    }
}

/// Traces a ray from the 0-based `start` at a normalized `angle`.
#[allow(clippy::cast_precision_loss)]
fn trace_angled<T: Occupancy>(grid: &mut Grid<T>, start: (i64, i64), angle: f64, length: f64) {
    let nx = extent(grid.shape()[0]);
    let ny = extent(grid.shape()[1]);
    let sector = Sector::classify(angle);

    // The ray moves along (-sin θ, -cos θ), so its gradient dy/dx is cot θ.
    // Only diagonal sectors use it, where sin θ is never zero.
    let m = angle.cos() / angle.sin();
    let c = start.1 as f64 - m * start.0 as f64;
    trace!(?sector, m, c, "angled line");

    let (mut x, mut y) = start;
    grid.set_2d_checked(x, y, T::FILLED);
    let mut drawn = 0.0;
    while drawn < length {
        let (next_x, next_y) = sector.step(x, y, m, c);
        if sector.leaves_grid(next_x, next_y, nx, ny) {
            trace!(x, y, drawn, "line truncated at grid edge");
            break;
        }
        (x, y) = (next_x, next_y);
        grid.set_2d_checked(x, y, T::FILLED);
        drawn = (x as f64 - start.0 as f64).hypot(y as f64 - start.1 as f64);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn p(x: i64, y: i64) -> GridPoint {
        GridPoint::new(x, y)
    }

    fn filled(grid: &Grid<bool>) -> Vec<(usize, usize)> {
        grid.filled_indices().iter().map(|i| (i[0], i[1])).collect()
    }

    // ── two-point mode ──

    #[test]
    fn horizontal_in_y() {
        let l: Grid<bool> = MakeLine::between(3, 5, p(2, 1), p(2, 5)).execute().unwrap();
        assert_eq!(filled(&l), vec![(1, 0), (1, 1), (1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn along_x_axis() {
        let l: Grid<bool> = MakeLine::between(5, 3, p(5, 2), p(1, 2)).execute().unwrap();
        assert_eq!(filled(&l), vec![(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]);
    }

    #[test]
    fn diagonal_covers_every_cell() {
        let l: Grid<bool> = MakeLine::between(6, 6, p(1, 1), p(6, 6)).execute().unwrap();
        assert_eq!(l.count_filled(), 6);
        for i in 0..6 {
            assert!(l.is_filled_at(&[i, i]));
        }
    }

    #[test]
    fn shallow_line() {
        let l: Grid<bool> = MakeLine::between(10, 5, p(1, 1), p(10, 5)).execute().unwrap();
        assert_eq!(
            filled(&l),
            vec![
                (0, 0),
                (1, 0),
                (2, 1),
                (3, 1),
                (4, 2),
                (5, 2),
                (6, 3),
                (7, 3),
                (8, 4),
                (9, 4)
            ]
        );
    }

    #[test]
    fn steep_line_with_negative_gradient() {
        let l: Grid<bool> = MakeLine::between(4, 8, p(4, 1), p(1, 8)).execute().unwrap();
        assert_eq!(
            filled(&l),
            vec![(0, 6), (0, 7), (1, 4), (1, 5), (2, 2), (2, 3), (3, 0), (3, 1)]
        );
    }

    #[test]
    fn endpoints_are_marked() {
        let l: Grid<bool> = MakeLine::between(9, 9, p(2, 7), p(8, 3)).execute().unwrap();
        assert!(l.is_filled_at(&[1, 6]));
        assert!(l.is_filled_at(&[7, 2]));
    }

    #[test]
    fn identical_points_fail() {
        let r = MakeLine::between(5, 5, p(2, 2), p(2, 2)).execute::<bool>();
        assert!(r.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn points_outside_grid_fail() {
        assert!(MakeLine::between(5, 5, p(0, 2), p(3, 3)).execute::<bool>().is_err());
        assert!(MakeLine::between(5, 5, p(2, 2), p(3, 6)).execute::<bool>().is_err());
    }

    // ── angle mode ──

    #[test]
    fn sector_classification() {
        assert_eq!(Sector::classify(PI), Sector::PlusY);
        assert_eq!(Sector::classify(3.0 * FRAC_PI_4), Sector::MinusXPlusY);
        assert_eq!(Sector::classify(FRAC_PI_2), Sector::MinusX);
        assert_eq!(Sector::classify(FRAC_PI_4), Sector::MinusXMinusY);
        assert_eq!(Sector::classify(0.0), Sector::MinusY);
        assert_eq!(Sector::classify(-FRAC_PI_4), Sector::PlusXMinusY);
        assert_eq!(Sector::classify(-FRAC_PI_2), Sector::PlusX);
        assert_eq!(Sector::classify(-3.0 * FRAC_PI_4), Sector::PlusXPlusY);
    }

    #[test]
    fn axis_directions() {
        let up: Grid<bool> = MakeLine::angled(7, 7, p(4, 4), 0.0, 2.0).execute().unwrap();
        assert_eq!(filled(&up), vec![(3, 1), (3, 2), (3, 3)]);
        let down: Grid<bool> = MakeLine::angled(7, 7, p(4, 4), PI, 2.0).execute().unwrap();
        assert_eq!(filled(&down), vec![(3, 3), (3, 4), (3, 5)]);
        let left: Grid<bool> = MakeLine::angled(7, 7, p(4, 4), FRAC_PI_2, 2.0).execute().unwrap();
        assert_eq!(filled(&left), vec![(1, 3), (2, 3), (3, 3)]);
        let right: Grid<bool> = MakeLine::angled(7, 7, p(4, 4), -FRAC_PI_2, 2.0).execute().unwrap();
        assert_eq!(filled(&right), vec![(3, 3), (4, 3), (5, 3)]);
    }

    #[test]
    fn minus_pi_matches_pi() {
        let a: Grid<bool> = MakeLine::angled(7, 7, p(4, 4), -PI, 3.0).execute().unwrap();
        let b: Grid<bool> = MakeLine::angled(7, 7, p(4, 4), PI, 3.0).execute().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn diagonal_angle() {
        let l: Grid<bool> = MakeLine::angled(9, 9, p(5, 5), -3.0 * FRAC_PI_4, 3.0)
            .execute()
            .unwrap();
        assert_eq!(filled(&l), vec![(4, 4), (5, 5), (6, 6), (7, 7)]);
    }

    #[test]
    fn shallow_angle_stays_near_the_ray() {
        let angle = 1.2;
        let l: Grid<bool> = MakeLine::angled(20, 20, p(18, 10), angle, 10.0)
            .execute()
            .unwrap();
        let (sx, sy) = (17.0_f64, 9.0_f64);
        let (dx, dy) = (-f64::sin(angle), -f64::cos(angle));
        for (x, y) in filled(&l) {
            // perpendicular distance from the ideal ray
            let (vx, vy) = (x as f64 - sx, y as f64 - sy);
            let dist = (vx * dy - vy * dx).abs();
            assert!(dist <= 0.75, "cell ({x}, {y}) is {dist} from the ray");
        }
        assert!(l.count_filled() >= 10);
    }

    #[test]
    fn truncated_at_edge() {
        let l: Grid<bool> = MakeLine::angled(5, 5, p(2, 3), FRAC_PI_2, 10.0).execute().unwrap();
        assert_eq!(filled(&l), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn infinite_length_runs_to_edge() {
        let l: Grid<bool> = MakeLine::angled(6, 6, p(1, 1), -3.0 * FRAC_PI_4, f64::INFINITY)
            .execute()
            .unwrap();
        assert_eq!(l.count_filled(), 6);
    }

    #[test]
    fn angle_is_normalized() {
        let a: Grid<bool> = MakeLine::angled(9, 9, p(5, 5), FRAC_PI_4 + 4.0 * PI, 3.0)
            .execute()
            .unwrap();
        let b: Grid<bool> = MakeLine::angled(9, 9, p(5, 5), FRAC_PI_4, 3.0).execute().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn start_outside_grid_is_not_an_error() {
        let l: Grid<bool> = MakeLine::angled(5, 5, p(8, 3), FRAC_PI_2, 5.0).execute().unwrap();
        // steps 7, 6 fall outside, then x = 5, 4, 3 (1-based) are drawn
        assert_eq!(filled(&l), vec![(2, 2), (3, 2), (4, 2)]);
    }

    #[test]
    fn start_at_index_limits_is_blank() {
        let l: Grid<bool> = MakeLine::angled(5, 5, p(i64::MIN, 3), FRAC_PI_2, 5.0)
            .execute()
            .unwrap();
        assert_eq!(l.count_filled(), 0);
        let l: Grid<bool> = MakeLine::angled(5, 5, p(i64::MAX, 3), -FRAC_PI_2, 5.0)
            .execute()
            .unwrap();
        assert_eq!(l.count_filled(), 0);
        let l: Grid<bool> = MakeLine::angled(5, 5, p(i64::MAX, 3), FRAC_PI_2, 5.0)
            .execute()
            .unwrap();
        assert_eq!(l.count_filled(), 0);
    }

    #[test]
    fn invalid_angle_or_length_fails() {
        assert!(MakeLine::angled(5, 5, p(2, 2), f64::NAN, 2.0).execute::<bool>().is_err());
        assert!(MakeLine::angled(5, 5, p(2, 2), 0.3, -1.0).execute::<bool>().is_err());
    }

    proptest! {
        #[test]
        fn corner_to_corner_is_monotonic(nx in 2usize..24, ny in 2usize..24) {
            let end = p(i64::try_from(nx).unwrap(), i64::try_from(ny).unwrap());
            let l: Grid<bool> = MakeLine::between(nx, ny, p(1, 1), end).execute().unwrap();
            prop_assert_eq!(l.count_filled(), nx.max(ny));

            // Exactly one cell per step along the major axis, moving forward
            // along the minor axis.
            let major_x = nx > ny;
            let mut last_minor = 0;
            for i in 0..nx.max(ny) {
                let cells: Vec<usize> = if major_x {
                    (0..ny).filter(|&y| l.is_filled_at(&[i, y])).collect()
                } else {
                    (0..nx).filter(|&x| l.is_filled_at(&[x, i])).collect()
                };
                prop_assert_eq!(cells.len(), 1);
                prop_assert!(cells[0] >= last_minor);
                last_minor = cells[0];
            }
        }

        #[test]
        fn segment_is_symmetric_in_endpoints(
            ax in 1i64..12, ay in 1i64..12, bx in 1i64..12, by in 1i64..12,
        ) {
            prop_assume!((ax, ay) != (bx, by));
            let l: Grid<bool> = MakeLine::between(11, 11, p(ax, ay), p(bx, by)).execute().unwrap();
            let reversed: Grid<bool> =
                MakeLine::between(11, 11, p(bx, by), p(ax, ay)).execute().unwrap();
            prop_assert_eq!(&l, &reversed);
            prop_assert!(l.is_filled_at(&[usize::try_from(ax - 1).unwrap(), usize::try_from(ay - 1).unwrap()]));
            prop_assert!(l.is_filled_at(&[usize::try_from(bx - 1).unwrap(), usize::try_from(by - 1).unwrap()]));
        }
    }
}
