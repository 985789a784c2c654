use tracing::debug;

use crate::error::Result;
use crate::grid::coord::{extent, resolve_center};
use crate::grid::{Grid, Occupancy};

use super::{MakePixelMap, Shift};

/// Creates a filled ball within a 3D grid.
///
/// A single cell is the centre, so an unclipped ball always spans an odd
/// number of cells along each axis. The ball is placed by rolling a
/// centred ball, so parts extending past an edge wrap to the opposite side.
///
/// The element type selects the output representation:
/// `execute::<bool>()` for a binary map, `execute::<f32>()` for a
/// floating-point map of 0s and 1s.
pub struct MakeBall {
    size: [usize; 3],
    center: [i64; 3],
    radius: f64,
}

impl MakeBall {
    /// Creates a new `MakeBall` operation.
    ///
    /// `center` is given in 1-based grid coordinates; a `0` on any axis
    /// selects that axis' midpoint `floor(n / 2) + 1`.
    #[must_use]
    pub fn new(size: [usize; 3], center: [i64; 3], radius: f64) -> Self {
        Self {
            size,
            center,
            radius,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if any grid size is zero.
    pub fn execute<T: Occupancy>(&self) -> Result<Grid<T>> {
        let center: Vec<i64> = self
            .center
            .iter()
            .zip(&self.size)
            .map(|(&c, &n)| resolve_center(c, n))
            .collect();
        debug!(size = ?self.size, center = ?center, radius = self.radius, "make_ball");

        fill_and_center(&self.size, &center, self.radius)
    }
}

/// Thresholds a centred distance map at `radius` and rolls the filled
/// region so its centre lands on the 1-based `center`.
///
/// The map is built with every axis biased towards index 0, which puts the
/// zero-distance cell at 1-based `ceil(n / 2)`; the roll amount follows.
pub(super) fn fill_and_center<T: Occupancy>(
    size: &[usize],
    center: &[i64],
    radius: f64,
) -> Result<Grid<T>> {
    let r = MakePixelMap::new(size)
        .shift(&vec![Shift::TowardFirst; size.len()])
        .execute()?;
    let filled = r.map(|&d| if d <= radius { T::FILLED } else { T::EMPTY });

    let shifts: Vec<i64> = center
        .iter()
        .zip(size)
        .map(|(&c, &n)| c.saturating_sub((extent(n) + 1) / 2))
        .collect();
    filled.roll(&shifts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unit_ball_has_seven_cells() {
        let ball: Grid<bool> = MakeBall::new([5, 5, 5], [3, 3, 3], 1.0).execute().unwrap();
        assert_eq!(ball.count_filled(), 7);
        assert!(ball.is_filled_at(&[2, 2, 2]));
        assert!(ball.is_filled_at(&[1, 2, 2]));
        assert!(ball.is_filled_at(&[2, 2, 3]));
        assert!(!ball.is_filled_at(&[1, 1, 2]));
    }

    #[test]
    fn zero_center_uses_midpoint() {
        let ball: Grid<u8> = MakeBall::new([6, 6, 6], [0, 0, 0], 0.0).execute().unwrap();
        assert_eq!(ball.filled_indices(), vec![vec![3, 3, 3]]);
    }

    #[test]
    fn float_output() {
        let ball: Grid<f32> = MakeBall::new([3, 3, 3], [2, 2, 2], 0.0).execute().unwrap();
        assert_eq!(ball.as_slice().iter().filter(|&&v| v > 0.5).count(), 1);
        assert!((ball.get(&[1, 1, 1]).unwrap() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn extent_is_odd_diameter() {
        let radius = 3;
        let ball: Grid<bool> = MakeBall::new([15, 15, 15], [8, 8, 8], f64::from(radius))
            .execute()
            .unwrap();
        let along_x = (0..15).filter(|&x| ball.is_filled_at(&[x, 7, 7])).count();
        let along_z = (0..15).filter(|&z| ball.is_filled_at(&[7, 7, z])).count();
        assert_eq!(along_x, 2 * 3 + 1);
        assert_eq!(along_z, 2 * 3 + 1);
    }

    #[test]
    fn ball_past_edge_wraps() {
        let ball: Grid<bool> = MakeBall::new([5, 5, 5], [1, 3, 3], 1.0).execute().unwrap();
        assert_eq!(ball.count_filled(), 7);
        assert!(ball.is_filled_at(&[4, 2, 2]));
    }

    #[test]
    fn centre_at_index_limit_still_wraps() {
        let ball: Grid<bool> = MakeBall::new([5, 5, 5], [i64::MIN, 3, 3], 1.0)
            .execute()
            .unwrap();
        assert_eq!(ball.count_filled(), 7);
    }

    #[test]
    fn zero_size_fails() {
        assert!(MakeBall::new([0, 5, 5], [1, 1, 1], 1.0)
            .execute::<bool>()
            .is_err());
    }
}
