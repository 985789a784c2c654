use tracing::debug;

use crate::error::{invalid_argument, GridError, Result};
use crate::grid::coord::{in_range, resolve_center};
use crate::grid::{Grid, Occupancy};

use super::make_ball::fill_and_center;

/// Creates a filled disc within a 2D grid.
///
/// A single cell is the centre, so an unclipped disc always spans an odd
/// number of cells along each axis. If part of the disc overlaps the grid
/// edge, the rest wraps to the opposite side.
pub struct MakeDisc {
    nx: usize,
    ny: usize,
    cx: i64,
    cy: i64,
    radius: f64,
}

impl MakeDisc {
    /// Creates a new `MakeDisc` operation.
    ///
    /// `cx`, `cy` are 1-based; `0` selects the grid midpoint on that axis.
    #[must_use]
    pub fn new(nx: usize, ny: usize, cx: i64, cy: i64, radius: f64) -> Self {
        Self {
            nx,
            ny,
            cx,
            cy,
            radius,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a grid size is zero or the centre lies outside
    /// the grid.
    pub fn execute<T: Occupancy>(&self) -> Result<Grid<T>> {
        if self.nx == 0 || self.ny == 0 {
            return Err(GridError::InvalidShape {
                shape: vec![self.nx, self.ny],
            }
            .into());
        }
        let cx = resolve_center(self.cx, self.nx);
        let cy = resolve_center(self.cy, self.ny);
        if !in_range(cx, self.nx) || !in_range(cy, self.ny) {
            return invalid_argument(format!(
                "disc centre ({cx}, {cy}) must be within the {}x{} grid",
                self.nx, self.ny
            ));
        }
        debug!(nx = self.nx, ny = self.ny, cx, cy, radius = self.radius, "make_disc");

        fill_and_center(&[self.nx, self.ny], &[cx, cy], self.radius)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unit_disc_is_plus_shape() {
        let disc: Grid<bool> = MakeDisc::new(5, 5, 3, 3, 1.0).execute().unwrap();
        assert_eq!(disc.count_filled(), 5);
        assert_eq!(
            disc.filled_indices(),
            vec![vec![1, 2], vec![2, 1], vec![2, 2], vec![2, 3], vec![3, 2]]
        );
    }

    #[test]
    fn off_centre_disc() {
        let disc: Grid<bool> = MakeDisc::new(6, 8, 2, 6, 1.0).execute().unwrap();
        assert_eq!(
            disc.filled_indices(),
            vec![vec![0, 5], vec![1, 4], vec![1, 5], vec![1, 6], vec![2, 5]]
        );
    }

    #[test]
    fn zero_centre_uses_midpoint() {
        let disc: Grid<bool> = MakeDisc::new(4, 6, 0, 0, 0.0).execute().unwrap();
        assert_eq!(disc.filled_indices(), vec![vec![2, 3]]);
    }

    #[test]
    fn disc_wraps_at_edge() {
        let disc: Grid<bool> = MakeDisc::new(5, 5, 1, 1, 1.0).execute().unwrap();
        assert_eq!(disc.count_filled(), 5);
        assert!(disc.is_filled_at(&[4, 0]));
        assert!(disc.is_filled_at(&[0, 4]));
    }

    #[test]
    fn centre_outside_grid_fails() {
        let r = MakeDisc::new(5, 5, 6, 3, 1.0).execute::<bool>();
        assert!(r.unwrap_err().is_invalid_argument());
        assert!(MakeDisc::new(5, 5, -1, 3, 1.0).execute::<bool>().is_err());
    }

    #[test]
    fn render() {
        let disc: Grid<bool> = MakeDisc::new(5, 5, 3, 3, 2.0).execute().unwrap();
        assert_eq!(disc.to_string(), "..#..\n.###.\n#####\n.###.\n..#..");
    }

    proptest! {
        #[test]
        fn diameter_is_odd_and_matches_radius(radius in 0u32..6, nx in 13usize..20, ny in 13usize..20) {
            let disc: Grid<bool> = MakeDisc::new(nx, ny, 7, 7, f64::from(radius)).execute().unwrap();
            let row = (0..ny).filter(|&y| disc.is_filled_at(&[6, y])).count();
            let col = (0..nx).filter(|&x| disc.is_filled_at(&[x, 6])).count();
            let expected = 2 * usize::try_from(radius).unwrap() + 1;
            prop_assert_eq!(row, expected);
            prop_assert_eq!(col, expected);
        }
    }
}
