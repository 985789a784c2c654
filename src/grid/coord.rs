//! Conversion between 1-based user coordinates and 0-based grid indices.
//!
//! Shape generators take positions as 1-based coordinates, where `1` is the
//! first cell along an axis and `n` the last. Everything behind the public
//! entry points works on 0-based signed indices; the functions here are the
//! only place the two conventions meet.

/// A 2D position in 1-based grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Position along the first axis.
    pub x: i64,
    /// Position along the second axis.
    pub y: i64,
}

impl GridPoint {
    /// Creates a point from 1-based coordinates.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the 0-based signed index pair.
    #[must_use]
    pub const fn to_zero_based(self) -> (i64, i64) {
        (self.x.saturating_sub(1), self.y.saturating_sub(1))
    }

    /// Builds a point from a 0-based signed index pair.
    #[must_use]
    pub const fn from_zero_based(x: i64, y: i64) -> Self {
        Self {
            x: x.saturating_add(1),
            y: y.saturating_add(1),
        }
    }

    /// Returns `true` if the point lies in `[1, nx] x [1, ny]`.
    #[must_use]
    pub fn in_grid(self, nx: usize, ny: usize) -> bool {
        in_range(self.x, nx) && in_range(self.y, ny)
    }
}

/// Returns `true` if the 1-based coordinate `c` lies in `[1, n]`.
#[must_use]
pub fn in_range(c: i64, n: usize) -> bool {
    c >= 1 && i64::try_from(n).is_ok_and(|n| c <= n)
}

/// Resolves a 1-based centre coordinate, where `0` selects the grid
/// midpoint `floor(n / 2) + 1`.
#[must_use]
pub fn resolve_center(c: i64, n: usize) -> i64 {
    if c == 0 {
        extent(n) / 2 + 1
    } else {
        c
    }
}

/// Axis length as a signed coordinate.
///
/// Grid extents are bounded by allocatable memory, so the conversion only
/// saturates for sizes no grid can have.
#[must_use]
pub fn extent(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Converts a 0-based index into a signed coordinate for arithmetic with
/// possibly negative offsets.
#[must_use]
pub fn signed(i: usize) -> i64 {
    extent(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_default() {
        assert_eq!(resolve_center(0, 5), 3);
        assert_eq!(resolve_center(0, 4), 3);
        assert_eq!(resolve_center(2, 4), 2);
    }

    #[test]
    fn zero_based_round_trip() {
        let p = GridPoint::new(1, 7);
        assert_eq!(p.to_zero_based(), (0, 6));
        assert_eq!(GridPoint::from_zero_based(0, 6), p);
    }

    #[test]
    fn conversion_saturates_at_index_limits() {
        assert_eq!(GridPoint::new(i64::MIN, 1).to_zero_based(), (i64::MIN, 0));
        assert_eq!(GridPoint::from_zero_based(i64::MAX, 0), GridPoint::new(i64::MAX, 1));
    }

    #[test]
    fn grid_membership_is_inclusive() {
        assert!(GridPoint::new(1, 1).in_grid(3, 3));
        assert!(GridPoint::new(3, 3).in_grid(3, 3));
        assert!(!GridPoint::new(0, 2).in_grid(3, 3));
        assert!(!GridPoint::new(2, 4).in_grid(3, 3));
    }
}
