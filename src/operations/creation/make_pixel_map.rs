use std::str::FromStr;

use tracing::debug;

use crate::error::{invalid_argument, GeometryError, GridError, Result, SonogridError};
use crate::grid::coord::extent;
use crate::grid::Grid;

/// How many cells per axis are treated as the exact centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginSize {
    /// One centre cell per axis.
    #[default]
    Single,
    /// Two adjacent centre cells per axis, both at distance zero.
    Double,
}

impl FromStr for OriginSize {
    type Err = SonogridError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            other => Err(GeometryError::InvalidArgument(format!(
                "unknown origin size {other:?}, expected \"single\" or \"double\""
            ))
            .into()),
        }
    }
}

/// Direction in which the centre moves when the axis length and origin
/// size do not admit a symmetric centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shift {
    /// Centre biased towards index 0.
    TowardFirst,
    /// Centre biased towards the last index.
    #[default]
    TowardFinal,
}

/// Centred integer coordinates along one axis of `n` cells.
///
/// ```text
///            single                    double
/// even n     -n/2 ..= n/2-1  (Final)   -n/2+1 ..= 0, 0 ..= n/2-1
///            -n/2+1 ..= n/2  (First)
/// odd n      -h ..= h                  -h ..= 0, 0 ..= h-1    (Final)
///                                      -h+1 ..= 0, 0 ..= h    (First)
/// ```
/// where `h = (n - 1) / 2`. The result always has `n` entries.
#[must_use]
pub fn pixel_dim(n: usize, origin: OriginSize, shift: Shift) -> Vec<i64> {
    let n = extent(n);
    if n % 2 == 0 {
        let h = n / 2;
        match (origin, shift) {
            (OriginSize::Single, Shift::TowardFinal) => (-h..=h - 1).collect(),
            (OriginSize::Single, Shift::TowardFirst) => (-h + 1..=h).collect(),
            (OriginSize::Double, _) => (-h + 1..=0).chain(0..=h - 1).collect(),
        }
    } else {
        let h = (n - 1) / 2;
        match (origin, shift) {
            (OriginSize::Single, _) => (-h..=h).collect(),
            (OriginSize::Double, Shift::TowardFinal) => (-h..=0).chain(0..h).collect(),
            (OriginSize::Double, Shift::TowardFirst) => (-h + 1..=0).chain(0..=h).collect(),
        }
    }
}

/// Creates a 2D or 3D map of each cell's Euclidean distance from the centre.
///
/// By default a single-cell centre is used, shifted towards the final index
/// on axes with an even number of cells:
///
/// ```text
/// odd, single     even, single (TowardFinal)     even, double
///   x x x           x x x x                        x x x x
///   x 0 x           x x x x                        x 0 0 x
///   x x x           x x 0 x                        x 0 0 x
///                   x x x x                        x x x x
/// ```
pub struct MakePixelMap {
    sizes: Vec<usize>,
    origin: OriginSize,
    shift: Option<Vec<Shift>>,
}

impl MakePixelMap {
    /// Creates a new `MakePixelMap` operation for a grid of the given sizes.
    #[must_use]
    pub fn new(sizes: &[usize]) -> Self {
        Self {
            sizes: sizes.to_vec(),
            origin: OriginSize::default(),
            shift: None,
        }
    }

    /// Sets the number of centre cells per axis.
    #[must_use]
    pub fn origin(mut self, origin: OriginSize) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the per-axis centre bias. Must have one entry per axis.
    #[must_use]
    pub fn shift(mut self, shift: &[Shift]) -> Self {
        self.shift = Some(shift.to_vec());
        self
    }

    /// Executes the operation, returning the distance map.
    ///
    /// # Errors
    ///
    /// Returns an error if the map is not 2D or 3D, a size is zero, or the
    /// shift vector length differs from the number of axes.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<Grid<f64>> {
        let ndim = self.sizes.len();
        if ndim != 2 && ndim != 3 {
            return invalid_argument(format!(
                "pixel maps must be 2D or 3D, got {ndim} sizes"
            ));
        }
        if self.sizes.contains(&0) {
            return Err(GridError::InvalidShape {
                shape: self.sizes.clone(),
            }
            .into());
        }
        let shift = match &self.shift {
            Some(s) if s.len() != ndim => {
                return invalid_argument(format!(
                    "shift must have {ndim} elements for a {ndim}D map, got {}",
                    s.len()
                ));
            }
            Some(s) => s.clone(),
            None => vec![Shift::default(); ndim],
        };
        debug!(sizes = ?self.sizes, origin = ?self.origin, shift = ?shift, "make_pixel_map");

        let axes: Vec<Vec<i64>> = self
            .sizes
            .iter()
            .zip(&shift)
            .map(|(&n, &s)| pixel_dim(n, self.origin, s))
            .collect();

        Grid::from_fn(&self.sizes, |index| {
            let sum_sq: i64 = axes
                .iter()
                .zip(index)
                .map(|(axis, &i)| axis[i] * axis[i])
                .sum();
            (sum_sq as f64).sqrt()
        })
    }
}
