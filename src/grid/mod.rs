//! N-dimensional occupancy and distance grids.
//!
//! A [`Grid`] stores its elements in row-major order with axis 0 as the
//! slowest-varying (x) axis, so a `[nx, ny]` grid is laid out as `nx` rows
//! of `ny` elements. All indices here are 0-based; the 1-based coordinates
//! used by the shape generators are converted in [`coord`].

pub mod coord;

pub use coord::GridPoint;

use std::fmt;

use crate::error::{GridError, Result};

/// Element types that can mark cells as empty or filled.
///
/// `Default::default()` must equal [`Occupancy::EMPTY`] so that freshly
/// allocated grids start empty.
pub trait Occupancy: Copy + Default + PartialEq + fmt::Debug {
    /// Value of an unmarked cell.
    const EMPTY: Self;
    /// Value of a marked cell.
    const FILLED: Self;

    /// Returns `true` unless the value equals [`Occupancy::EMPTY`].
    fn is_filled(self) -> bool {
        self != Self::EMPTY
    }
}

impl Occupancy for bool {
    const EMPTY: Self = false;
    const FILLED: Self = true;
}

impl Occupancy for u8 {
    const EMPTY: Self = 0;
    const FILLED: Self = 1;
}

impl Occupancy for i32 {
    const EMPTY: Self = 0;
    const FILLED: Self = 1;
}

impl Occupancy for f32 {
    const EMPTY: Self = 0.0;
    const FILLED: Self = 1.0;
}

impl Occupancy for f64 {
    const EMPTY: Self = 0.0;
    const FILLED: Self = 1.0;
}

/// Dense N-dimensional array with row-major storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    shape: Vec<usize>,
    strides: Vec<usize>,
    data: Vec<T>,
}

fn validate_shape(shape: &[usize]) -> Result<()> {
    if shape.is_empty() || shape.contains(&0) {
        return Err(GridError::InvalidShape {
            shape: shape.to_vec(),
        }
        .into());
    }
    Ok(())
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    strides
}

impl<T: Clone + Default> Grid<T> {
    /// Creates a grid with every element set to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidShape`] if `shape` is empty or contains a zero.
    pub fn new(shape: &[usize]) -> Result<Self> {
        Self::filled_with(shape, T::default())
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every element set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidShape`] if `shape` is empty or contains a zero.
    pub fn filled_with(shape: &[usize], value: T) -> Result<Self> {
        validate_shape(shape)?;
        let len = shape.iter().product();
        Ok(Self {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            data: vec![value; len],
        })
    }

    /// Cyclically shifts the grid along every axis.
    ///
    /// The element at index `i` moves to `(i + shift).rem_euclid(n)` on each
    /// axis, so negative shifts move elements towards the start and anything
    /// pushed past an edge re-enters from the opposite side.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if `shifts` does not have one
    /// entry per axis.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn roll(&self, shifts: &[i64]) -> Result<Self> {
        if shifts.len() != self.ndim() {
            return Err(GridError::ShapeMismatch {
                left: self.shape.clone(),
                right: vec![shifts.len()],
            }
            .into());
        }
        // Reduce each shift into [0, n) once so the per-cell lookup is a plain
        // wrapping subtraction.
        let offsets: Vec<usize> = shifts
            .iter()
            .zip(&self.shape)
            .map(|(&s, &n)| s.rem_euclid(n as i64) as usize)
            .collect();

        let mut source = vec![0; self.ndim()];
        Self::from_fn(&self.shape, |dest| {
            for (axis, src) in source.iter_mut().enumerate() {
                let n = self.shape[axis];
                *src = (dest[axis] + n - offsets[axis]) % n;
            }
            self.data[self.offset_of(&source)].clone()
        })
    }
}

impl<T> Grid<T> {
    /// Creates a grid by evaluating `f` at every index in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidShape`] if `shape` is empty or contains a zero.
    pub fn from_fn(shape: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Result<Self> {
        validate_shape(shape)?;
        let len: usize = shape.iter().product();
        let mut index = vec![0; shape.len()];
        let mut data = Vec::with_capacity(len);
        for _ in 0..len {
            data.push(f(&index));
            increment_index(&mut index, shape);
        }
        Ok(Self {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            data,
        })
    }

    /// Returns the extent of every axis.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of axes.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: a grid has at least one element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the elements in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn offset_of(&self, index: &[usize]) -> usize {
        index.iter().zip(&self.strides).map(|(i, s)| i * s).sum()
    }

    fn checked_offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.ndim() || index.iter().zip(&self.shape).any(|(i, n)| i >= n) {
            return None;
        }
        Some(self.offset_of(index))
    }

    /// Converts a row-major element offset back into a multi-index.
    #[must_use]
    pub fn unravel(&self, mut offset: usize) -> Vec<usize> {
        self.strides
            .iter()
            .map(|&stride| {
                let i = offset / stride;
                offset %= stride;
                i
            })
            .collect()
    }

    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.checked_offset(index).map(|o| &self.data[o])
    }

    /// Returns a mutable reference to the element at `index`, or `None` if out of bounds.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        self.checked_offset(index).map(|o| &mut self.data[o])
    }

    /// Overwrites the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfBounds`] if `index` is outside the grid.
    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        match self.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(GridError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.clone(),
            }
            .into()),
        }
    }

    /// Writes `value` at the signed 0-based 2D index `(x, y)` if it lies
    /// inside the grid. Returns whether the write happened.
    ///
    /// This is the only write path used by the rasterizers, so a candidate
    /// point outside the grid is dropped instead of wrapping or panicking.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn set_2d_checked(&mut self, x: i64, y: i64, value: T) -> bool {
        if self.ndim() != 2 || x < 0 || y < 0 {
            return false;
        }
        match self.checked_offset(&[x as usize, y as usize]) {
            Some(o) => {
                self.data[o] = value;
                true
            }
            None => false,
        }
    }

    /// Applies `f` to every element, producing a grid of the same shape.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Iterates over `(index, element)` pairs in row-major order.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Vec<usize>, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(offset, value)| (self.unravel(offset), value))
    }
}

impl<T: Occupancy> Grid<T> {
    /// Number of filled cells.
    #[must_use]
    pub fn count_filled(&self) -> usize {
        self.data.iter().filter(|v| v.is_filled()).count()
    }

    /// Indices of filled cells in row-major order.
    #[must_use]
    pub fn filled_indices(&self) -> Vec<Vec<usize>> {
        self.indexed_iter()
            .filter(|(_, v)| v.is_filled())
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns `true` if the cell at `index` exists and is filled.
    #[must_use]
    pub fn is_filled_at(&self, index: &[usize]) -> bool {
        self.get(index).is_some_and(|v| v.is_filled())
    }

    /// Cell-wise logical OR of two occupancy grids.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if the shapes differ.
    pub fn union(&self, other: &Self) -> Result<Self> {
        if self.shape != other.shape {
            return Err(GridError::ShapeMismatch {
                left: self.shape.clone(),
                right: other.shape.clone(),
            }
            .into());
        }
        Ok(Self {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| {
                    if a.is_filled() || b.is_filled() {
                        T::FILLED
                    } else {
                        T::EMPTY
                    }
                })
                .collect(),
        })
    }
}

/// Advances a row-major multi-index by one element.
fn increment_index(index: &mut [usize], shape: &[usize]) {
    for axis in (0..index.len()).rev() {
        index[axis] += 1;
        if index[axis] < shape[axis] {
            return;
        }
        index[axis] = 0;
    }
}

/// Text rendering of 2D occupancy grids: one line per x index, `#` for
/// filled cells and `.` for empty ones. Other dimensionalities print their
/// shape only.
impl<T: Occupancy> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ndim() != 2 {
            return write!(f, "Grid{:?}", self.shape);
        }
        for (x, row) in self.data.chunks(self.shape[1]).enumerate() {
            if x > 0 {
                writeln!(f)?;
            }
            for v in row {
                f.write_str(if v.is_filled() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
