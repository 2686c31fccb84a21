//! Square, row-major cell storage.

use serde::Serialize;

use crate::SpatialError;

/// An N×N matrix of per-cell values, stored row-major.
///
/// Row `i` runs along latitude, column `j` along longitude, matching the
/// `(i, j)` cell addressing of [`crate::Grid`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellMatrix<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> CellMatrix<T> {
    /// Creates a `size`×`size` matrix filled with `T::default()`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![T::default(); size * size],
        }
    }

    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::NotSquare`] if any row's length differs from
    /// the number of rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, SpatialError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(SpatialError::NotSquare {
                    rows: size,
                    row,
                    len: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self { size, cells })
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`size²`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` for a 0×0 matrix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value at `(row, col)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.size && col < self.size {
            self.cells.get(row * self.size + col).copied()
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.size && col < self.size {
            self.cells.get_mut(row * self.size + col)
        } else {
            None
        }
    }

    /// All cell values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.cells
    }

    /// Iterates over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Applies `f` to every cell, preserving shape.
    #[must_use]
    pub fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> CellMatrix<U> {
        CellMatrix {
            size: self.size,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }
}

impl CellMatrix<u32> {
    /// Sum of all cell counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum()
    }

    /// Counts converted to `f64` values.
    #[must_use]
    pub fn to_f64(&self) -> CellMatrix<f64> {
        self.map(f64::from)
    }
}
