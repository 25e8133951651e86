//! Dense travel-cost matrix.

use thiserror::Error;

/// Reasons a parsed table cannot be used as a travel-cost matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// The table has no rows.
    #[error("distance matrix is empty")]
    Empty,
    /// A row length differs from the number of rows.
    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Entries found in that row.
        len: usize,
        /// Number of rows in the table.
        expected: usize,
    },
    /// An entry is negative, NaN, or infinite.
    #[error("distance matrix entry ({row}, {col}) = {value} is not a finite non-negative number")]
    InvalidEntry {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
        /// The rejected value.
        value: f64,
    },
}

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// No symmetry is assumed: `get(i, j)` and `get(j, i)` may differ.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.get(0, 2), 15.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Builds a matrix from parsed table rows.
    ///
    /// Rejects empty, ragged, or non-square tables and any entry that is
    /// negative or non-finite.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(MatrixError::Empty);
        }

        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(MatrixError::InvalidEntry { row, col, value });
                }
                data.push(value);
            }
        }

        Ok(Self { data, size })
    }

    /// Returns the travel cost from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}
