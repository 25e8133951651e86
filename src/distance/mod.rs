//! Travel-cost matrices.
//!
//! Provides the dense matrix parsed from the uploaded distance table.

mod matrix;

pub use matrix::{DistanceMatrix, MatrixError};
