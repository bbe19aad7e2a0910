//! Numeric data matrix with NaN-encoded missing values.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Samples-by-variables matrix of measurements, stored row-major.
///
/// Missing values are encoded as `f64::NAN` and excluded variable-by-variable
/// during analysis. Columns are exposed as strided iterators over the flat
/// buffer, so per-variable passes never copy the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataMatrix {
    values: Vec<f64>,
    n_samples: usize,
    n_variables: usize,
}

impl DataMatrix {
    /// Creates a matrix from sample rows.
    ///
    /// Every row must have the same length. An empty row set produces a
    /// 0 x 0 matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let n_samples = rows.len();
        let n_variables = rows.first().map_or(0, |r| r.len());

        let mut values = Vec::with_capacity(n_samples * n_variables);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_variables {
                return Err(ValidationError::invalid_format(
                    "rows",
                    format!(
                        "row {} has {} values, expected {}",
                        i,
                        row.len(),
                        n_variables
                    ),
                ));
            }
            values.extend(row);
        }

        Ok(Self {
            values,
            n_samples,
            n_variables,
        })
    }

    /// Creates a matrix from a flat row-major buffer.
    pub fn from_flat(
        values: Vec<f64>,
        n_samples: usize,
        n_variables: usize,
    ) -> Result<Self, ValidationError> {
        if values.len() != n_samples * n_variables {
            return Err(ValidationError::invalid_format(
                "values",
                format!(
                    "buffer holds {} values, expected {} ({} x {})",
                    values.len(),
                    n_samples * n_variables,
                    n_samples,
                    n_variables
                ),
            ));
        }
        Ok(Self {
            values,
            n_samples,
            n_variables,
        })
    }

    /// Number of sample rows.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Number of variable columns.
    pub fn n_variables(&self) -> usize {
        self.n_variables
    }

    /// Value at (row, col). NaN means missing.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.n_variables + col]
    }

    /// Sample row as a contiguous slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.n_variables;
        &self.values[start..start + self.n_variables]
    }

    /// Strided iterator over column `col`, one value per sample.
    ///
    /// Includes NaN entries; pair with [`Self::valid_column`] when missing
    /// values must be excluded.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(col < self.n_variables, "column {} out of bounds", col);
        self.values[col..].iter().step_by(self.n_variables).copied()
    }

    /// Column `col` with NaN entries removed, keeping sample order.
    pub fn valid_column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.column(col).filter(|v| !v.is_nan())
    }

    /// Sample rows materialized as vectors, in row order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.n_variables.max(1)).take(self.n_samples)
    }
}
