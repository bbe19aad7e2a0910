//! Dataset aggregate: matrix, class labels, and variable names.

use serde::{Deserialize, Serialize};

use super::{ClassLabels, DataMatrix, DomainError, ErrorCode};

/// A validated analysis-ready dataset.
///
/// Construction enforces the structural invariants every analysis relies on;
/// holding a `Dataset` means the shape checks already passed. Degenerate
/// single-variable conditions (constant columns, missing-value gaps) are not
/// structural and are handled per variable during analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    matrix: DataMatrix,
    labels: ClassLabels,
    variable_names: Vec<String>,
}

impl Dataset {
    /// Minimum sample rows for any analysis.
    pub const MIN_SAMPLES: usize = 3;
    /// Minimum variable columns for any analysis.
    pub const MIN_VARIABLES: usize = 2;
    /// Minimum distinct class labels for any analysis.
    pub const MIN_GROUPS: usize = 2;

    /// Assembles a dataset, enforcing the structural invariants.
    ///
    /// Variable names beyond the column count are dropped; missing names are
    /// synthesized as `Variable_{k}` with 1-based positions.
    ///
    /// # Edge Cases
    /// - Label count differing from the sample count is `DIMENSION_MISMATCH`.
    /// - Fewer than 3 samples, 2 variables, or 2 distinct groups aborts with
    ///   the corresponding structural error code.
    pub fn new(
        matrix: DataMatrix,
        labels: ClassLabels,
        variable_names: Vec<String>,
    ) -> Result<Self, DomainError> {
        if labels.len() != matrix.n_samples() {
            return Err(DomainError::new(
                ErrorCode::DimensionMismatch,
                format!(
                    "{} class labels for {} samples",
                    labels.len(),
                    matrix.n_samples()
                ),
            ));
        }
        if matrix.n_samples() < Self::MIN_SAMPLES {
            return Err(DomainError::new(
                ErrorCode::TooFewSamples,
                format!(
                    "Need at least {} samples, got {}",
                    Self::MIN_SAMPLES,
                    matrix.n_samples()
                ),
            ));
        }
        if matrix.n_variables() < Self::MIN_VARIABLES {
            return Err(DomainError::new(
                ErrorCode::TooFewVariables,
                format!(
                    "Need at least {} variables, got {}",
                    Self::MIN_VARIABLES,
                    matrix.n_variables()
                ),
            ));
        }
        if labels.n_groups() < Self::MIN_GROUPS {
            return Err(DomainError::new(
                ErrorCode::TooFewGroups,
                format!(
                    "Need at least {} distinct groups, got {}",
                    Self::MIN_GROUPS,
                    labels.n_groups()
                ),
            ));
        }

        let mut variable_names = variable_names;
        variable_names.truncate(matrix.n_variables());
        for k in variable_names.len()..matrix.n_variables() {
            variable_names.push(format!("Variable_{}", k + 1));
        }

        Ok(Self {
            matrix,
            labels,
            variable_names,
        })
    }

    pub fn matrix(&self) -> &DataMatrix {
        &self.matrix
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// Name of variable column `col`.
    pub fn variable_name(&self, col: usize) -> &str {
        &self.variable_names[col]
    }

    /// Valid (non-NaN) values of column `col`, paired with their class label.
    ///
    /// Sample order is preserved, which keeps downstream summations
    /// deterministic.
    pub fn valid_column_with_labels(&self, col: usize) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.matrix
            .column(col)
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(i, v)| (self.labels.get(i), v))
    }

    /// Valid values of column `col` restricted to one group, in sample order.
    pub fn group_values(&self, col: usize, label: i64) -> Vec<f64> {
        self.valid_column_with_labels(col)
            .filter(|(l, _)| *l == label)
            .map(|(_, v)| v)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_3x2() -> DataMatrix {
        DataMatrix::from_rows(vec![
            vec![1.0, 10.0],
            vec![2.0, f64::NAN],
            vec![3.0, 30.0],
        ])
        .unwrap()
    }

    #[test]
    fn new_accepts_minimal_valid_shape() {
        let ds = Dataset::new(
            matrix_3x2(),
            ClassLabels::new(vec![1, 1, 2]),
            vec!["A".into(), "B".into()],
        )
        .unwrap();
        assert_eq!(ds.variable_names(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn new_rejects_label_count_mismatch() {
        let err = Dataset::new(matrix_3x2(), ClassLabels::new(vec![1, 2]), vec![]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DimensionMismatch);
    }

    #[test]
    fn new_rejects_too_few_samples() {
        let matrix = DataMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let err = Dataset::new(matrix, ClassLabels::new(vec![1, 2]), vec![]).unwrap_err();
        assert_eq!(err.code, ErrorCode::TooFewSamples);
    }

    #[test]
    fn new_rejects_too_few_variables() {
        let matrix = DataMatrix::from_rows(vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let err = Dataset::new(matrix, ClassLabels::new(vec![1, 1, 2]), vec![]).unwrap_err();
        assert_eq!(err.code, ErrorCode::TooFewVariables);
    }

    #[test]
    fn new_rejects_single_group() {
        let err = Dataset::new(matrix_3x2(), ClassLabels::new(vec![1, 1, 1]), vec![]).unwrap_err();
        assert_eq!(err.code, ErrorCode::TooFewGroups);
    }

    #[test]
    fn new_synthesizes_missing_variable_names() {
        let ds = Dataset::new(
            matrix_3x2(),
            ClassLabels::new(vec![1, 1, 2]),
            vec!["Glucose".into()],
        )
        .unwrap();
        assert_eq!(ds.variable_name(0), "Glucose");
        assert_eq!(ds.variable_name(1), "Variable_2");
    }

    #[test]
    fn valid_column_with_labels_skips_missing_values() {
        let ds = Dataset::new(matrix_3x2(), ClassLabels::new(vec![1, 1, 2]), vec![]).unwrap();
        let pairs: Vec<(i64, f64)> = ds.valid_column_with_labels(1).collect();
        assert_eq!(pairs, vec![(1, 10.0), (2, 30.0)]);
    }

    #[test]
    fn group_values_filters_by_label() {
        let ds = Dataset::new(matrix_3x2(), ClassLabels::new(vec![1, 1, 2]), vec![]).unwrap();
        assert_eq!(ds.group_values(0, 1), vec![1.0, 2.0]);
        assert_eq!(ds.group_values(0, 2), vec![3.0]);
        assert_eq!(ds.group_values(1, 1), vec![10.0]);
    }
}
