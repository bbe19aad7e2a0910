//! Class label assignments and the derived group ordering.

use serde::{Deserialize, Serialize};

/// One integer class label per sample row.
///
/// The distinct labels, sorted ascending, define the canonical group order
/// used everywhere downstream: pairwise comparisons, group statistics, and
/// boxplots all walk groups in this order. Display names are `Group{label}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLabels {
    labels: Vec<i64>,
    distinct: Vec<i64>,
}

impl ClassLabels {
    /// Creates labels from one integer per sample.
    pub fn new(labels: Vec<i64>) -> Self {
        let mut distinct = labels.clone();
        distinct.sort_unstable();
        distinct.dedup();
        Self { labels, distinct }
    }

    /// Number of labeled samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when no samples are labeled.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for sample `i`.
    pub fn get(&self, i: usize) -> i64 {
        self.labels[i]
    }

    /// All labels in sample order.
    pub fn as_slice(&self) -> &[i64] {
        &self.labels
    }

    /// Distinct labels, sorted ascending.
    pub fn distinct(&self) -> &[i64] {
        &self.distinct
    }

    /// Number of distinct groups.
    pub fn n_groups(&self) -> usize {
        self.distinct.len()
    }

    /// Sample indices carrying `label`, in sample order.
    pub fn indices_of(&self, label: i64) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(move |(_, &l)| l == label)
            .map(|(i, _)| i)
    }

    /// Display name for a group label.
    pub fn group_name(label: i64) -> String {
        format!("Group{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_labels_are_sorted_and_deduplicated() {
        let labels = ClassLabels::new(vec![3, 1, 2, 1, 3, 2]);
        assert_eq!(labels.distinct(), &[1, 2, 3]);
        assert_eq!(labels.n_groups(), 3);
    }

    #[test]
    fn indices_of_preserves_sample_order() {
        let labels = ClassLabels::new(vec![2, 1, 2, 1, 2]);
        let idx: Vec<usize> = labels.indices_of(2).collect();
        assert_eq!(idx, vec![0, 2, 4]);
    }

    #[test]
    fn indices_of_unknown_label_is_empty() {
        let labels = ClassLabels::new(vec![1, 2]);
        assert_eq!(labels.indices_of(9).count(), 0);
    }

    #[test]
    fn group_name_prefixes_label() {
        assert_eq!(ClassLabels::group_name(1), "Group1");
        assert_eq!(ClassLabels::group_name(42), "Group42");
    }

    #[test]
    fn single_group_is_detected() {
        let labels = ClassLabels::new(vec![5, 5, 5]);
        assert_eq!(labels.n_groups(), 1);
    }
}
