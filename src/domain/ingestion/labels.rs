//! Class-label coercion from raw column cells.

use std::collections::BTreeMap;

/// Converts raw class-column cells to integer labels.
///
/// Integer codings pass through unchanged. Numeric codings truncate toward
/// zero, so spreadsheet exports arriving as `1.0` keep their coding. Any
/// other content maps each distinct cell to `1..n` in ascending sort order.
///
/// # Edge Cases
/// - A column mixing numbers and text falls to the categorical mapping.
/// - Empty cells count as a distinct category and sort first.
pub fn convert_class_labels(cells: &[String]) -> Vec<i64> {
    if let Some(labels) = parse_all::<i64>(cells) {
        return labels;
    }
    if let Some(values) = parse_all::<f64>(cells) {
        if values.iter().all(|v| v.is_finite()) {
            return values.iter().map(|&v| v as i64).collect();
        }
    }

    let mut mapping: BTreeMap<&str, i64> = BTreeMap::new();
    for cell in cells {
        mapping.insert(cell.as_str(), 0);
    }
    for (rank, (_, label)) in mapping.iter_mut().enumerate() {
        *label = rank as i64 + 1;
    }
    cells
        .iter()
        .map(|cell| mapping.get(cell.as_str()).copied().unwrap_or(0))
        .collect()
}

fn parse_all<T: std::str::FromStr>(cells: &[String]) -> Option<Vec<T>> {
    cells.iter().map(|c| c.parse::<T>().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn integer_labels_pass_through() {
        assert_eq!(convert_class_labels(&cells(&["2", "10", "3"])), vec![2, 10, 3]);
    }

    #[test]
    fn negative_integers_are_preserved() {
        assert_eq!(convert_class_labels(&cells(&["-1", "0", "-1"])), vec![-1, 0, -1]);
    }

    #[test]
    fn float_codings_truncate_toward_zero() {
        assert_eq!(
            convert_class_labels(&cells(&["1.0", "2.0", "2.9"])),
            vec![1, 2, 2]
        );
    }

    #[test]
    fn categorical_cells_map_in_sorted_order() {
        assert_eq!(
            convert_class_labels(&cells(&["B", "A", "C", "A"])),
            vec![2, 1, 3, 1]
        );
    }

    #[test]
    fn mixed_numeric_and_text_is_categorical() {
        assert_eq!(convert_class_labels(&cells(&["1", "A"])), vec![1, 2]);
    }

    #[test]
    fn empty_cells_form_their_own_category() {
        assert_eq!(convert_class_labels(&cells(&["", "A", ""])), vec![1, 2, 1]);
    }
}
