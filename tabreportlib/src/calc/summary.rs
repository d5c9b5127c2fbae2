//! Column aggregation for summary figures.

use super::SummaryKind;
use crate::data::CellValue;

/// Aggregate every cell of a column.
pub fn compute_summary(values: &[CellValue], kind: SummaryKind) -> f64 {
    compute_summary_filtered(values, kind, |_| true)
}

/// Aggregate the cells of a column that satisfy `predicate`.
///
/// SUM and AVERAGE consider numeric cells only; AVERAGE of an empty
/// selection is `0.0`. COUNT counts every selected cell, text included.
pub fn compute_summary_filtered<P>(values: &[CellValue], kind: SummaryKind, predicate: P) -> f64
where
    P: Fn(&CellValue) -> bool,
{
    let selected = values.iter().filter(|v| predicate(*v));

    match kind {
        SummaryKind::Count => selected.count() as f64,
        SummaryKind::Sum => selected.filter_map(CellValue::as_number).sum(),
        SummaryKind::Average => {
            let (sum, n) = selected
                .filter_map(CellValue::as_number)
                .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
            if n == 0 {
                0.0
            } else {
                sum / n as f64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<CellValue> {
        values.iter().copied().map(CellValue::Number).collect()
    }

    #[test]
    fn test_sum_average_count() {
        let values = numbers(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(compute_summary(&values, SummaryKind::Sum), 10.0);
        assert_eq!(compute_summary(&values, SummaryKind::Average), 2.5);
        assert_eq!(compute_summary(&values, SummaryKind::Count), 4.0);
    }

    #[test]
    fn test_predicate_filters_first() {
        let values = numbers(&[1.0, 20.0, 3.0, 40.0]);
        let big = |v: &CellValue| v.as_number().is_some_and(|n| n > 10.0);
        assert_eq!(compute_summary_filtered(&values, SummaryKind::Sum, big), 60.0);
        assert_eq!(compute_summary_filtered(&values, SummaryKind::Count, big), 2.0);
        assert_eq!(compute_summary_filtered(&values, SummaryKind::Average, big), 30.0);
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        let values = numbers(&[1.0, 2.0]);
        let avg = compute_summary_filtered(&values, SummaryKind::Average, |_| false);
        assert_eq!(avg, 0.0);
        assert_eq!(compute_summary(&[], SummaryKind::Average), 0.0);
        assert_eq!(compute_summary(&[], SummaryKind::Sum), 0.0);
    }

    #[test]
    fn test_count_text_cells() {
        let values = vec![CellValue::text("a"), CellValue::text("b"), CellValue::text("")];
        let non_empty = |v: &CellValue| v.as_text().is_some_and(|s| !s.is_empty());
        assert_eq!(compute_summary(&values, SummaryKind::Count), 3.0);
        assert_eq!(
            compute_summary_filtered(&values, SummaryKind::Count, non_empty),
            2.0
        );
    }
}
