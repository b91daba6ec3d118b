use super::monthly::{MonthlyPoint, SeriesKind};
use crate::observatory::dates::YearMonth;
use std::collections::BTreeMap;

/// Sums two monthly series over the union of their months.
///
/// Labels are rebuilt from the month key so both inputs converge on one
/// spelling.
pub fn unify_series(first: &[MonthlyPoint], second: &[MonthlyPoint]) -> Vec<MonthlyPoint> {
    let mut totals: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for point in first.iter().chain(second) {
        *totals.entry(point.month).or_default() += point.value;
    }

    totals
        .into_iter()
        .map(|(month, value)| MonthlyPoint::new(month, value, SeriesKind::Total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, month: u32, value: usize, kind: SeriesKind) -> MonthlyPoint {
        MonthlyPoint::new(YearMonth { year, month }, value, kind)
    }

    #[test]
    fn sums_over_the_union_of_months() {
        let attrition = vec![point(2024, 1, 2, SeriesKind::Attrition)];
        let inactivity = vec![
            point(2024, 1, 1, SeriesKind::Inactivity),
            point(2024, 2, 3, SeriesKind::Inactivity),
        ];

        let combined = unify_series(&attrition, &inactivity);
        let summary: Vec<_> = combined
            .iter()
            .map(|point| (point.label.as_str(), point.value, point.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("JAN/2024", 3, SeriesKind::Total),
                ("FEV/2024", 3, SeriesKind::Total),
            ]
        );
    }

    #[test]
    fn relabels_from_the_key() {
        let mut odd = point(2023, 12, 4, SeriesKind::Attrition);
        odd.label = "dez./2023".to_string();
        let combined = unify_series(&[odd], &[]);
        assert_eq!(combined[0].label, "DEZ/2023");
        assert!(unify_series(&[], &[]).is_empty());
    }
}
