//! Derives the visible list from the base list
//!
//! Every call recomputes from scratch: filter the base list, then order the
//! survivors. The base list is only borrowed.

use super::criteria::FilterCriteria;
use super::sort::SortSpec;
use crate::domain::MeterRecord;

/// Records of `records` that satisfy `criteria`, in base-list order
pub fn filter_records<'a>(
    records: &'a [MeterRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a MeterRecord> {
    if criteria.rating.is_empty() {
        return Vec::new();
    }
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Orders `visible` in place
///
/// The sort is stable: records with equal keys keep their relative order.
pub fn sort_records(visible: &mut [&MeterRecord], sort: &SortSpec) {
    visible.sort_by(|a, b| sort.compare(a, b));
}

/// Filters then sorts
///
/// # Example
///
/// ```
/// use fairwatt::core::filter::{apply, FilterCriteria, SortSpec};
/// use fairwatt::domain::MeterRecord;
///
/// let records = vec![
///     MeterRecord::builder(1).name("Ivanov").rating(20).build().unwrap(),
///     MeterRecord::builder(2).name("Petrov").rating(80).build().unwrap(),
/// ];
/// let criteria = FilterCriteria { name: "ov".into(), ..FilterCriteria::for_records(&records) };
/// let visible = apply(&records, &criteria, &SortSpec::default());
/// assert_eq!(visible.len(), 2);
/// ```
pub fn apply<'a>(
    records: &'a [MeterRecord],
    criteria: &FilterCriteria,
    sort: &SortSpec,
) -> Vec<&'a MeterRecord> {
    let mut visible = filter_records(records, criteria);
    sort_records(&mut visible, sort);
    tracing::debug!(
        total = records.len(),
        visible = visible.len(),
        sort = %sort,
        "Recomputed visible meters"
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{RangeFilter, SortKey};

    fn records() -> Vec<MeterRecord> {
        vec![
            MeterRecord::builder(1).name("b").rating(50).build().unwrap(),
            MeterRecord::builder(2).name("a").rating(50).build().unwrap(),
            MeterRecord::builder(3).name("c").rating(10).build().unwrap(),
        ]
    }

    #[test]
    fn test_empty_base_list() {
        let visible = apply(&[], &FilterCriteria::default(), &SortSpec::default());
        assert!(visible.is_empty());
    }

    #[test]
    fn test_inverted_rating_interval_is_empty() {
        let records = records();
        let criteria = FilterCriteria {
            rating: RangeFilter::new(60, 40),
            ..FilterCriteria::default()
        };
        assert!(apply(&records, &criteria, &SortSpec::default()).is_empty());
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let records = records();
        let visible = apply(
            &records,
            &FilterCriteria::default(),
            &SortSpec::ascending(SortKey::Rating),
        );
        let ids: Vec<i64> = visible.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_base_list_untouched() {
        let records = records();
        let before = records.clone();
        let _ = apply(
            &records,
            &FilterCriteria::default(),
            &SortSpec::descending(SortKey::Name),
        );
        assert_eq!(records, before);
    }
}
