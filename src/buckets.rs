use crate::error::AnalyticsError;
use crate::models::{NameValue, NormalizedRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilySizeBucket {
    UpToThree,
    FourToSix,
    SevenPlus,
}

impl FamilySizeBucket {
    pub const ALL: [FamilySizeBucket; 3] = [
        FamilySizeBucket::UpToThree,
        FamilySizeBucket::FourToSix,
        FamilySizeBucket::SevenPlus,
    ];

    pub fn for_size(size: u32) -> Self {
        match size {
            0..=3 => FamilySizeBucket::UpToThree,
            4..=6 => FamilySizeBucket::FourToSix,
            _ => FamilySizeBucket::SevenPlus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FamilySizeBucket::UpToThree => "1-3",
            FamilySizeBucket::FourToSix => "4-6",
            FamilySizeBucket::SevenPlus => "7+",
        }
    }

    fn slot(self) -> usize {
        match self {
            FamilySizeBucket::UpToThree => 0,
            FamilySizeBucket::FourToSix => 1,
            FamilySizeBucket::SevenPlus => 2,
        }
    }
}

/// A family has at least one member; anything else is unparsable.
pub fn parse_family_size(value: &str) -> Result<u32, AnalyticsError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|size| *size >= 1)
        .ok_or_else(|| AnalyticsError::UnparsableValue {
            field: "familyMemberCount",
            value: value.to_string(),
        })
}

/// Counts records per family-size bucket. The output always lists all three
/// buckets in ascending order; records without a usable size are left out.
pub fn bucket_family_size(records: &[NormalizedRecord]) -> Vec<NameValue> {
    let counts = records
        .iter()
        .filter_map(|record| {
            let raw = record.family_member_count.as_deref()?;
            match parse_family_size(raw) {
                Ok(size) => Some(FamilySizeBucket::for_size(size)),
                Err(err) => {
                    tracing::debug!(record = %record.id, "excluded from family size view: {err}");
                    None
                }
            }
        })
        .fold([0u64; 3], |mut counts, bucket| {
            counts[bucket.slot()] += 1;
            counts
        });

    FamilySizeBucket::ALL
        .iter()
        .map(|bucket| NameValue::new(bucket.label(), counts[bucket.slot()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::blank;
    use proptest::prelude::*;

    fn with_size(id: &str, size: Option<&str>) -> NormalizedRecord {
        NormalizedRecord {
            family_member_count: size.map(str::to_string),
            ..blank(id)
        }
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(FamilySizeBucket::for_size(1), FamilySizeBucket::UpToThree);
        assert_eq!(FamilySizeBucket::for_size(3), FamilySizeBucket::UpToThree);
        assert_eq!(FamilySizeBucket::for_size(4), FamilySizeBucket::FourToSix);
        assert_eq!(FamilySizeBucket::for_size(6), FamilySizeBucket::FourToSix);
        assert_eq!(FamilySizeBucket::for_size(7), FamilySizeBucket::SevenPlus);
        assert_eq!(FamilySizeBucket::for_size(15), FamilySizeBucket::SevenPlus);
    }

    #[test]
    fn invalid_sizes_are_dropped() {
        let records = vec![
            with_size("1", Some("5")),
            with_size("2", Some("two")),
            with_size("3", Some("0")),
            with_size("4", Some("-2")),
            with_size("5", Some("3.5")),
            with_size("6", None),
            with_size("7", Some(" 8 ")),
        ];

        assert_eq!(
            bucket_family_size(&records),
            vec![
                NameValue::new("1-3", 0),
                NameValue::new("4-6", 1),
                NameValue::new("7+", 1),
            ]
        );
    }

    #[test]
    fn empty_input_keeps_all_buckets() {
        let buckets = bucket_family_size(&[]);
        let labels: Vec<_> = buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(labels, vec!["1-3", "4-6", "7+"]);
        assert!(buckets.iter().all(|b| b.value == 0));
    }

    #[test]
    fn parse_reports_field_and_value() {
        match parse_family_size("many") {
            Err(AnalyticsError::UnparsableValue { field, value }) => {
                assert_eq!(field, "familyMemberCount");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn each_valid_size_lands_in_exactly_one_bucket(size in 1u32..500) {
            let text = size.to_string();
            let buckets = bucket_family_size(&[with_size("1", Some(text.as_str()))]);
            prop_assert_eq!(buckets.len(), 3);
            prop_assert_eq!(buckets.iter().map(|b| b.value).sum::<u64>(), 1);
        }
    }
}
