use chrono::{NaiveDate, Utc};

use crate::aggregate::count_by;
use crate::buckets::bucket_family_size;
use crate::crosstab::cross_tab;
use crate::error::AnalyticsError;
use crate::models::{AnalyticsResult, Dimension, NormalizedRecord, RawRecord};
use crate::normalize::normalize_all;
use crate::rank::top_n;
use crate::snapshot::records_from_value;
use crate::trend::{trend_by, Granularity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub school_top_n: usize,
    pub district_top_n: usize,
    /// Date used for records that carry no `addedDate`.
    pub reference_date: NaiveDate,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            school_top_n: 5,
            district_top_n: 10,
            reference_date: Utc::now().date_naive(),
        }
    }
}

impl EngineConfig {
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            ..Self::default()
        }
    }
}

/// Output of one pass: the views plus the records that were turned away.
#[derive(Debug)]
pub struct Analysis {
    pub result: AnalyticsResult,
    pub rejected: Vec<AnalyticsError>,
}

/// Builds every view from already-normalized records.
pub fn aggregate(records: &[NormalizedRecord], config: &EngineConfig) -> AnalyticsResult {
    AnalyticsResult {
        total_records: records.len(),
        year_data: count_by(records, Dimension::Year).sorted_by_name(),
        class_data: count_by(records, Dimension::Class).to_name_values(),
        reason_data: count_by(records, Dimension::Reason).to_name_values(),
        occupation_data: count_by(records, Dimension::Occupation).to_name_values(),
        gender_data: count_by(records, Dimension::Gender).to_name_values(),
        family_size_data: bucket_family_size(records),
        school_data: top_n(&count_by(records, Dimension::School), config.school_top_n),
        district_data: top_n(
            &count_by(records, Dimension::District),
            config.district_top_n,
        ),
        monthly_trend_data: trend_by(records, Granularity::Monthly),
        quarterly_trend_data: trend_by(records, Granularity::Quarterly),
        yearly_trend_data: trend_by(records, Granularity::Yearly),
        class_reason_matrix: cross_tab(records, Dimension::Class, Dimension::Reason),
        gender_reason_radar_data: cross_tab(records, Dimension::Reason, Dimension::Gender),
    }
}

/// Normalizes a snapshot and aggregates it. Never fails: malformed records
/// are collected in `Analysis::rejected` and the rest are aggregated.
pub fn analyze(raws: &[RawRecord], config: &EngineConfig) -> Analysis {
    let (records, rejected) = normalize_all(raws, config.reference_date);
    let result = aggregate(&records, config);

    tracing::info!(
        records = records.len(),
        rejected = rejected.len(),
        "aggregated dropout snapshot"
    );

    Analysis { result, rejected }
}

/// Like [`analyze`], for a snapshot that has not been shape-checked yet.
pub fn analyze_value(
    snapshot: serde_json::Value,
    config: &EngineConfig,
) -> Result<Analysis, AnalyticsError> {
    let raws = records_from_value(snapshot)?;
    Ok(analyze(&raws, config))
}
