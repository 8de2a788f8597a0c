//! Dropout analytics: turns a snapshot of student dropout records into
//! chart-ready views.

pub mod aggregate;
pub mod buckets;
pub mod crosstab;
pub mod engine;
pub mod error;
pub mod models;
pub mod normalize;
pub mod rank;
pub mod report;
pub mod seed;
pub mod snapshot;
pub mod trend;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{count_by, FrequencyTable};
pub use buckets::bucket_family_size;
pub use crosstab::cross_tab;
pub use engine::{aggregate, analyze, analyze_value, Analysis, EngineConfig};
pub use error::AnalyticsError;
pub use models::{AnalyticsResult, Dimension, NormalizedRecord, RawRecord, StudentRecord};
pub use rank::top_n;
pub use trend::{trend_by, Granularity};
