use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A record as supplied by the store-access layer: a flat mapping of field
/// names to string, number or null values.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

pub const NOT_SPECIFIED: &str = "Not Specified";

/// Typed view of a raw record. Every attribute is optional; absence is kept
/// distinct from an empty value by mapping blank strings to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: Option<String>,
    pub year: Option<String>,
    pub class: Option<String>,
    pub reason_for_dropout: Option<String>,
    pub father_occupation: Option<String>,
    pub school_name: Option<String>,
    pub gender: Option<String>,
    pub district: Option<String>,
    pub family_member_count: Option<String>,
    pub added_date: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub course: Option<String>,
    pub address: Option<String>,
    pub added_by: Option<String>,
}

/// A record with identity checked and defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub id: String,
    pub year: Option<String>,
    pub class: Option<String>,
    pub reason_for_dropout: Option<String>,
    pub father_occupation: Option<String>,
    pub school_name: Option<String>,
    pub gender: String,
    pub district: Option<String>,
    pub family_member_count: Option<String>,
    pub added_date: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub course: Option<String>,
    pub address: Option<String>,
    pub added_by: Option<String>,
}

impl NormalizedRecord {
    pub fn value(&self, dimension: Dimension) -> Option<&str> {
        let value = match dimension {
            Dimension::Year => self.year.as_deref(),
            Dimension::Class => self.class.as_deref(),
            Dimension::Reason => self.reason_for_dropout.as_deref(),
            Dimension::Occupation => self.father_occupation.as_deref(),
            Dimension::Gender => Some(self.gender.as_str()),
            Dimension::School => self.school_name.as_deref(),
            Dimension::District => self.district.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// A record attribute usable as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Year,
    Class,
    Reason,
    Occupation,
    Gender,
    School,
    District,
}

impl Dimension {
    /// Field name in the source records.
    pub fn field(self) -> &'static str {
        match self {
            Dimension::Year => "year",
            Dimension::Class => "class",
            Dimension::Reason => "reasonForDropout",
            Dimension::Occupation => "fatherOccupation",
            Dimension::Gender => "gender",
            Dimension::School => "schoolName",
            Dimension::District => "district",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameValue {
    pub name: String,
    pub value: u64,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesPoint {
    #[serde(rename = "name")]
    pub period_key: String,
    #[serde(rename = "value")]
    pub count: u64,
}

/// One row of a two-dimensional count matrix. `counts` holds every column
/// value observed in the snapshot, in column order, zero where absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTabRow {
    pub name: String,
    pub counts: Vec<(String, u64)>,
}

impl CrossTabRow {
    /// Key for the row label in serialized form: `name`, prefixed with
    /// underscores until it no longer clashes with a column value.
    pub fn label_key(&self) -> String {
        let mut key = String::from("name");
        while self.counts.iter().any(|(column, _)| *column == key) {
            key.insert(0, '_');
        }
        key
    }

    pub fn count(&self, column: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, count)| *count)
    }
}

impl Serialize for CrossTabRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let label_key = self.label_key();
        if label_key != "name" {
            tracing::warn!(row = %self.name, label_key = %label_key, "row label renamed to avoid a column clash");
        }
        let mut map = serializer.serialize_map(Some(self.counts.len() + 1))?;
        map.serialize_entry(&label_key, &self.name)?;
        for (column, count) in &self.counts {
            map.serialize_entry(column, count)?;
        }
        map.end()
    }
}

/// Every chart-ready view derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub total_records: usize,
    pub year_data: Vec<NameValue>,
    pub class_data: Vec<NameValue>,
    pub reason_data: Vec<NameValue>,
    pub occupation_data: Vec<NameValue>,
    pub gender_data: Vec<NameValue>,
    pub family_size_data: Vec<NameValue>,
    pub school_data: Vec<NameValue>,
    pub district_data: Vec<NameValue>,
    pub monthly_trend_data: Vec<TimeSeriesPoint>,
    pub quarterly_trend_data: Vec<TimeSeriesPoint>,
    pub yearly_trend_data: Vec<TimeSeriesPoint>,
    pub class_reason_matrix: Vec<CrossTabRow>,
    pub gender_reason_radar_data: Vec<CrossTabRow>,
}
