use std::path::Path;

use serde_json::Value;

use crate::error::AnalyticsError;
use crate::models::{Dimension, RawRecord};
use crate::normalize::field_value;

/// Narrows a snapshot to one dashboard's records before aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    School(String),
    AddedBy(String),
}

impl Scope {
    pub fn label(&self) -> &str {
        match self {
            Scope::School(name) | Scope::AddedBy(name) => name,
        }
    }

    pub fn matches(&self, raw: &RawRecord) -> bool {
        let (key, expected) = match self {
            Scope::School(name) => (Dimension::School.field(), name),
            Scope::AddedBy(email) => ("addedby", email),
        };
        field_value(raw, key).is_some_and(|value| value == expected.trim())
    }
}

pub fn apply_scope(raws: Vec<RawRecord>, scope: Option<&Scope>) -> Vec<RawRecord> {
    match scope {
        Some(scope) => raws.into_iter().filter(|raw| scope.matches(raw)).collect(),
        None => raws,
    }
}

/// Accepts a JSON array of records, an object keyed by record key (whose key
/// becomes the `id` when the record has none) or `null` for an empty store.
pub fn records_from_value(value: Value) -> Result<Vec<RawRecord>, AnalyticsError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(AnalyticsError::InvalidInput(format!(
                    "element {index} is not a record object: {other}"
                ))),
            })
            .collect(),
        Value::Object(entries) => entries
            .into_iter()
            .map(|(key, item)| match item {
                Value::Object(mut map) => {
                    if field_value(&map, "id").is_none() {
                        map.insert("id".to_string(), Value::String(key));
                    }
                    Ok(map)
                }
                other => Err(AnalyticsError::InvalidInput(format!(
                    "entry '{key}' is not a record object: {other}"
                ))),
            })
            .collect(),
        other => Err(AnalyticsError::InvalidInput(format!(
            "expected an array or keyed object of records, got {other}"
        ))),
    }
}

pub fn load_json(path: &Path) -> Result<Vec<RawRecord>, AnalyticsError> {
    let text = std::fs::read_to_string(path)?;
    records_from_value(serde_json::from_str(&text)?)
}

/// Reads a CSV export with a header row. Empty cells are left out of the
/// record so they read as absent.
pub fn load_csv(path: &Path) -> Result<Vec<RawRecord>, AnalyticsError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, cell)| !cell.trim().is_empty())
            .map(|(header, cell)| (header.trim().to_string(), Value::String(cell.to_string())))
            .collect();
        records.push(record);
    }

    Ok(records)
}

pub fn load(path: &Path) -> Result<Vec<RawRecord>, AnalyticsError> {
    let records = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => load_csv(path)?,
        _ => load_json(path)?,
    };
    tracing::debug!(path = %path.display(), records = records.len(), "loaded snapshot");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{analyze, EngineConfig};
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn keyed_object_keys_become_ids() {
        let records = records_from_value(json!({
            "-Nx1": {"year": "2020"},
            "-Nx2": {"id": "explicit", "year": "2021"},
        }))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "-Nx1");
        assert_eq!(records[1]["id"], "explicit");
    }

    #[test]
    fn null_snapshot_is_empty() {
        assert!(records_from_value(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn non_record_shapes_fail() {
        assert!(matches!(
            records_from_value(json!(42)),
            Err(AnalyticsError::InvalidInput(_))
        ));
        assert!(matches!(
            records_from_value(json!([{"id": "1"}, "oops"])),
            Err(AnalyticsError::InvalidInput(_))
        ));
        assert!(matches!(
            records_from_value(json!({"a": [1, 2]})),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn scope_filters_by_school_or_submitter() {
        let records = records_from_value(json!([
            {"id": "1", "schoolName": "GHS North", "addedby": "a@school.in"},
            {"id": "2", "schoolName": "GHS South", "addedby": "b@school.in"},
            {"id": "3", "addedby": "a@school.in"},
        ]))
        .unwrap();

        let school = apply_scope(records.clone(), Some(&Scope::School("GHS North".into())));
        assert_eq!(school.len(), 1);

        let submitter = apply_scope(records.clone(), Some(&Scope::AddedBy("a@school.in".into())));
        assert_eq!(submitter.len(), 2);

        assert_eq!(apply_scope(records, None).len(), 3);
    }

    #[test]
    fn loads_csv_with_blank_cells_absent() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,year,class,district").unwrap();
        writeln!(file, "s1,2020,Class 8,").unwrap();
        writeln!(file, "s2,2021,,Pune").unwrap();

        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["class"], "Class 8");
        assert!(!records[0].contains_key("district"));
        assert!(!records[1].contains_key("class"));
    }

    #[test]
    fn csv_without_id_column_is_aggregated() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "year,class,reasonForDropout,familyMemberCount").unwrap();
        writeln!(file, "2020,Class 8,Financial Issues,5").unwrap();
        writeln!(file, "2020,Class 9,Financial Issues,2").unwrap();

        let records = load(file.path()).unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let analysis = analyze(&records, &EngineConfig::with_reference_date(date));

        assert!(analysis.rejected.is_empty());
        assert_eq!(analysis.result.total_records, 2);
        assert_eq!(analysis.result.year_data[0].value, 2);
        assert_eq!(analysis.result.class_reason_matrix.len(), 2);
    }

    #[test]
    fn loads_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"id": "s1", "year": 2020}}]"#).unwrap();

        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["year"], 2020);
    }
}
