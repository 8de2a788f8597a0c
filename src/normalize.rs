use chrono::NaiveDate;
use serde_json::Value;

use crate::error::AnalyticsError;
use crate::models::{NormalizedRecord, RawRecord, StudentRecord, NOT_SPECIFIED};

/// Reads a field as a trimmed, non-empty string. Numbers are rendered in
/// their plain form; integral floats drop the fractional part.
pub(crate) fn field_value(raw: &RawRecord, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::Null => None,
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(int.to_string())
            } else if let Some(float) = number.as_f64().filter(|f| f.fract() == 0.0) {
                Some(format!("{float:.0}"))
            } else {
                Some(number.to_string())
            }
        }
        other => {
            tracing::debug!(field = key, value = %other, "ignoring non-scalar field value");
            None
        }
    }
}

impl StudentRecord {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: field_value(raw, "id"),
            year: field_value(raw, "year"),
            class: field_value(raw, "class"),
            reason_for_dropout: field_value(raw, "reasonForDropout"),
            father_occupation: field_value(raw, "fatherOccupation"),
            school_name: field_value(raw, "schoolName"),
            gender: field_value(raw, "gender"),
            district: field_value(raw, "district"),
            family_member_count: field_value(raw, "familyMemberCount"),
            added_date: field_value(raw, "addedDate"),
            full_name: field_value(raw, "fullName"),
            email: field_value(raw, "email"),
            phone_number: field_value(raw, "phoneNumber"),
            course: field_value(raw, "course"),
            address: field_value(raw, "address"),
            added_by: field_value(raw, "addedby"),
        }
    }
}

pub fn normalize_record(
    index: usize,
    record: StudentRecord,
    ingestion_date: NaiveDate,
) -> Result<NormalizedRecord, AnalyticsError> {
    if record == StudentRecord::default() {
        return Err(AnalyticsError::MalformedRecord {
            index,
            reason: "record has no usable fields".to_string(),
        });
    }
    // Array and CSV snapshots carry no store key; fall back to position.
    let id = record.id.unwrap_or_else(|| format!("#{index}"));

    Ok(NormalizedRecord {
        id,
        year: record.year,
        class: record.class,
        reason_for_dropout: record.reason_for_dropout,
        father_occupation: record.father_occupation,
        school_name: record.school_name,
        gender: record.gender.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        district: record.district,
        family_member_count: record.family_member_count,
        added_date: record
            .added_date
            .unwrap_or_else(|| ingestion_date.format("%Y-%m-%d").to_string()),
        full_name: record.full_name,
        email: record.email,
        phone_number: record.phone_number,
        course: record.course,
        address: record.address,
        added_by: record.added_by,
    })
}

/// Normalizes a whole snapshot. Rejected records are logged and returned
/// separately; they never stop the rest of the batch.
pub fn normalize_all(
    raws: &[RawRecord],
    ingestion_date: NaiveDate,
) -> (Vec<NormalizedRecord>, Vec<AnalyticsError>) {
    let mut records = Vec::with_capacity(raws.len());
    let mut rejected = Vec::new();

    for (index, raw) in raws.iter().enumerate() {
        match normalize_record(index, StudentRecord::from_raw(raw), ingestion_date) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!("skipping record: {err}");
                rejected.push(err);
            }
        }
    }

    (records, rejected)
}
