use serde_json::Value;

use crate::models::{NormalizedRecord, RawRecord, NOT_SPECIFIED};

pub(crate) fn blank(id: &str) -> NormalizedRecord {
    NormalizedRecord {
        id: id.to_string(),
        year: None,
        class: None,
        reason_for_dropout: None,
        father_occupation: None,
        school_name: None,
        gender: NOT_SPECIFIED.to_string(),
        district: None,
        family_member_count: None,
        added_date: "2024-01-01".to_string(),
        full_name: None,
        email: None,
        phone_number: None,
        course: None,
        address: None,
        added_by: None,
    }
}

pub(crate) fn record(id: &str, year: Option<&str>, reason: Option<&str>) -> NormalizedRecord {
    NormalizedRecord {
        year: year.map(str::to_string),
        reason_for_dropout: reason.map(str::to_string),
        ..blank(id)
    }
}

pub(crate) fn raw(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
