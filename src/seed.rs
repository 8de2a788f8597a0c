use chrono::{Duration, NaiveDate};
use serde_json::{json, Map, Value};
use uuid::Uuid;

const CLASSES: [&str; 5] = ["Class 6", "Class 7", "Class 8", "Class 9", "Class 10"];
const REASONS: [&str; 5] = [
    "Financial Issues",
    "Migration",
    "Household Work",
    "Health",
    "Lack of Interest",
];
const OCCUPATIONS: [&str; 4] = ["Farmer", "Daily Wage Labourer", "Shopkeeper", "Driver"];
const GENDERS: [&str; 3] = ["Male", "Female", ""];
const SCHOOLS: [(&str, &str); 4] = [
    ("Government High School Wardha", "Wardha"),
    ("Zilla Parishad School Nanded", "Nanded"),
    ("Sarvodaya Vidyalaya Latur", "Latur"),
    ("Government High School Hingna", "Nagpur"),
];

/// Demo snapshot in the keyed-object export shape. Field values cycle
/// through fixed lists and repeat across runs; keys are random v4 UUIDs.
pub fn demo_snapshot(count: usize, reference_date: NaiveDate) -> Value {
    let mut entries = Map::new();

    for i in 0..count {
        let (school, district) = SCHOOLS[i % SCHOOLS.len()];
        let added = reference_date - Duration::days((i as i64 * 11) % 540);
        let mut record = json!({
            "fullName": format!("Student {}", i + 1),
            "year": (2019 + (i % 5)).to_string(),
            "class": CLASSES[(i * 3) % CLASSES.len()],
            "reasonForDropout": REASONS[(i * 7 / 3) % REASONS.len()],
            "fatherOccupation": OCCUPATIONS[i % OCCUPATIONS.len()],
            "schoolName": school,
            "district": district,
            "familyMemberCount": (2 + (i * 5) % 8).to_string(),
            "addedDate": added.format("%Y-%m-%d").to_string(),
            "addedby": format!("admin{}@{}.edu.in", i % 2, district.to_lowercase()),
        });

        let gender = GENDERS[i % GENDERS.len()];
        if !gender.is_empty() {
            record["gender"] = json!(gender);
        }

        entries.insert(Uuid::new_v4().to_string(), record);
    }

    Value::Object(entries)
}
