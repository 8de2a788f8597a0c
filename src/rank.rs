use crate::aggregate::FrequencyTable;
use crate::models::NameValue;

/// The `n` most frequent values, highest count first. Equal counts keep the
/// order in which the values were first seen. Zero counts are never ranked.
pub fn top_n(table: &FrequencyTable, n: usize) -> Vec<NameValue> {
    let mut ranked: Vec<NameValue> = table
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(value, count)| NameValue::new(value, count))
        .collect();

    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked.truncate(n);
    ranked
}
