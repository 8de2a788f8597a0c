use std::collections::HashMap;

use crate::models::{Dimension, NameValue, NormalizedRecord};

/// Value counts for one dimension, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    positions: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn increment(&mut self, value: &str) {
        match self.positions.get(value) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.positions.insert(value.to_string(), self.entries.len());
                self.entries.push((value.to_string(), 1));
            }
        }
    }

    pub fn get(&self, value: &str) -> u64 {
        self.positions
            .get(value)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|(value, count)| (value.as_str(), *count))
    }

    pub fn to_name_values(&self) -> Vec<NameValue> {
        self.iter()
            .map(|(value, count)| NameValue::new(value, count))
            .collect()
    }

    /// Same entries ordered by value, for axes that need a stable order.
    pub fn sorted_by_name(&self) -> Vec<NameValue> {
        let mut values = self.to_name_values();
        values.sort_by(|a, b| a.name.cmp(&b.name));
        values
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut table, value| {
            table.increment(value);
            table
        })
    }
}

/// Counts records per value of `dimension`. Records without a value for the
/// dimension are skipped rather than counted under a placeholder.
pub fn count_by(records: &[NormalizedRecord], dimension: Dimension) -> FrequencyTable {
    records
        .iter()
        .filter_map(|record| record.value(dimension))
        .collect()
}
