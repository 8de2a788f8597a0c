use std::collections::HashMap;

use crate::models::{CrossTabRow, Dimension, NormalizedRecord};

/// Distinct values in first-seen order with their positions.
#[derive(Default)]
struct Axis {
    values: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Axis {
    fn position(&mut self, value: &str) -> usize {
        if let Some(&position) = self.positions.get(value) {
            return position;
        }
        let position = self.values.len();
        self.positions.insert(value.to_string(), position);
        self.values.push(value.to_string());
        position
    }
}

/// Builds a `row × column` count matrix. Rows and columns cover every value
/// seen anywhere in the snapshot, so each row carries the full column set
/// even where its count is zero. Only records with both values are counted.
pub fn cross_tab(
    records: &[NormalizedRecord],
    row_dimension: Dimension,
    column_dimension: Dimension,
) -> Vec<CrossTabRow> {
    let mut rows = Axis::default();
    let mut columns = Axis::default();
    let mut pairs = Vec::new();

    for record in records {
        let row = record.value(row_dimension).map(|value| rows.position(value));
        let column = record
            .value(column_dimension)
            .map(|value| columns.position(value));
        if let (Some(row), Some(column)) = (row, column) {
            pairs.push((row, column));
        }
    }

    let mut matrix = vec![vec![0u64; columns.values.len()]; rows.values.len()];
    for (row, column) in pairs {
        matrix[row][column] += 1;
    }

    rows.values
        .into_iter()
        .zip(matrix)
        .map(|(name, counts)| CrossTabRow {
            name,
            counts: columns.values.iter().cloned().zip(counts).collect(),
        })
        .collect()
}
