use std::fmt::Write;

use chrono::NaiveDate;

use crate::engine::Analysis;
use crate::models::{CrossTabRow, NameValue, TimeSeriesPoint};

fn write_counts(output: &mut String, title: &str, values: &[NameValue]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    if values.is_empty() {
        let _ = writeln!(output, "No data recorded.");
        return;
    }

    let total: u64 = values.iter().map(|v| v.value).sum();
    for entry in values {
        let share = if total == 0 {
            0.0
        } else {
            entry.value as f64 * 100.0 / total as f64
        };
        let _ = writeln!(output, "- {}: {} ({:.1}%)", entry.name, entry.value, share);
    }
}

fn write_trend(output: &mut String, title: &str, points: &[TimeSeriesPoint]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    if points.is_empty() {
        let _ = writeln!(output, "No dated records.");
        return;
    }

    for point in points {
        let _ = writeln!(output, "- {}: {}", point.period_key, point.count);
    }
}

fn write_matrix(output: &mut String, title: &str, corner: &str, rows: &[CrossTabRow]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    let Some(first) = rows.first() else {
        let _ = writeln!(output, "No data recorded.");
        return;
    };

    let columns: Vec<&str> = first.counts.iter().map(|(key, _)| key.as_str()).collect();
    let _ = writeln!(output, "| {} | {} |", corner, columns.join(" | "));
    let _ = writeln!(output, "|---|{}", "---|".repeat(columns.len()));
    for row in rows {
        let cells: Vec<String> = row.counts.iter().map(|(_, count)| count.to_string()).collect();
        let _ = writeln!(output, "| {} | {} |", row.name, cells.join(" | "));
    }
}

pub fn build_report(scope: Option<&str>, reference_date: NaiveDate, analysis: &Analysis) -> String {
    let result = &analysis.result;
    let mut output = String::new();
    let scope_label = scope.unwrap_or("all schools");

    let _ = writeln!(output, "# Dropout Analytics Report");
    let _ = writeln!(
        output,
        "Generated for {} (undated records counted on {})",
        scope_label, reference_date
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Records analysed: {}", result.total_records);
    let _ = writeln!(output, "- Records rejected: {}", analysis.rejected.len());
    for rejection in &analysis.rejected {
        let _ = writeln!(output, "  - {rejection}");
    }

    write_counts(&mut output, "Dropouts by Year", &result.year_data);
    write_counts(&mut output, "Dropouts by Class", &result.class_data);
    write_counts(&mut output, "Reasons for Dropout", &result.reason_data);
    write_counts(&mut output, "Father Occupation", &result.occupation_data);
    write_counts(&mut output, "Gender", &result.gender_data);
    write_counts(&mut output, "Family Size", &result.family_size_data);
    write_counts(&mut output, "Top Schools", &result.school_data);
    write_counts(&mut output, "Top Districts", &result.district_data);
    write_trend(&mut output, "Yearly Trend", &result.yearly_trend_data);
    write_trend(&mut output, "Quarterly Trend", &result.quarterly_trend_data);
    write_trend(&mut output, "Monthly Trend", &result.monthly_trend_data);
    write_matrix(&mut output, "Class by Reason", "Class", &result.class_reason_matrix);
    write_matrix(
        &mut output,
        "Reason by Gender",
        "Reason",
        &result.gender_reason_radar_data,
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{analyze, EngineConfig};
    use crate::test_support::raw;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    #[test]
    fn renders_sections_and_matrix() {
        let raws = vec![
            raw(json!({"id": "1", "year": "2020", "class": "Class 8", "reasonForDropout": "Health", "gender": "Female"})),
            raw(json!({"id": "2", "year": "2020", "class": "Class 9", "reasonForDropout": "Migration"})),
            raw(json!({"schoolName": "  "})),
        ];
        let analysis = analyze(&raws, &EngineConfig::with_reference_date(date()));
        let report = build_report(Some("GHS North"), date(), &analysis);

        assert!(report.contains("Generated for GHS North"));
        assert!(report.contains("- Records analysed: 2"));
        assert!(report.contains("- Records rejected: 1"));
        assert!(report.contains("- 2020: 2 (100.0%)"));
        assert!(report.contains("| Class | Health | Migration |"));
        assert!(report.contains("| Class 8 | 1 | 0 |"));
        assert!(report.contains("- 2024-Q2: 2"));
    }

    #[test]
    fn empty_snapshot_still_renders() {
        let analysis = analyze(&[], &EngineConfig::with_reference_date(date()));
        let report = build_report(None, date(), &analysis);

        assert!(report.contains("all schools"));
        assert!(report.contains("- 1-3: 0 (0.0%)"));
        assert!(report.contains("No dated records."));
    }
}
