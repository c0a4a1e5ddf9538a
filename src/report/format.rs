use crate::analysis::Summary;
use crate::profile::{NumericSummary, Profile, TextSummary, ValueCounts};

/// Number of value-count lines shown per categorical column.
const MAX_COUNTS: usize = 10;

/// Format the full profile (shape, dtypes, nulls, describe, value counts, head).
pub fn format_profile(profile: &Profile) -> String {
    let mut out = String::new();

    out.push_str(&format!("Shape: ({}, {})\n", profile.rows, profile.cols));

    out.push_str("\nColumns:\n");
    let width = profile.columns.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for c in &profile.columns {
        out.push_str(&format!(
            "  {:<width$}  {:<8} non-null={:<8} nulls={}\n",
            c.name,
            c.dtype,
            c.non_null,
            c.nulls,
        ));
    }

    if !profile.numeric.is_empty() {
        out.push_str("\nNumeric columns:\n");
        out.push_str(&format_numeric(&profile.numeric));
    }
    if !profile.text.is_empty() {
        out.push_str("\nText columns:\n");
        out.push_str(&format_text(&profile.text));
    }
    for counts in &profile.categorical {
        out.push('\n');
        out.push_str(&format_value_counts(counts));
    }

    out.push_str(&format!("\nHead ({} rows):\n", profile.head.len()));
    out.push_str(&format!("  {}\n", profile.head_columns.join(" | ")));
    for row in &profile.head {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        out.push_str(&format!("  {}\n", cells.join(" | ")));
    }

    out
}

/// Format numeric `describe` rows.
pub fn format_numeric(rows: &[NumericSummary]) -> String {
    let width = rows.iter().map(|r| r.column.len()).max().unwrap_or(0).max(6);
    let mut out = format!(
        "  {:<width$} {:>8} {:>12} {:>12} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for r in rows {
        out.push_str(&format!(
            "  {:<width$} {:>8} {:>12.3} {:>12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
            r.column,
            r.count,
            r.mean,
            r.std.map(|v| format!("{v:.3}")).unwrap_or_else(|| "NaN".to_string()),
            r.min,
            r.q25,
            r.q50,
            r.q75,
            r.max,
        ));
    }
    out
}

/// Format text `describe` rows.
pub fn format_text(rows: &[TextSummary]) -> String {
    let width = rows.iter().map(|r| r.column.len()).max().unwrap_or(0).max(6);
    let mut out = format!("  {:<width$} {:>8} {:>8} {:>6}  top\n", "column", "count", "unique", "freq");
    for r in rows {
        out.push_str(&format!(
            "  {:<width$} {:>8} {:>8} {:>6}  {}\n",
            r.column, r.count, r.unique, r.freq, r.top
        ));
    }
    out
}

/// Format value counts (top entries only) and the number of distinct values.
pub fn format_value_counts(counts: &ValueCounts) -> String {
    let mut out = format!("{} ({} distinct):\n", counts.column, counts.unique.len());
    for (value, n) in counts.counts.iter().take(MAX_COUNTS) {
        out.push_str(&format!("  {value:<40} {n}\n"));
    }
    if counts.counts.len() > MAX_COUNTS {
        out.push_str(&format!("  ... {} more\n", counts.counts.len() - MAX_COUNTS));
    }
    out
}

/// Format the aggregated service-user summary.
pub fn format_summary(summary: &Summary) -> String {
    let mut out = format!(
        "{:<12} {:>8} {:>20} {:>22} {:>28}\n",
        summary.group_col, "records", "total_service_user", "average_service_user", "average_occupancy_rate_beds"
    );
    for r in &summary.rows {
        out.push_str(&format!(
            "{:<12} {:>8} {:>20} {:>22} {:>28}\n",
            r.key.to_string(),
            r.records,
            r.total_service_user,
            fmt_opt(r.average_service_user),
            fmt_opt(r.average_occupancy_rate_beds),
        ));
    }
    out
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.3}"),
        _ => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AVERAGE_OCCUPANCY_RATE_BEDS, AVERAGE_SERVICE_USER, RECORDS, TOTAL_SERVICE_USER};
    use polars::df;

    #[test]
    fn summary_table_lists_each_group() {
        let frame = df!(
            "SECTOR" => ["Men", "Women"],
            RECORDS => [2u64, 1],
            TOTAL_SERVICE_USER => [30.0, 7.0],
            AVERAGE_SERVICE_USER => [Some(15.0), Some(7.0)],
            AVERAGE_OCCUPANCY_RATE_BEDS => [None, Some(99.5)],
        )
        .unwrap();
        let summary = Summary::from_frame("SECTOR", frame).unwrap();
        let text = format_summary(&summary);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("SECTOR"));
        assert!(lines[1].starts_with("Men") && lines[1].ends_with("NaN"));
        assert!(lines[2].starts_with("Women") && lines[2].ends_with("99.500"));
    }

    #[test]
    fn value_counts_are_truncated() {
        let counts = ValueCounts {
            column: "LOCATION_ADDRESS".to_string(),
            counts: (0..12).map(|i| (format!("{i} Main St"), 1)).collect(),
            unique: (0..12).map(|i| format!("{i} Main St")).collect(),
        };
        let text = format_value_counts(&counts);
        assert!(text.starts_with("LOCATION_ADDRESS (12 distinct):"));
        assert!(text.ends_with("... 2 more\n"));
    }
}
