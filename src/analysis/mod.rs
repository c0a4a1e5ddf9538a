//! Filtering and group-by aggregation on the cleaned frame.

use polars::prelude::*;
use serde::Serialize;

use crate::domain::{Value, schema};
use crate::error::TableError;
use crate::table::{require, require_numeric, values};

pub const RECORDS: &str = "records";
pub const TOTAL_SERVICE_USER: &str = "total_service_user";
pub const AVERAGE_SERVICE_USER: &str = "average_service_user";
pub const AVERAGE_OCCUPANCY_RATE_BEDS: &str = "average_occupancy_rate_beds";

/// Rows of the `Emergency` program model, restricted to the columns used for
/// occupancy-rate review.
pub fn emergency_subset(df: &DataFrame) -> Result<DataFrame, TableError> {
    require(df, schema::PROGRAM_MODEL)?;
    for name in schema::EMERGENCY_COLUMNS {
        require(df, name)?;
    }

    let columns: Vec<Expr> = schema::EMERGENCY_COLUMNS.iter().map(|name| col(*name)).collect();
    Ok(df
        .clone()
        .lazy()
        .filter(col(schema::PROGRAM_MODEL).eq(lit(schema::EMERGENCY_PROGRAM)))
        .select(columns)
        .collect()?)
}

/// One aggregated row per group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: Value,
    /// Number of records in the group.
    pub records: usize,
    pub total_service_user: f64,
    /// `None` when the group has no non-null service-user counts.
    pub average_service_user: Option<f64>,
    /// `None` when the group has no non-null bed occupancy rates.
    pub average_occupancy_rate_beds: Option<f64>,
}

/// Aggregated service-user summary, sorted by group key.
///
/// `frame` is the aggregated frame as computed; `rows` is the same data as
/// owned values for reporting and plotting.
#[derive(Debug, Clone)]
pub struct Summary {
    pub group_col: String,
    pub frame: DataFrame,
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    /// Read the rows out of an aggregated frame with the summary columns.
    pub fn from_frame(group_col: &str, frame: DataFrame) -> Result<Self, TableError> {
        let keys = values(require(&frame, group_col)?)?;
        let records = require(&frame, RECORDS)?.cast(&DataType::UInt64)?;
        let totals = require(&frame, TOTAL_SERVICE_USER)?.cast(&DataType::Float64)?;
        let users = require(&frame, AVERAGE_SERVICE_USER)?.cast(&DataType::Float64)?;
        let rates = require(&frame, AVERAGE_OCCUPANCY_RATE_BEDS)?.cast(&DataType::Float64)?;

        let rows = keys
            .into_iter()
            .zip(records.u64()?)
            .zip(totals.f64()?)
            .zip(users.f64()?)
            .zip(rates.f64()?)
            .map(|((((key, records), total), users), rates)| SummaryRow {
                key,
                records: records.unwrap_or(0) as usize,
                total_service_user: total.unwrap_or(0.0),
                average_service_user: users.filter(|v| !v.is_nan()),
                average_occupancy_rate_beds: rates.filter(|v| !v.is_nan()),
            })
            .collect();

        Ok(Self {
            group_col: group_col.to_string(),
            frame,
            rows,
        })
    }

    /// `(key, total_service_user)` pairs in key order.
    pub fn totals(&self) -> impl Iterator<Item = (&Value, f64)> + '_ {
        self.rows.iter().map(|r| (&r.key, r.total_service_user))
    }
}

/// Group by `group_col` and aggregate service users and bed occupancy.
///
/// - `total_service_user`: sum of `SERVICE_USER_COUNT` (nulls skipped)
/// - `average_service_user`: mean of `SERVICE_USER_COUNT` (nulls skipped)
/// - `average_occupancy_rate_beds`: mean of `OCCUPANCY_RATE_BEDS` (nulls skipped)
///
/// Rows whose key is null are left out.
pub fn summarize(df: &DataFrame, group_col: &str) -> Result<Summary, TableError> {
    require(df, group_col)?;
    require_numeric(df, schema::SERVICE_USER_COUNT)?;
    require_numeric(df, schema::OCCUPANCY_RATE_BEDS)?;

    let users = || col(schema::SERVICE_USER_COUNT).cast(DataType::Float64);
    let frame = df
        .clone()
        .lazy()
        .filter(col(group_col).is_not_null())
        .group_by([col(group_col)])
        .agg([
            len().cast(DataType::UInt64).alias(RECORDS),
            users().sum().alias(TOTAL_SERVICE_USER),
            users().mean().alias(AVERAGE_SERVICE_USER),
            col(schema::OCCUPANCY_RATE_BEDS)
                .cast(DataType::Float64)
                .mean()
                .alias(AVERAGE_OCCUPANCY_RATE_BEDS),
        ])
        .sort([group_col], SortMultipleOptions::default())
        .collect()?;

    Summary::from_frame(group_col, frame)
}

/// Record count per group, in key order. Null keys are left out.
pub fn group_sizes(df: &DataFrame, group_col: &str) -> Result<Vec<(Value, usize)>, TableError> {
    require(df, group_col)?;
    let sizes = df
        .clone()
        .lazy()
        .filter(col(group_col).is_not_null())
        .group_by([col(group_col)])
        .agg([len().cast(DataType::UInt64).alias(RECORDS)])
        .sort([group_col], SortMultipleOptions::default())
        .collect()?;

    let keys = values(require(&sizes, group_col)?)?;
    let counts = require(&sizes, RECORDS)?.u64()?;
    Ok(keys
        .into_iter()
        .zip(counts)
        .map(|(key, n)| (key, n.unwrap_or(0) as usize))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::has_column;
    use chrono::NaiveDate;

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2023, 1, d)
    }

    fn occupancy() -> DataFrame {
        df!(
            "OCCUPANCY_DATE" => [day(2), day(1), day(2), day(1), None],
            "SECTOR" => ["Men", "Women", "Men", "Families", "Men"],
            "PROGRAM_MODEL" => [Some("Emergency"), Some("Transitional"), Some("Emergency"), None, Some("Emergency")],
            "SERVICE_USER_COUNT" => [Some(10i64), Some(4), Some(20), None, Some(1)],
            "CAPACITY_TYPE" => ["Bed", "Room", "Bed", "Room", "Bed"],
            "OCCUPANCY_RATE_BEDS" => [Some(90.0), None, Some(100.0), None, Some(50.0)],
            "OCCUPANCY_RATE_ROOMS" => [None, Some(80.0), None, Some(75.0), None],
            "ID" => [1i64, 2, 3, 4, 5],
        )
        .unwrap()
    }

    fn date_value(d: u32) -> Value {
        Value::from(day(d))
    }

    #[test]
    fn emergency_subset_filters_and_selects() {
        let subset = emergency_subset(&occupancy()).unwrap();
        let names: Vec<String> = subset.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, schema::EMERGENCY_COLUMNS.to_vec());
        assert_eq!(subset.height(), 3);
        assert!(!has_column(&subset, "ID"));
    }

    #[test]
    fn summary_sums_and_means_per_date() {
        let summary = summarize(&occupancy(), "OCCUPANCY_DATE").unwrap();
        assert_eq!(summary.rows.len(), 2);

        let first = &summary.rows[0];
        assert_eq!(first.key, date_value(1));
        assert_eq!(first.records, 2);
        assert_eq!(first.total_service_user, 4.0);
        assert_eq!(first.average_service_user, Some(4.0));
        assert_eq!(first.average_occupancy_rate_beds, None);

        let second = &summary.rows[1];
        assert_eq!(second.key, date_value(2));
        assert_eq!(second.total_service_user, 30.0);
        assert_eq!(second.average_service_user, Some(15.0));
        assert_eq!(second.average_occupancy_rate_beds, Some(95.0));
    }

    #[test]
    fn summary_groups_on_text_keys_in_order() {
        let summary = summarize(&occupancy(), "SECTOR").unwrap();
        let keys: Vec<String> = summary.rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["Families", "Men", "Women"]);
        assert_eq!(summary.rows[1].total_service_user, 31.0);
        assert_eq!(summary.frame.height(), 3);
    }

    #[test]
    fn summary_requires_columns() {
        let err = summarize(&occupancy(), "NOPE").unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(ref name) if name == "NOPE"));

        let t = occupancy().drop("OCCUPANCY_RATE_BEDS").unwrap();
        assert!(summarize(&t, "SECTOR").is_err());

        let mut t = occupancy();
        t.with_column(Column::new("SERVICE_USER_COUNT".into(), ["a", "b", "c", "d", "e"]))
            .unwrap();
        assert!(matches!(
            summarize(&t, "SECTOR"),
            Err(TableError::NotNumeric { .. })
        ));
    }

    #[test]
    fn group_sizes_skip_null_keys() {
        let sizes = group_sizes(&occupancy(), "OCCUPANCY_DATE").unwrap();
        assert_eq!(sizes, vec![(date_value(1), 2), (date_value(2), 2)]);
    }
}
