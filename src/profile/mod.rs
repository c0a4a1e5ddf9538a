//! Exploratory profiling.
//!
//! Read-only statistics over a frame: shape, dtypes and null counts, a
//! `describe`-style summary of numeric and text columns, and value counts for
//! categorical columns. Everything here is serializable so the profile can be
//! dumped to JSON next to the chart.

use polars::prelude::*;
use serde::Serialize;

use crate::domain::Value;
use crate::error::TableError;
use crate::table::{has_column, is_numeric, require, row_values};

/// Number of rows kept in `Profile::head`.
pub const HEAD_ROWS: usize = 5;

const COUNT: &str = "count";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub nulls: usize,
}

/// Numeric `describe`: count, mean, sample std, min, quartiles, max.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`None` with fewer than two values).
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

/// Text `describe`: count, distinct values, most frequent value and its count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: String,
    pub freq: usize,
}

/// Value counts (most frequent first) and distinct values (first-seen order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCounts {
    pub column: String,
    pub counts: Vec<(String, usize)>,
    pub unique: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub rows: usize,
    pub cols: usize,
    pub columns: Vec<ColumnProfile>,
    pub numeric: Vec<NumericSummary>,
    pub text: Vec<TextSummary>,
    pub categorical: Vec<ValueCounts>,
    pub head_columns: Vec<String>,
    pub head: Vec<Vec<Value>>,
}

/// Profile `df`, with value counts for whichever of `categorical` exist.
pub fn profile_table(df: &DataFrame, categorical: &[&str]) -> Result<Profile, TableError> {
    let columns = df
        .get_columns()
        .iter()
        .map(|c| ColumnProfile {
            name: c.name().to_string(),
            dtype: c.dtype().to_string(),
            non_null: c.len() - c.null_count(),
            nulls: c.null_count(),
        })
        .collect();

    let head_frame = df.head(Some(HEAD_ROWS));
    let head = (0..head_frame.height())
        .map(|row| row_values(&head_frame, row))
        .collect::<Result<Vec<_>, _>>()?;

    let categorical = categorical
        .iter()
        .filter(|name| has_column(df, name))
        .map(|name| value_counts(df, name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Profile {
        rows: df.height(),
        cols: df.width(),
        columns,
        numeric: describe_numeric(df)?,
        text: describe_text(df)?,
        categorical,
        head_columns: df.get_column_names().iter().map(|n| n.to_string()).collect(),
        head,
    })
}

/// `describe` for every numeric column that has at least one value.
pub fn describe_numeric(df: &DataFrame) -> Result<Vec<NumericSummary>, TableError> {
    let mut out = Vec::new();
    for column in df.get_columns().iter().filter(|c| is_numeric(c.dtype())) {
        let floats = column.cast(&DataType::Float64)?;
        let ca = floats.f64()?;
        let count = ca.len() - ca.null_count();
        let (Some(mean), Some(min), Some(max)) = (ca.mean(), ca.min(), ca.max()) else {
            continue;
        };

        out.push(NumericSummary {
            column: column.name().to_string(),
            count,
            mean,
            std: if count > 1 { ca.std(1) } else { None },
            min,
            q25: quantile(ca, 0.25)?,
            q50: quantile(ca, 0.50)?,
            q75: quantile(ca, 0.75)?,
            max,
        });
    }
    Ok(out)
}

fn quantile(ca: &Float64Chunked, q: f64) -> Result<f64, TableError> {
    Ok(ca.quantile(q, QuantileMethod::Linear)?.unwrap_or(f64::NAN))
}

/// `describe` for every text column that has at least one value.
pub fn describe_text(df: &DataFrame) -> Result<Vec<TextSummary>, TableError> {
    let mut out = Vec::new();
    for column in df.get_columns().iter().filter(|c| c.dtype() == &DataType::String) {
        let counts = value_counts(df, column.name())?;
        let Some((top, freq)) = counts.counts.first().cloned() else {
            continue;
        };
        out.push(TextSummary {
            column: column.name().to_string(),
            count: column.len() - column.null_count(),
            unique: counts.unique.len(),
            top,
            freq,
        });
    }
    Ok(out)
}

/// Count the non-null values of a column. Ties keep first-seen order.
pub fn value_counts(df: &DataFrame, name: &str) -> Result<ValueCounts, TableError> {
    require(df, name)?;

    let groups = df
        .clone()
        .lazy()
        .select([col(name).cast(DataType::String)])
        .filter(col(name).is_not_null())
        .group_by_stable([col(name)])
        .agg([len().cast(DataType::UInt64).alias(COUNT)])
        .collect()?;
    let unique = groups
        .column(name)?
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

    let sorted = groups.sort(
        [COUNT],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_maintain_order(true),
    )?;
    let counts = sorted
        .column(name)?
        .str()?
        .into_iter()
        .zip(sorted.column(COUNT)?.u64()?)
        .filter_map(|(value, n)| Some((value?.to_string(), n? as usize)))
        .collect();

    Ok(ValueCounts {
        column: name.to_string(),
        counts,
        unique,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "SERVICE_USER_COUNT" => [Some(1i64), Some(2), Some(3), Some(4), None],
            "SECTOR" => ["Men", "Women", "Women", "Men", "Youth"],
            "EMPTY" => [None::<f64>, None, None, None, None],
        )
        .unwrap()
    }

    #[test]
    fn numeric_describe_uses_sample_std_and_interpolated_quartiles() {
        let summary = describe_numeric(&frame()).unwrap();
        assert_eq!(summary.len(), 1);
        let s = &summary[0];
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert!((s.std.unwrap() - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!((s.min, s.q25, s.q50, s.q75, s.max), (1.0, 1.75, 2.5, 3.25, 4.0));
    }

    #[test]
    fn text_describe_picks_first_seen_top_on_ties() {
        let text = describe_text(&frame()).unwrap();
        assert_eq!(
            text,
            vec![TextSummary {
                column: "SECTOR".to_string(),
                count: 5,
                unique: 3,
                top: "Men".to_string(),
                freq: 2,
            }]
        );
    }

    #[test]
    fn value_counts_order() {
        let counts = value_counts(&frame(), "SECTOR").unwrap();
        assert_eq!(
            counts.counts,
            vec![("Men".to_string(), 2), ("Women".to_string(), 2), ("Youth".to_string(), 1)]
        );
        assert_eq!(counts.unique, vec!["Men", "Women", "Youth"]);
    }

    #[test]
    fn profile_counts_nulls_and_skips_missing_categoricals() {
        let p = profile_table(&frame(), &["SECTOR", "PROGRAM_MODEL"]).unwrap();
        assert_eq!((p.rows, p.cols), (5, 3));
        assert_eq!(p.columns[0].nulls, 1);
        assert_eq!(p.columns[0].dtype, "i64");
        assert_eq!(p.columns[2].non_null, 0);
        assert_eq!(p.categorical.len(), 1);
        assert_eq!(p.head.len(), HEAD_ROWS);
        assert_eq!(p.head[0][1], Value::from("Men"));
    }
}
