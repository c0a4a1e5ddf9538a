//! The analysis pipeline, start to finish:
//! CSV -> profile -> clean -> workbook -> subsets -> summary -> chart
//!
//! Kept separate from `app::run` so it can be driven without a CLI or a
//! global logger.

use std::path::PathBuf;

use polars::prelude::DataFrame;
use tracing::{debug, error, info};

use crate::analysis::{Summary, emergency_subset, group_sizes, summarize};
use crate::clean::clean_occupancy;
use crate::config::AnalysisConfig;
use crate::domain::schema;
use crate::error::AppError;
use crate::plot::{ChartStyle, render_line_chart};
use crate::profile::{Profile, describe_numeric, profile_table};
use crate::report::{format_numeric, format_profile, format_summary};
use crate::table::rows_with_nulls;

/// File locations and chart size for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub chart_path: PathBuf,
    pub workbook: PathBuf,
    pub width: u32,
    pub height: u32,
    pub export_summary: Option<PathBuf>,
    pub export_profile: Option<PathBuf>,
}

/// Everything computed by a run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Profile of the table as loaded.
    pub profile: Profile,
    /// The cleaned table.
    pub table: DataFrame,
    pub emergency: DataFrame,
    /// Cleaned rows with a null in any column.
    pub nulls: DataFrame,
    /// Emergency rows with a null in any column.
    pub emergency_nulls: DataFrame,
    pub summary: Summary,
    pub chart_path: PathBuf,
}

/// Run the full pipeline and write the workbook, chart and optional exports.
pub fn run(options: &RunOptions, config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let output = analyze(options, config)?;

    let style = ChartStyle::new(&config.plot_color, &config.plot_config, options.width, options.height)?;
    render_line_chart(&options.chart_path, &output.summary, &style)
        .inspect_err(|e| error!(error = %e, "Error saving the plot"))?;
    info!("plot saved as {}", options.chart_path.display());

    Ok(output)
}

/// Everything except the chart: load, profile, clean, save the workbook,
/// subset and aggregate.
pub fn analyze(options: &RunOptions, config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    // 1) Load.
    let mut table = crate::io::load_csv(&options.input)
        .inspect_err(|e| error!(error = %e, "Error loading dataset"))?;
    info!("Successfully loaded {}", options.input.display());

    // 2) Profile the raw table.
    let profile = profile_table(&table, &schema::CATEGORICAL_COLUMNS)?;
    debug!("Dataset profile\n{}", format_profile(&profile));
    if let Some(path) = &options.export_profile {
        crate::io::write_profile_json(path, &profile)?;
    }

    // 3) Clean in place.
    clean_occupancy(&mut table).inspect_err(|e| error!(error = %e, "Error cleaning dataset"))?;
    debug!(schema = ?table.schema(), "Cleaned dataset");

    // 4) Persist.
    crate::io::write_workbook(&options.workbook, &table)?;
    info!("Cleaned dataset saved as {}", options.workbook.display());

    // 5) Subsets.
    let emergency = emergency_subset(&table)?;
    let nulls = rows_with_nulls(&table)?;
    let emergency_nulls = rows_with_nulls(&emergency)?;
    debug!(
        emergency = emergency.height(),
        with_nulls = nulls.height(),
        emergency_with_nulls = emergency_nulls.height(),
        "Subsets extracted"
    );
    debug!("Rows with nulls\n{}", format_numeric(&describe_numeric(&nulls)?));
    debug!(
        "Emergency rows with nulls\n{}",
        format_numeric(&describe_numeric(&emergency_nulls)?)
    );

    // 6) Aggregate.
    let sizes = group_sizes(&table, &config.group_col)?;
    debug!(groups = sizes.len(), group_col = %config.group_col, "Grouped records");

    let summary = summarize(&table, &config.group_col)?;
    debug!("Service user summary\n{}", format_summary(&summary));
    if let Some(path) = &options.export_summary {
        crate::io::write_summary_csv(path, &summary)?;
    }

    Ok(RunOutput {
        profile,
        table,
        emergency,
        nulls,
        emergency_nulls,
        summary,
        chart_path: options.chart_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotLabels;
    use crate::domain::Value;
    use crate::error::{EXIT_DATA, EXIT_INPUT, EXIT_OUTPUT};
    use crate::table::{has_column, values};

    const CSV: &str = "\
_id,OCCUPANCY_DATE,ORGANIZATION_NAME,LOCATION_ID,LOCATION_ADDRESS,LOCATION_PROVINCE,SECTOR,PROGRAM_MODEL,OVERNIGHT_SERVICE_TYPE,CAPACITY_TYPE,SERVICE_USER_COUNT,CAPACITY_ACTUAL_BED,CAPACITY_FUNDING_BED,OCCUPIED_BEDS,UNOCCUPIED_BEDS,UNAVAILABLE_BEDS,CAPACITY_ACTUAL_ROOM,CAPACITY_FUNDING_ROOM,OCCUPIED_ROOMS,UNOCCUPIED_ROOMS,UNAVAILABLE_ROOMS,OCCUPANCY_RATE_BEDS,OCCUPANCY_RATE_ROOMS
1,2023-01-01,COSTI,1103.0,100 Lippincott Road,ON,Families,Emergency,Motel/Hotel Shelter,Room Based Capacity,75,,,,,,28.0,29.0,28.0,0.0,1.0,,100.0
2,2023-01-01,Dixon Hall,1051.0,351 Lakeshore Blvd E,ON,Mixed Adult,Emergency,Shelter,Bed Based Capacity,61,62.0,62.0,61.0,1.0,0.0,,,,,,98.39,
3,2023-01-02,Dixon Hall,1051.0,351 Lakeshore Blvd E,ON,Mixed Adult,Transitional,Shelter,Bed Based Capacity,20,20.0,20.0,20.0,0.0,0.0,,,,,,100.0,
4,2023-01-02,COSTI,,100 Lippincott Road,ON,Families,Emergency,Motel/Hotel Shelter,Room Based Capacity,70,,,,,,28.0,29.0,26.0,2.0,1.0,,92.86
";

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            group_col: "OCCUPANCY_DATE".to_string(),
            plot_color: "tab:blue".to_string(),
            plot_config: PlotLabels {
                xlabel: "Date".to_string(),
                ylabel: "Service users".to_string(),
                title: "Service users per day".to_string(),
            },
        }
    }

    fn options(dir: &std::path::Path) -> RunOptions {
        RunOptions {
            input: dir.join("occupancy.csv"),
            chart_path: dir.join("chart.png"),
            workbook: dir.join("proc.xlsx"),
            width: 640,
            height: 480,
            export_summary: Some(dir.join("summary.csv")),
            export_profile: Some(dir.join("profile.json")),
        }
    }

    #[test]
    fn analyze_cleans_subsets_and_aggregates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("occupancy.csv"), CSV).unwrap();
        let opts = options(dir.path());

        let out = analyze(&opts, &config()).unwrap();

        assert_eq!(out.profile.rows, 4);
        assert!(has_column(&out.table, "ID"));
        assert!(!has_column(&out.table, "LOCATION_PROVINCE"));
        let addresses = values(out.table.column("LOCATION_ADDRESS").unwrap()).unwrap();
        assert_eq!(addresses[0], Value::from("100 Lippincott Rd"));

        assert_eq!(out.emergency.shape(), (3, 7));
        assert_eq!(out.nulls.height(), 4);
        assert_eq!(out.emergency_nulls.height(), 3);

        let totals: Vec<f64> = out.summary.rows.iter().map(|r| r.total_service_user).collect();
        assert_eq!(totals, vec![136.0, 90.0]);
        assert_eq!(out.summary.rows[0].average_service_user, Some(68.0));
        assert_eq!(out.summary.rows[0].average_occupancy_rate_beds, Some(98.39));
        assert_eq!(out.summary.rows[1].average_occupancy_rate_beds, Some(100.0));

        assert!(opts.workbook.exists());
        assert!(dir.path().join("summary.csv").exists());
        assert!(dir.path().join("profile.json").exists());
    }

    #[test]
    fn missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = analyze(&options(dir.path()), &config()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn unknown_group_column_is_a_data_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("occupancy.csv"), CSV).unwrap();
        let mut cfg = config();
        cfg.group_col = "NOT_A_COLUMN".to_string();

        let err = analyze(&options(dir.path()), &cfg).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_DATA);
        assert!(err.to_string().contains("NOT_A_COLUMN"));
    }

    #[test]
    fn run_saves_the_chart() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("occupancy.csv"), CSV).unwrap();
        let opts = options(dir.path());

        let out = run(&opts, &config()).unwrap();

        assert_eq!(out.chart_path, opts.chart_path);
        assert!(opts.chart_path.exists());
        assert_eq!(out.summary.rows.len(), 2);
    }

    #[test]
    fn unsaveable_chart_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("occupancy.csv"), CSV).unwrap();
        let mut opts = options(dir.path());
        opts.chart_path = dir.path().join("no-such-dir").join("chart.png");

        let err = run(&opts, &config()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_OUTPUT);
        assert!(err.to_string().contains("Failed to save the plot"));
        // Everything before the chart was still written.
        assert!(opts.workbook.exists());
    }
}
