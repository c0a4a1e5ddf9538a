//! Run configuration from YAML files.
//!
//! Each file holds a mapping. Files are merged in order at the top level, so a
//! key in a later file replaces the same key from an earlier one (nested
//! mappings such as `plot_config` are replaced whole, not merged). The merged
//! mapping is then read into `AnalysisConfig`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{AppError, EXIT_INPUT};

/// Settings used by the aggregation and chart steps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// Column the summary is grouped by.
    pub group_col: String,
    /// Line colour: a name (`blue`, `tab:orange`), a single letter (`r`) or `#rrggbb`.
    pub plot_color: String,
    pub plot_config: PlotLabels,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlotLabels {
    pub xlabel: String,
    pub ylabel: String,
    pub title: String,
}

/// Load `.env` (if present) so `RUST_LOG` can be set there.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Read, merge and validate the configuration files.
pub fn load_config(paths: &[PathBuf]) -> Result<AnalysisConfig, AppError> {
    let mut merged = Mapping::new();
    for path in paths {
        let mapping = read_mapping(path)?;
        debug!(path = %path.display(), keys = mapping.len(), "Loaded config file");
        merge_into(&mut merged, mapping);
    }
    from_mapping(merged)
}

/// Parse one YAML document into a mapping. An empty document is an empty mapping.
pub fn parse_mapping(text: &str) -> Result<Mapping, String> {
    match serde_yaml::from_str::<Value>(text).map_err(|e| e.to_string())? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(m) => Ok(m),
        _ => Err("expected a mapping at the top level".to_string()),
    }
}

/// Top-level merge: entries of `layer` replace entries of `base`.
pub fn merge_into(base: &mut Mapping, layer: Mapping) {
    for (key, value) in layer {
        base.insert(key, value);
    }
}

/// Read the recognized settings out of a merged mapping.
pub fn from_mapping(mapping: Mapping) -> Result<AnalysisConfig, AppError> {
    serde_yaml::from_value(Value::Mapping(mapping))
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid configuration: {e}")))
}

fn read_mapping(path: &Path) -> Result<Mapping, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read config '{}': {e}", path.display())))?;
    parse_mapping(&text).map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid config '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = "\
group_col: OCCUPANCY_DATE
plot_color: blue
plot_config:
  xlabel: Date
  ylabel: Service users
  title: Daily service users
";

    const JOB: &str = "\
plot_color: '#ff7f0e'
";

    #[test]
    fn later_files_override_earlier_keys() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("user_config.yml");
        let job = dir.path().join("job_config.yml");
        std::fs::write(&user, USER).unwrap();
        std::fs::write(&job, JOB).unwrap();

        let config = load_config(&[user, job]).unwrap();
        assert_eq!(config.group_col, "OCCUPANCY_DATE");
        assert_eq!(config.plot_color, "#ff7f0e");
        assert_eq!(config.plot_config.title, "Daily service users");
    }

    #[test]
    fn nested_mappings_are_replaced_whole() {
        let mut base = parse_mapping(USER).unwrap();
        merge_into(&mut base, parse_mapping("plot_config:\n  title: Only a title\n").unwrap());

        let err = from_mapping(base).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("xlabel"), "{err}");
    }

    #[test]
    fn missing_keys_are_reported() {
        let err = from_mapping(parse_mapping("plot_color: red\n").unwrap()).unwrap_err();
        assert!(err.to_string().contains("group_col"), "{err}");
    }

    #[test]
    fn empty_and_non_mapping_documents() {
        assert!(parse_mapping("").unwrap().is_empty());
        assert!(parse_mapping("- a\n- b\n").is_err());
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&[dir.path().join("user_config.yml")]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }
}
