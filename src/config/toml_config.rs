use crate::core::aggregator::{EXPORT_FILENAME, REPORT_FILENAME};
use crate::core::ConfigProvider;
use crate::domain::model::{CabinetSpec, CsvDialect, OutputFormat};
use crate::utils::error::{CutListError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A cut-list job: where the cabinet specs come from and what to write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub cabinets: Vec<CabinetSpec>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV file of cabinet specs, read in addition to any inline `[[cabinets]]`.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,
    #[serde(default)]
    pub dialect: CsvDialect,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub json: Option<String>,
}

fn default_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Csv]
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CutListError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CutListError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CutListError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("job.name", &self.job.name)?;
        validation::validate_path("output.output_path", &self.output.output_path)?;

        if self.output.formats.is_empty() {
            return Err(CutListError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }

        match self.input_path() {
            Some(path) => {
                validation::validate_path("input.path", path)?;
                validation::validate_file_extension("input.path", path, &["csv"])?;
            }
            None if self.cabinets.is_empty() => {
                return Err(CutListError::MissingConfigError {
                    field: "input.path".to_string(),
                });
            }
            None => {}
        }

        if let Some(filenames) = &self.output.filenames {
            if let Some(csv) = &filenames.csv {
                validation::validate_filename("output.filenames.csv", csv)?;
            }
            if let Some(json) = &filenames.json {
                validation::validate_filename("output.filenames.json", json)?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.as_ref().and_then(|input| input.path.as_deref())
    }

    fn inline_specs(&self) -> &[CabinetSpec] {
        &self.cabinets
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output.formats
    }

    fn csv_dialect(&self) -> CsvDialect {
        self.output.dialect
    }

    fn csv_filename(&self) -> &str {
        self.output
            .filenames
            .as_ref()
            .and_then(|f| f.csv.as_deref())
            .unwrap_or(EXPORT_FILENAME)
    }

    fn json_filename(&self) -> &str {
        self.output
            .filenames
            .as_ref()
            .and_then(|f| f.json.as_deref())
            .unwrap_or(REPORT_FILENAME)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::summarize;
    use crate::core::resolver::parse_number;
    use crate::domain::model::RawField;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_inline_cabinets() {
        let toml_content = r#"
[job]
name = "kitchen"

[[cabinets]]
label = "Base"
cabinet_height = 34.5
kick_height = 4.5
box_width = 30
box_depth = 24
brace_height = 3
quantity = 4

[[cabinets]]
label = "Upper"
box_height_override = "30"
box_width = ""

[output]
output_path = "./out"
formats = ["csv", "json"]
dialect = "legacy"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.job.name, "kitchen");
        assert_eq!(config.cabinets.len(), 2);
        assert_eq!(parse_number(config.cabinets[0].box_width.as_ref()), Some(30.0));
        assert_eq!(parse_number(config.cabinets[0].kick_height.as_ref()), Some(4.5));
        assert_eq!(parse_number(config.cabinets[1].box_height_override.as_ref()), Some(30.0));
        assert_eq!(parse_number(config.cabinets[1].box_width.as_ref()), None);
        assert_eq!(config.cabinets[1].quantity, None);
        assert_eq!(config.output_formats(), &[OutputFormat::Csv, OutputFormat::Json]);
        assert_eq!(config.csv_dialect(), CsvDialect::Legacy);
        assert_eq!(config.csv_filename(), EXPORT_FILENAME);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_numeric_cabinet_values_only_skip_their_cabinet() {
        let toml_content = r#"
[job]
name = "kitchen"

[[cabinets]]
label = "Base"
cabinet_height = 34.5
kick_height = 4.5
box_width = 30
box_depth = 24
brace_height = 3
quantity = 4

[[cabinets]]
label = "Odd"
cabinet_height = 34.5
kick_height = 4.5
box_width = [30]
box_depth = { inches = 24 }
brace_height = 1979-05-27
quantity = true

[output]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.cabinets.len(), 2);
        assert_eq!(config.cabinets[1].quantity, Some(RawField::Unsupported));
        assert_eq!(parse_number(config.cabinets[1].box_width.as_ref()), None);

        let result = summarize(config.inline_specs());
        assert_eq!(result.spec_count, 2);
        assert_eq!(result.contributing_spec_count, 1);
        assert_eq!(result.total_panel_count, 28);
        assert!(result.groups.iter().all(|g| g.contributing_labels == "Base"));
    }

    #[test]
    fn test_output_defaults_and_filename_overrides() {
        let toml_content = r#"
[job]
name = "kitchen"

[input]
path = "cabinets.csv"

[output]
output_path = "./out"

[output.filenames]
csv = "kitchen.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input_path(), Some("cabinets.csv"));
        assert_eq!(config.output_formats(), &[OutputFormat::Csv]);
        assert_eq!(config.csv_dialect(), CsvDialect::Quoted);
        assert_eq!(config.csv_filename(), "kitchen.csv");
        assert_eq!(config.json_filename(), REPORT_FILENAME);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CUTLIST_TEST_OUTPUT", "/tmp/cutlist");

        let toml_content = r#"
[job]
name = "env"

[input]
path = "cabinets.csv"

[output]
output_path = "${CUTLIST_TEST_OUTPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output.output_path, "/tmp/cutlist");

        std::env::remove_var("CUTLIST_TEST_OUTPUT");
    }

    #[test]
    fn test_unknown_env_var_left_verbatim() {
        let toml_content = r#"
[job]
name = "env"

[input]
path = "cabinets.csv"

[output]
output_path = "${CUTLIST_SURELY_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output.output_path, "${CUTLIST_SURELY_UNSET_VARIABLE}");
    }

    #[test]
    fn test_config_validation() {
        let no_source = r#"
[job]
name = "empty"

[output]
output_path = "./out"
"#;
        let config = TomlConfig::from_toml_str(no_source).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CutListError::MissingConfigError { .. })
        ));

        let bad_extension = r#"
[job]
name = "xlsx"

[input]
path = "cabinets.xlsx"

[output]
output_path = "./out"
"#;
        let config = TomlConfig::from_toml_str(bad_extension).unwrap();
        assert!(config.validate().is_err());

        let bad_format = r#"
[job]
name = "pdf"

[input]
path = "cabinets.csv"

[output]
output_path = "./out"
formats = ["pdf"]
"#;
        assert!(TomlConfig::from_toml_str(bad_format).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[job]
name = "file-test"

[input]
path = "cabinets.csv"

[output]
output_path = "./out"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.job.name, "file-test");
    }
}
