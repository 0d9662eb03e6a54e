use crate::core::ConfigProvider;
use crate::domain::model::{CsvDialect, OutputFormat};
use crate::utils::error::{CutListError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cabinet-cutlist")]
#[command(about = "Turn a list of cabinet specs into a consolidated panel cut-list")]
pub struct CliConfig {
    /// CSV file with one cabinet spec per row, or a .toml job file
    #[arg(short, long)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_enum, value_delimiter = ',', default_value = "csv")]
    pub format: Vec<OutputFormat>,

    #[arg(long, value_enum, default_value = "quoted")]
    pub dialect: CsvDialect,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Show the per-cabinet breakdown without writing files")]
    pub dry_run: bool,
}

/// What `--input` points at, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    CabinetList,
    Job,
}

impl CliConfig {
    pub fn input_kind(&self) -> Result<InputKind> {
        match validation::file_extension(&self.input).as_deref() {
            Some("csv") => Ok(InputKind::CabinetList),
            Some("toml") => Ok(InputKind::Job),
            _ => Err(CutListError::UnsupportedInputError {
                path: self.input.clone(),
            }),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> Option<&str> {
        Some(&self.input)
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.format
    }

    fn csv_dialect(&self) -> CsvDialect {
        self.dialect
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        self.input_kind()?;
        validation::validate_path("output_path", &self.output_path)?;

        if self.format.is_empty() {
            return Err(CutListError::MissingConfigError {
                field: "format".to_string(),
            });
        }
        Ok(())
    }
}
