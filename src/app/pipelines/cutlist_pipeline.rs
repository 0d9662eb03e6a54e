use crate::adapters::csv_input::read_cabinet_specs;
use crate::core::aggregator::{render_export, summarize};
use crate::core::{CabinetSpec, ConfigProvider, CutListResult, Pipeline, Storage};
use crate::domain::model::{CutListReport, OutputFormat};
use crate::utils::error::Result;

/// Reads cabinet specs, computes the cut-list and writes the export files.
pub struct CutListPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> CutListPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, filename: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), filename)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CutListPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<CabinetSpec>> {
        let mut specs = Vec::new();

        if let Some(path) = self.config.input_path() {
            tracing::debug!("Reading cabinet specs from: {}", path);
            let data = self.storage.read_file(path).await?;
            let from_file = read_cabinet_specs(&data)?;
            tracing::info!("📥 Read {} cabinet specs from {}", from_file.len(), path);
            specs.extend(from_file);
        }

        let inline = self.config.inline_specs();
        if !inline.is_empty() {
            tracing::info!("📥 Using {} inline cabinet specs", inline.len());
            specs.extend_from_slice(inline);
        }

        Ok(specs)
    }

    async fn transform(&self, specs: Vec<CabinetSpec>) -> Result<CutListResult> {
        let result = summarize(&specs);

        tracing::info!(
            "🛠️ {} of {} cabinet specs contributed panels",
            result.contributing_spec_count,
            result.spec_count
        );
        tracing::debug!(
            "{} panel groups, {} panels in total",
            result.groups.len(),
            result.total_panel_count
        );

        Ok(result)
    }

    async fn load(&self, result: CutListResult) -> Result<Vec<String>> {
        if result.is_empty() {
            tracing::info!("Cut-list is empty, nothing to export");
            return Ok(Vec::new());
        }

        let formats = self.config.output_formats();
        let mut written = Vec::new();
        for (index, format) in formats.iter().enumerate() {
            if formats[..index].contains(format) {
                continue;
            }

            let (path, data) = match format {
                OutputFormat::Csv => {
                    let Some(text) = render_export(&result.groups, self.config.csv_dialect())? else {
                        continue;
                    };
                    (self.output_file(self.config.csv_filename()), text)
                }
                OutputFormat::Json => {
                    let report = CutListReport::from_result(&result);
                    let json = serde_json::to_string_pretty(&report)?;
                    (self.output_file(self.config.json_filename()), json)
                }
            };

            tracing::debug!("Writing {} ({} bytes)", path, data.len());
            self.storage.write_file(&path, data.as_bytes()).await?;
            written.push(path);
        }

        Ok(written)
    }
}
