use crate::core::{CutListResult, Pipeline};
use crate::utils::error::Result;

pub struct CutListEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CutListEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, transform and load. Returns the written paths, empty when
    /// the cut-list had no panels.
    pub async fn run(&self) -> Result<Vec<String>> {
        let result = self.preview().await?;

        tracing::info!("Loading cut-list...");
        let written = self.pipeline.load(result).await?;
        for path in &written {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(written)
    }

    /// Extract and transform only; nothing is written.
    pub async fn preview(&self) -> Result<CutListResult> {
        tracing::info!("Starting cut-list run...");

        tracing::info!("Extracting cabinet specs...");
        let specs = self.pipeline.extract().await?;
        tracing::info!("Extracted {} cabinet specs", specs.len());

        tracing::info!("Computing panels...");
        let result = self.pipeline.transform(specs).await?;
        tracing::info!(
            "Computed {} panel groups ({} panels)",
            result.groups.len(),
            result.total_panel_count
        );

        Ok(result)
    }
}
