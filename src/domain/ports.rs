use crate::domain::model::{CabinetSpec, CsvDialect, CutListResult, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Path of a CSV file holding cabinet specs, if specs come from a file.
    fn input_path(&self) -> Option<&str>;
    /// Specs declared inline in the configuration itself.
    fn inline_specs(&self) -> &[CabinetSpec] {
        &[]
    }
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
    fn csv_dialect(&self) -> CsvDialect;
    fn csv_filename(&self) -> &str {
        crate::core::aggregator::EXPORT_FILENAME
    }
    fn json_filename(&self) -> &str {
        crate::core::aggregator::REPORT_FILENAME
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<CabinetSpec>>;
    async fn transform(&self, specs: Vec<CabinetSpec>) -> Result<CutListResult>;
    /// Returns the paths written; empty when there was nothing to export.
    async fn load(&self, result: CutListResult) -> Result<Vec<String>>;
}
