pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::cutlist_pipeline::CutListPipeline;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::aggregator::{aggregate, to_delimited_text, total_panel_count};
pub use crate::core::expander::expand_panels;
pub use crate::core::resolver::resolve_box_height;
pub use crate::core::etl::CutListEngine;
pub use domain::model::{AggregatedPanelGroup, CabinetSpec, Panel, PanelType, RawField};
pub use utils::error::{CutListError, Result};
