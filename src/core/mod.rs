pub mod aggregator;
pub mod etl;
pub mod expander;
pub mod resolver;

pub use crate::domain::model::{AggregatedPanelGroup, CabinetSpec, CutListResult, Panel};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
