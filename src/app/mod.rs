// Application layer: pipelines wiring config, storage and the cut-list core together.

pub mod failure;
pub mod pipelines;
pub mod summary;
