pub mod cutlist_pipeline;
