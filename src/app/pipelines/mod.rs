pub mod import_pipeline;

pub use import_pipeline::ImportPipeline;
