pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod dimension;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CsvObjectStore, LocalStorage};
pub use app::pipelines::ImportPipeline;
pub use config::ImportConfig;
pub use crate::core::{etl::EtlEngine, query::ObjectQueryService};
pub use dimension::{fits, parse, BoundarySpec, Measurement};
pub use utils::error::{EtlError, Result};
