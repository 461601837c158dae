#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{BoundaryArgs, CliConfig, Command, ImportArgs};
pub use toml_config::ImportConfig;
