use crate::config::toml_config::{ImportConfig, DEFAULT_STORE_PATH};
use crate::dimension::BoundarySpec;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "met-dimensions")]
#[command(about = "Parse museum catalog dimensions and query objects by size")]
pub struct CliConfig {
    /// Directory holding the imported object table
    #[arg(long, global = true)]
    pub store: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log CPU and memory usage per import phase")]
    pub monitor: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Import a catalog CSV export into the object store
    Import(ImportArgs),
    /// Show how a dimension text is normalized and parsed
    Parse {
        /// Raw dimension text, e.g. "23 1/4 x 18 1/4 in. (59.1 x 46.4 cm)"
        text: String,
    },
    /// Check whether one imported object fits the given boundaries
    Fits {
        id: u64,
        #[command(flatten)]
        boundary: BoundaryArgs,
    },
    /// List imported objects within the given boundaries (at most 50)
    List {
        #[command(flatten)]
        boundary: BoundaryArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Catalog CSV export (overrides the config file)
    #[arg(long)]
    pub source: Option<String>,

    /// Stop after this many objects with parsable dimensions (0 = all)
    #[arg(long)]
    pub import_size: Option<usize>,

    #[arg(long)]
    pub batch_size: Option<usize>,
}

impl ImportArgs {
    /// Merge the optional TOML file with command line overrides.
    pub fn resolve(&self, store: Option<&str>) -> Result<ImportConfig> {
        let mut config = match &self.config {
            Some(path) => ImportConfig::from_file(path)?,
            None => {
                let source = validate_required_field("import.source_path", &self.source)?;
                ImportConfig::new(source.clone(), DEFAULT_STORE_PATH)
            }
        };

        if let Some(source) = &self.source {
            config.import.source_path = source.clone();
        }
        if let Some(store) = store {
            config.store.path = store.to_string();
        }
        if let Some(size) = self.import_size {
            config.import.import_size = Some(size);
        }
        if let Some(size) = self.batch_size {
            config.import.batch_size = Some(size);
        }
        Ok(config)
    }
}

/// Eight optional bounds; unset ones keep the unconstrained defaults.
/// Negative values are accepted on both sides: `--max-depth -1` selects
/// objects without a known depth.
#[derive(Debug, Clone, Default, Args)]
pub struct BoundaryArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub min_height: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub max_height: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub min_width: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub max_width: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub min_depth: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub max_depth: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub min_weight: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub max_weight: Option<f64>,
}

impl BoundaryArgs {
    pub fn to_boundary(&self) -> BoundarySpec {
        let defaults = BoundarySpec::default();
        BoundarySpec {
            min_height: self.min_height.unwrap_or(defaults.min_height),
            max_height: self.max_height.unwrap_or(defaults.max_height),
            min_width: self.min_width.unwrap_or(defaults.min_width),
            max_width: self.max_width.unwrap_or(defaults.max_width),
            min_depth: self.min_depth.unwrap_or(defaults.min_depth),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            min_weight: self.min_weight.unwrap_or(defaults.min_weight),
            max_weight: self.max_weight.unwrap_or(defaults.max_weight),
        }
    }
}

impl CliConfig {
    pub fn store_path(&self) -> &str {
        self.store.as_deref().unwrap_or(DEFAULT_STORE_PATH)
    }

    /// `--verbose` wins over the `[monitoring] log_level` of an import config.
    pub fn log_level<'a>(&self, configured: Option<&'a str>) -> &'a str {
        if self.verbose {
            "debug"
        } else {
            configured.unwrap_or("info")
        }
    }
}
