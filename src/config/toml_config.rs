use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_STORE_PATH: &str = "./store";

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub import: ImportSection,
    #[serde(default)]
    pub store: StoreSection,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSection {
    pub source_path: String,
    /// 0 或未設定代表不限制
    pub import_size: Option<usize>,
    pub batch_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl ImportConfig {
    pub fn new(source_path: impl Into<String>, store_path: impl Into<String>) -> Self {
        Self {
            import: ImportSection {
                source_path: source_path.into(),
                import_size: None,
                batch_size: None,
            },
            store: StoreSection {
                path: store_path.into(),
            },
            monitoring: None,
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MET_DATA_DIR})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for ImportConfig {
    fn source_path(&self) -> &str {
        &self.import.source_path
    }

    fn store_path(&self) -> &str {
        &self.store.path
    }

    fn import_size(&self) -> usize {
        self.import.import_size.unwrap_or(0)
    }

    fn batch_size(&self) -> usize {
        self.import.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("import.source_path", &self.import.source_path)?;
        validation::validate_file_extension("import.source_path", &self.import.source_path, &["csv"])?;
        validation::validate_path("store.path", &self.store.path)?;
        validation::validate_positive_number("import.batch_size", self.batch_size(), 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[import]
source_path = "MetObjects.csv"
import_size = 500

[store]
path = "./met-store"

[monitoring]
enabled = true
log_level = "debug"
"#;

        let config = ImportConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source_path(), "MetObjects.csv");
        assert_eq!(config.store_path(), "./met-store");
        assert_eq!(config.import_size(), 500);
        assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
        assert!(config.monitoring_enabled());
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = ImportConfig::from_toml_str("[import]\nsource_path = \"a.csv\"\n").unwrap();
        assert_eq!(config.store_path(), DEFAULT_STORE_PATH);
        assert_eq!(config.import_size(), 0);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MET_TEST_DATA_DIR", "/data/met");

        let toml_content = r#"
[import]
source_path = "${MET_TEST_DATA_DIR}/MetObjects.csv"
"#;

        let config = ImportConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source_path(), "/data/met/MetObjects.csv");

        std::env::remove_var("MET_TEST_DATA_DIR");
    }

    #[test]
    fn test_unknown_env_var_is_kept() {
        let config =
            ImportConfig::from_toml_str("[import]\nsource_path = \"${MET_TEST_UNSET_VAR}.csv\"\n")
                .unwrap();
        assert_eq!(config.source_path(), "${MET_TEST_UNSET_VAR}.csv");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ImportConfig::new("MetObjects.json", "./store");
        assert!(config.validate().is_err());

        config.import.source_path = "MetObjects.csv".to_string();
        config.import.batch_size = Some(0);
        assert!(config.validate().is_err());

        config.import.batch_size = Some(10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ImportConfig::from_toml_str("[import"),
            Err(EtlError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[import]\nsource_path = \"file.csv\"\nbatch_size = 50\n")
            .unwrap();

        let config = ImportConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source_path(), "file.csv");
        assert_eq!(config.batch_size(), 50);
    }
}
