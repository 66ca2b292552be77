use crate::config::OUTPUT_FORMATS;
use crate::core::field::OverflowPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SynthError};
use crate::utils::validation::{
    validate_country_code, validate_non_empty_string, validate_output_formats, validate_path,
    validate_positive_number, Validate,
};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub batch: BatchConfig,
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub mrz: MrzConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub count: usize,
    pub seed: Option<u64>,
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MrzConfig {
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub json: Option<String>,
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SynthError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SynthError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SynthError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("batch.name", &self.batch.name)?;
        validate_path("output.path", &self.output.path)?;
        validate_positive_number("generator.count", self.generator.count, 1)?;
        validate_output_formats("output.formats", &self.output.formats, OUTPUT_FORMATS)?;

        for code in &self.generator.countries {
            validate_country_code("generator.countries", code)?;
        }

        if let Some(filenames) = &self.output.filenames {
            for name in filenames.json.iter().chain(filenames.csv.iter()) {
                validate_path("output.filenames", name)?;
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn count(&self) -> usize {
        self.generator.count
    }

    fn seed(&self) -> Option<u64> {
        self.generator.seed
    }

    fn as_of(&self) -> Option<NaiveDate> {
        self.generator.as_of
    }

    fn overflow_policy(&self) -> OverflowPolicy {
        self.mrz.overflow
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn countries(&self) -> &[String] {
        &self.generator.countries
    }

    fn json_filename(&self) -> &str {
        self.output
            .filenames
            .as_ref()
            .and_then(|f| f.json.as_deref())
            .unwrap_or("groundtruth.json")
    }

    fn csv_filename(&self) -> &str {
        self.output
            .filenames
            .as_ref()
            .and_then(|f| f.csv.as_deref())
            .unwrap_or("groundtruth.csv")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
