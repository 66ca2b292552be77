pub mod cli;
pub mod toml_config;

use crate::core::field::OverflowPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_country_code, validate_output_formats, validate_path, validate_positive_number,
    Validate,
};
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const OUTPUT_FORMATS: &[&str] = &["json", "csv"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "mrz-synth")]
#[command(about = "Generate synthetic passport records with TD-3 MRZ ground truth")]
pub struct CliConfig {
    #[arg(long, default_value = "100")]
    pub count: usize,

    #[arg(long, default_value = "out/passports_realistic")]
    pub output_path: String,

    #[arg(long, help = "Seed for reproducible datasets")]
    pub seed: Option<u64>,

    #[arg(long, help = "Reference date (YYYY-MM-DD) for sampled dates, defaults to today")]
    pub as_of: Option<NaiveDate>,

    #[arg(long, default_value = "reject", help = "Over-length field policy: truncate or reject")]
    pub overflow: OverflowPolicy,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub formats: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub countries: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn count(&self) -> usize {
        self.count
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn countries(&self) -> &[String] {
        &self.countries
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("count", self.count, 1)?;
        validate_output_formats("formats", &self.formats, OUTPUT_FORMATS)?;
        for code in &self.countries {
            validate_country_code("countries", code)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["mrz-synth"]);
        assert_eq!(config.count, 100);
        assert_eq!(config.overflow, OverflowPolicy::Reject);
        assert_eq!(config.formats, vec!["json".to_string()]);
        assert!(config.countries.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_parses_lists_and_dates() {
        let config = CliConfig::parse_from([
            "mrz-synth",
            "--count",
            "5",
            "--formats",
            "json,csv",
            "--countries",
            "USA,DEU",
            "--as-of",
            "2024-02-29",
            "--overflow",
            "truncate",
        ]);
        assert_eq!(config.formats.len(), 2);
        assert_eq!(config.countries, vec!["USA".to_string(), "DEU".to_string()]);
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(config.overflow_policy(), OverflowPolicy::Truncate);
    }

    #[test]
    fn test_cli_validation_rejects_bad_values() {
        let config = CliConfig::parse_from(["mrz-synth", "--count", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["mrz-synth", "--formats", "pdf"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["mrz-synth", "--countries", "germany"]);
        assert!(config.validate().is_err());
    }
}
