pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{
    checksum::check_digit, engine::BatchEngine, field::format_field, field::OverflowPolicy,
    pipeline::PassportPipeline, td3::Td3Encoder, verify::verify_line2,
};
pub use domain::model::{GroundTruthEntry, IdentityRecord, MrzLines, Sex};
pub use utils::error::{Result, SynthError};
