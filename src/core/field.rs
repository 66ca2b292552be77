use crate::core::charset::FILLER;
use crate::utils::error::{Result, SynthError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when a field is wider than its MRZ slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Keep the first `width` characters. Lossy: long names lose their tail.
    Truncate,
    /// Fail with `FieldTooLong`.
    #[default]
    Reject,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Truncate => write!(f, "truncate"),
            OverflowPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(OverflowPolicy::Truncate),
            "reject" => Ok(OverflowPolicy::Reject),
            other => Err(SynthError::InvalidConfigValueError {
                field: "overflow".to_string(),
                value: other.to_string(),
                reason: "Valid policies: truncate, reject".to_string(),
            }),
        }
    }
}

/// Formats `text` into a fixed-width MRZ field: uppercase, spaces become `<`,
/// right-padded with `<`. On success the result is exactly `width` characters.
///
/// `field` only names the field in errors and log output.
pub fn format_field(field: &str, text: &str, width: usize, policy: OverflowPolicy) -> Result<String> {
    let mut chars: Vec<char> = text
        .chars()
        .flat_map(char::to_uppercase)
        .map(|c| if c == ' ' { FILLER } else { c })
        .collect();

    if chars.len() > width {
        match policy {
            OverflowPolicy::Reject => {
                return Err(SynthError::FieldTooLong {
                    field: field.to_string(),
                    len: chars.len(),
                    width,
                });
            }
            OverflowPolicy::Truncate => {
                tracing::warn!(
                    "Truncating MRZ field '{}' from {} to {} characters",
                    field,
                    chars.len(),
                    width
                );
                chars.truncate(width);
            }
        }
    }

    chars.resize(width, FILLER);
    Ok(chars.into_iter().collect())
}
