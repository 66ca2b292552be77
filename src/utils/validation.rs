use crate::utils::error::{Result, SynthError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SynthError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SynthError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SynthError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    for format in formats {
        if !allowed_set.contains(format.as_str()) {
            return Err(SynthError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!("Unsupported format. Valid formats: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SynthError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

fn country_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ICAO 三碼，不足三碼者以 '<' 補齊 (例如德國 "D<<")
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z][A-Z<]{2}$").expect("static regex"))
}

/// Issuing state / nationality code as it appears in the MRZ.
pub fn validate_country_code(field_name: &str, code: &str) -> Result<()> {
    if !country_code_pattern().is_match(code) {
        return Err(SynthError::InvalidField {
            field: field_name.to_string(),
            reason: format!(
                "'{}' is not a 3-character code of A-Z or '<' starting with a letter",
                code
            ),
        });
    }
    Ok(())
}
