use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Invalid MRZ character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("Field '{field}' is {len} characters, exceeds MRZ width {width}")]
    FieldTooLong {
        field: String,
        len: usize,
        width: usize,
    },

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Check digit mismatch for {field}: expected {expected}, found {found}")]
    ChecksumMismatch {
        field: String,
        expected: char,
        found: char,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Date error: {message}")]
    DateError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SynthError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Encoding,
    Configuration,
    Storage,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SynthError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SynthError::InvalidCharacter { .. }
            | SynthError::FieldTooLong { .. }
            | SynthError::InvalidField { .. }
            | SynthError::ChecksumMismatch { .. }
            | SynthError::DateError { .. } => ErrorCategory::Encoding,
            SynthError::ConfigError { .. }
            | SynthError::ConfigValidationError { .. }
            | SynthError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SynthError::IoError(_) => ErrorCategory::Storage,
            SynthError::CsvError(_) | SynthError::SerializationError(_) => {
                ErrorCategory::Serialization
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單筆記錄的輸入問題，換一組輸入即可
            SynthError::InvalidCharacter { .. }
            | SynthError::FieldTooLong { .. }
            | SynthError::InvalidField { .. }
            | SynthError::DateError { .. } => ErrorSeverity::Medium,
            SynthError::ConfigError { .. }
            | SynthError::ConfigValidationError { .. }
            | SynthError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            // 自行產生的 MRZ 驗證失敗代表程式錯誤
            SynthError::ChecksumMismatch { .. } => ErrorSeverity::Critical,
            SynthError::IoError(_) | SynthError::CsvError(_) | SynthError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SynthError::InvalidCharacter { .. } => {
                "Normalize the input (uppercase, transliterate diacritics) before encoding"
            }
            SynthError::FieldTooLong { .. } => {
                "Shorten the field or run with the 'truncate' overflow policy"
            }
            SynthError::InvalidField { .. } => "Check the identity record field formats",
            SynthError::ChecksumMismatch { .. } => {
                "The MRZ line is corrupted or was produced by a faulty encoder"
            }
            SynthError::DateError { .. } => "Check the dates and the as_of reference date",
            SynthError::ConfigError { .. }
            | SynthError::ConfigValidationError { .. }
            | SynthError::InvalidConfigValueError { .. } => {
                "Review the configuration file or command line flags"
            }
            SynthError::IoError(_) => "Check that the output path exists and is writable",
            SynthError::CsvError(_) | SynthError::SerializationError(_) => {
                "Check the ground truth file contents"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Encoding => format!("MRZ encoding failed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("Could not write output: {}", self),
            ErrorCategory::Serialization => format!("Could not serialize output: {}", self),
        }
    }

    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        SynthError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
