use crate::utils::error::{Result, SynthError};
use crate::utils::validation::{validate_country_code, validate_non_empty_string, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sex marker of the document holder. `<` is the ICAO 9303 "unspecified" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "<")]
    Unspecified,
}

impl Sex {
    pub fn as_mrz_char(self) -> char {
        match self {
            Sex::Male => 'M',
            Sex::Female => 'F',
            Sex::Unspecified => '<',
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_mrz_char())
    }
}

impl FromStr for Sex {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "M" | "m" => Ok(Sex::Male),
            "F" | "f" => Ok(Sex::Female),
            "<" | "X" | "x" => Ok(Sex::Unspecified),
            other => Err(SynthError::invalid_field(
                "sex",
                format!("'{}' is not one of M, F, <", other),
            )),
        }
    }
}

/// Identity fields of one passport data page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub surname: String,
    pub given_names: String,
    pub nationality: String,
    #[serde(default)]
    pub nationality_long: Option<String>,
    pub passport_number: String,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    pub date_of_issue: NaiveDate,
    pub date_of_expiry: NaiveDate,
    #[serde(default)]
    pub personal_number: Option<String>,
}

pub const MAX_DOCUMENT_NUMBER_LEN: usize = 9;
pub const MAX_PERSONAL_NUMBER_LEN: usize = 14;

impl Validate for IdentityRecord {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("surname", &self.surname)
            .map_err(|_| SynthError::invalid_field("surname", "surname cannot be empty"))?;
        validate_country_code("nationality", &self.nationality)?;

        let number = &self.passport_number;
        if number.is_empty() || number.len() > MAX_DOCUMENT_NUMBER_LEN {
            return Err(SynthError::invalid_field(
                "passport_number",
                format!(
                    "length {} is outside 1..={}",
                    number.len(),
                    MAX_DOCUMENT_NUMBER_LEN
                ),
            ));
        }
        if !number.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SynthError::invalid_field(
                "passport_number",
                format!("'{}' must be ASCII alphanumeric", number),
            ));
        }

        if let Some(personal) = &self.personal_number {
            if personal.chars().count() > MAX_PERSONAL_NUMBER_LEN {
                return Err(SynthError::FieldTooLong {
                    field: "personal_number".to_string(),
                    len: personal.chars().count(),
                    width: MAX_PERSONAL_NUMBER_LEN,
                });
            }
        }

        Ok(())
    }
}

/// The two TD-3 lines, 44 characters each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrzLines {
    pub line1: String,
    pub line2: String,
}

impl fmt::Display for MrzLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.line1, self.line2)
    }
}

/// One labelled record of the ground truth dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruthEntry {
    pub passport_number: String,
    pub surname: String,
    pub given_names: String,
    pub nationality_code: String,
    pub nationality_long: String,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    pub date_of_issue: NaiveDate,
    pub date_of_expiry: NaiveDate,
    pub mrz_line1: String,
    pub mrz_line2: String,
}

impl GroundTruthEntry {
    pub fn new(record: &IdentityRecord, mrz: MrzLines) -> Self {
        Self {
            passport_number: record.passport_number.clone(),
            surname: record.surname.clone(),
            given_names: record.given_names.clone(),
            nationality_code: record.nationality.clone(),
            nationality_long: record.nationality_long.clone().unwrap_or_default(),
            sex: record.sex,
            date_of_birth: record.date_of_birth,
            date_of_issue: record.date_of_issue,
            date_of_expiry: record.date_of_expiry,
            mrz_line1: mrz.line1,
            mrz_line2: mrz.line2,
        }
    }

    pub fn mrz(&self) -> MrzLines {
        MrzLines {
            line1: self.mrz_line1.clone(),
            line2: self.mrz_line2.clone(),
        }
    }
}

/// Document id (`passport_<number>`) to ground truth entry.
pub type GroundTruth = BTreeMap<String, GroundTruthEntry>;

pub fn document_id(passport_number: &str) -> String {
    format!("passport_{}", passport_number)
}

#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub ground_truth: GroundTruth,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> IdentityRecord {
        IdentityRecord {
            surname: "ERIKSSON".to_string(),
            given_names: "ANNA MARIA".to_string(),
            nationality: "UTO".to_string(),
            nationality_long: None,
            passport_number: "L898902C3".to_string(),
            sex: Sex::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1974, 8, 12).unwrap(),
            date_of_issue: NaiveDate::from_ymd_opt(2002, 4, 16).unwrap(),
            date_of_expiry: NaiveDate::from_ymd_opt(2012, 4, 15).unwrap(),
            personal_number: Some("ZE184226B".to_string()),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(record().validate().is_ok());
    }

    #[test]
    fn test_passport_number_constraints() {
        let mut r = record();
        r.passport_number = "1234567890".to_string();
        assert!(matches!(r.validate(), Err(SynthError::InvalidField { .. })));

        r.passport_number = "AB-12".to_string();
        assert!(r.validate().is_err());

        r.passport_number = String::new();
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_personal_number_too_long() {
        let mut r = record();
        r.personal_number = Some("123456789012345".to_string());
        assert!(matches!(r.validate(), Err(SynthError::FieldTooLong { width: 14, .. })));
    }

    #[test]
    fn test_sex_parsing_and_serde() {
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("<".parse::<Sex>().unwrap(), Sex::Unspecified);
        assert!("Q".parse::<Sex>().is_err());
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"F\"");
    }

    #[test]
    fn test_ground_truth_entry_dates_serialize_iso() {
        let entry = GroundTruthEntry::new(
            &record(),
            MrzLines {
                line1: "L1".to_string(),
                line2: "L2".to_string(),
            },
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date_of_birth"], "1974-08-12");
        assert_eq!(json["nationality_code"], "UTO");
        assert_eq!(document_id(&entry.passport_number), "passport_L898902C3");
    }
}
