//! Recomputes the check digits embedded in TD-3 MRZ lines.

use crate::core::charset::{ensure_mrz_legal, FILLER};
use crate::core::checksum::check_digit_char;
use crate::core::td3::{DOCUMENT_CODE, LINE_LEN};
use crate::domain::model::MrzLines;
use crate::utils::error::{Result, SynthError};
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckedField {
    DocumentNumber,
    DateOfBirth,
    DateOfExpiry,
    PersonalNumber,
    Composite,
}

impl CheckedField {
    pub const ALL: [CheckedField; 5] = [
        CheckedField::DocumentNumber,
        CheckedField::DateOfBirth,
        CheckedField::DateOfExpiry,
        CheckedField::PersonalNumber,
        CheckedField::Composite,
    ];

    /// Data ranges in line 2 covered by this check digit.
    pub fn data_ranges(self) -> &'static [Range<usize>] {
        match self {
            CheckedField::DocumentNumber => &[0..9],
            CheckedField::DateOfBirth => &[13..19],
            CheckedField::DateOfExpiry => &[21..27],
            CheckedField::PersonalNumber => &[28..42],
            CheckedField::Composite => &[0..10, 13..20, 21..43],
        }
    }

    /// Offset of the check digit in line 2.
    pub fn check_offset(self) -> usize {
        match self {
            CheckedField::DocumentNumber => 9,
            CheckedField::DateOfBirth => 19,
            CheckedField::DateOfExpiry => 27,
            CheckedField::PersonalNumber => 42,
            CheckedField::Composite => 43,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CheckedField::DocumentNumber => "document_number",
            CheckedField::DateOfBirth => "date_of_birth",
            CheckedField::DateOfExpiry => "date_of_expiry",
            CheckedField::PersonalNumber => "personal_number",
            CheckedField::Composite => "composite",
        }
    }
}

impl fmt::Display for CheckedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub field: CheckedField,
    pub expected: char,
    pub found: char,
    pub valid: bool,
}

impl FieldCheck {
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(SynthError::ChecksumMismatch {
                field: self.field.name().to_string(),
                expected: self.expected,
                found: self.found,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line2Report {
    pub checks: Vec<FieldCheck>,
}

impl Line2Report {
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.checks.iter().filter(|c| !c.valid)
    }

    /// First failing check as a `ChecksumMismatch` error.
    pub fn into_result(self) -> Result<()> {
        self.checks.into_iter().try_for_each(FieldCheck::into_result)
    }
}

fn ensure_line(name: &str, line: &str) -> Result<()> {
    let len = line.chars().count();
    if len != LINE_LEN {
        return Err(SynthError::invalid_field(
            name,
            format!("expected {} characters, found {}", LINE_LEN, len),
        ));
    }
    ensure_mrz_legal(line)
}

/// Recomputes one check digit of `line2` and compares it with the digit
/// stored at the field's offset.
pub fn verify_field(line2: &str, field: CheckedField) -> Result<FieldCheck> {
    ensure_line("line2", line2)?;

    let data: String = field
        .data_ranges()
        .iter()
        .map(|range| &line2[range.clone()])
        .collect();
    let expected = check_digit_char(&data)?;
    let offset = field.check_offset();
    let found = char::from(line2.as_bytes()[offset]);

    // 未使用的個人號碼欄位，檢查碼位置可填 '<'
    let unused_personal = field == CheckedField::PersonalNumber
        && found == FILLER
        && data.chars().all(|c| c == FILLER);

    Ok(FieldCheck {
        field,
        expected,
        found,
        valid: found == expected || unused_personal,
    })
}

pub fn verify_line2(line2: &str) -> Result<Line2Report> {
    let checks = CheckedField::ALL
        .iter()
        .map(|field| verify_field(line2, *field))
        .collect::<Result<Vec<_>>>()?;
    Ok(Line2Report { checks })
}

/// Checks line 1 shape (length, alphabet, `P` document code) and every
/// check digit of line 2.
pub fn verify_lines(mrz: &MrzLines) -> Result<Line2Report> {
    ensure_line("line1", &mrz.line1)?;
    if !mrz.line1.starts_with(&DOCUMENT_CODE[..1]) {
        return Err(SynthError::invalid_field(
            "line1",
            "TD-3 passport lines must start with document code 'P'",
        ));
    }
    verify_line2(&mrz.line2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECIMEN_LINE1: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<";
    const SPECIMEN_LINE2: &str = "L898902C36UTO7408122F1204159ZE184226B<<<<<10";

    #[test]
    fn test_specimen_verifies() {
        let report = verify_line2(SPECIMEN_LINE2).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.checks.len(), 5);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_detects_corrupted_birth_date() {
        let corrupted = SPECIMEN_LINE2.replace("740812", "740813");
        let check = verify_field(&corrupted, CheckedField::DateOfBirth).unwrap();
        assert!(!check.valid);
        assert_eq!(check.found, '2');

        let report = verify_line2(&corrupted).unwrap();
        let failed: Vec<CheckedField> = report.failures().map(|c| c.field).collect();
        assert!(failed.contains(&CheckedField::DateOfBirth));
        assert!(matches!(
            report.into_result(),
            Err(SynthError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_filler_check_digit_for_unused_personal_number() {
        let line2 = "L898902C36UTO7408122M1204159<<<<<<<<<<<<<<<8";
        let check = verify_field(line2, CheckedField::PersonalNumber).unwrap();
        assert!(check.valid);
        assert_eq!(check.expected, '0');
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        assert!(matches!(
            verify_line2("L898902C36UTO"),
            Err(SynthError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_illegal_character_is_rejected() {
        let bad = SPECIMEN_LINE2.replace('F', "f");
        assert!(matches!(
            verify_line2(&bad),
            Err(SynthError::InvalidCharacter { ch: 'f', position: 20 })
        ));
    }

    #[test]
    fn test_verify_lines_checks_document_code() {
        let good = MrzLines {
            line1: SPECIMEN_LINE1.to_string(),
            line2: SPECIMEN_LINE2.to_string(),
        };
        assert!(verify_lines(&good).unwrap().is_valid());

        let bad = MrzLines {
            line1: SPECIMEN_LINE1.replacen('P', "V", 1),
            line2: SPECIMEN_LINE2.to_string(),
        };
        assert!(verify_lines(&bad).is_err());
    }
}
