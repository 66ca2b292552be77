//! TD-3 (passport) MRZ assembly.
//!
//! Line 1: `P<` + issuing state (3) + name field (39).
//! Line 2: document number (9) + check, nationality (3), birth date (6) +
//! check, sex (1), expiry date (6) + check, personal number (14) + check,
//! composite check.
//!
//! The composite check digit covers document number, birth date, expiry date
//! and personal number, each followed by its own check digit, in that order.

use crate::core::charset::{ensure_mrz_legal, normalize_text, FILLER};
use crate::core::checksum::check_digit_char;
use crate::core::field::{format_field, OverflowPolicy};
use crate::domain::model::{IdentityRecord, MrzLines};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;

pub const LINE_LEN: usize = 44;
pub const NAME_FIELD_LEN: usize = 39;
pub const DOCUMENT_NUMBER_LEN: usize = 9;
pub const PERSONAL_NUMBER_LEN: usize = 14;
pub const DOCUMENT_CODE: &str = "P<";

#[derive(Debug, Clone, Copy, Default)]
pub struct Td3Encoder {
    overflow: OverflowPolicy,
}

impl Td3Encoder {
    pub fn new(overflow: OverflowPolicy) -> Self {
        Self { overflow }
    }

    pub fn encode(&self, record: &IdentityRecord) -> Result<MrzLines> {
        record.validate()?;

        let line1 = self.line1(record)?;
        let line2 = self.line2(record)?;
        tracing::debug!("Encoded MRZ for passport {}", record.passport_number);

        Ok(MrzLines { line1, line2 })
    }

    pub fn line1(&self, record: &IdentityRecord) -> Result<String> {
        let surname = normalize_text(&record.surname);
        let given = normalize_text(&record.given_names);
        let raw = join_name(&surname, &given);
        let name = format_field("name", &raw, NAME_FIELD_LEN, self.overflow)?;
        if separator_lost(&surname, &given) {
            tracing::warn!(
                "Name separator lost after truncation for passport {}",
                record.passport_number
            );
        }

        let line = format!("{}{}{}", DOCUMENT_CODE, record.nationality, name);
        ensure_mrz_legal(&line)?;
        Ok(line)
    }

    pub fn line2(&self, record: &IdentityRecord) -> Result<String> {
        let number = format_field(
            "passport_number",
            &record.passport_number,
            DOCUMENT_NUMBER_LEN,
            self.overflow,
        )?;
        let number_check = check_digit_char(&number)?;

        let birth = yymmdd(record.date_of_birth);
        let birth_check = check_digit_char(&birth)?;

        let expiry = yymmdd(record.date_of_expiry);
        let expiry_check = check_digit_char(&expiry)?;

        let personal = format_field(
            "personal_number",
            &normalize_text(record.personal_number.as_deref().unwrap_or_default()),
            PERSONAL_NUMBER_LEN,
            self.overflow,
        )?;
        let personal_check = check_digit_char(&personal)?;

        let composite = format!(
            "{}{}{}{}{}{}{}{}",
            number, number_check, birth, birth_check, expiry, expiry_check, personal, personal_check
        );
        let composite_check = check_digit_char(&composite)?;

        let line = format!(
            "{}{}{}{}{}{}{}{}{}{}{}",
            number,
            number_check,
            record.nationality,
            birth,
            birth_check,
            record.sex.as_mrz_char(),
            expiry,
            expiry_check,
            personal,
            personal_check,
            composite_check
        );
        ensure_mrz_legal(&line)?;
        Ok(line)
    }
}

/// `SURNAME<<GIVEN<NAMES`, normalized. No separator when there are no given names.
pub fn name_field(surname: &str, given_names: &str) -> String {
    join_name(&normalize_text(surname), &normalize_text(given_names))
}

fn join_name(surname: &str, given: &str) -> String {
    if given.is_empty() {
        surname.to_string()
    } else {
        format!("{}{}{}{}", surname, FILLER, FILLER, given)
    }
}

/// True when a normalized surname leaves no room for the full `<<` separator
/// inside the name field.
fn separator_lost(surname: &str, given: &str) -> bool {
    !given.is_empty() && surname.chars().count() + 2 > NAME_FIELD_LEN
}

pub fn yymmdd(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}
