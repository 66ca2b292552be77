use crate::domain::model::{IdentityRecord, Sex};
use crate::utils::error::{Result, SynthError};
use crate::utils::validation::validate_country_code;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Passport number layout per issuing state: `L` letter, `N` digit.
#[derive(Debug, Clone, Copy)]
pub struct CountryFormat {
    pub code: &'static str,
    pub name: &'static str,
    pub number_format: &'static str,
}

pub const COUNTRY_FORMATS: &[CountryFormat] = &[
    CountryFormat { code: "USA", name: "UNITED STATES OF AMERICA", number_format: "NNNNNNNNN" },
    CountryFormat { code: "CAN", name: "CANADA", number_format: "LLNNNNNN" },
    CountryFormat { code: "DEU", name: "GERMANY", number_format: "LLNNNNLNN" },
    CountryFormat { code: "GBR", name: "UNITED KINGDOM", number_format: "NNNNNNNNN" },
    CountryFormat { code: "AUS", name: "AUSTRALIA", number_format: "LNNNNNNN" },
];

pub const DEFAULT_NUMBER_FORMAT: &str = "LNNNNNNNN";

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const MALE_GIVEN_NAMES: &[&str] = &[
    "JAMES", "JOHN", "ROBERT", "MICHAEL", "WILLIAM", "DAVID", "RICHARD", "JOSEPH", "THOMAS",
    "CHARLES", "DANIEL", "MATTHEW", "ANTHONY", "MARK", "STEVEN", "PAUL", "ANDREW", "KEVIN",
    "BRIAN", "GEORGE", "LUKAS", "NOAH", "LIAM", "OLIVER",
];

const FEMALE_GIVEN_NAMES: &[&str] = &[
    "MARY", "PATRICIA", "JENNIFER", "LINDA", "ELIZABETH", "BARBARA", "SUSAN", "JESSICA",
    "SARAH", "KAREN", "NANCY", "LISA", "MARGARET", "SANDRA", "ASHLEY", "EMILY", "DONNA",
    "MICHELLE", "CAROL", "AMANDA", "EMMA", "OLIVIA", "SOPHIA", "ANNA MARIA",
];

const SURNAMES: &[&str] = &[
    "SMITH", "JOHNSON", "WILLIAMS", "BROWN", "JONES", "GARCIA", "MILLER", "DAVIS",
    "RODRIGUEZ", "MARTINEZ", "HERNANDEZ", "LOPEZ", "WILSON", "ANDERSON", "THOMAS", "TAYLOR",
    "MOORE", "JACKSON", "MARTIN", "LEE", "THOMPSON", "WHITE", "HARRIS", "CLARK", "MUELLER",
    "SCHMIDT", "TREMBLAY", "NGUYEN", "VAN DER BERG", "O'CONNOR",
];

const MIN_AGE_YEARS: i64 = 18;
const MAX_AGE_YEARS: i64 = 80;
const VALIDITY_YEARS: i64 = 10;

pub fn find_country(code: &str) -> Option<&'static CountryFormat> {
    COUNTRY_FORMATS.iter().find(|c| c.code == code)
}

/// Random passport number following `format` (`L` letter, `N` digit).
pub fn passport_number<R: Rng + ?Sized>(rng: &mut R, format: &str) -> String {
    format
        .chars()
        .filter_map(|slot| match slot {
            'L' => Some(char::from(LETTERS[rng.gen_range(0..LETTERS.len())])),
            'N' => Some(char::from(b'0' + rng.gen_range(0..10u8))),
            _ => None,
        })
        .collect()
}

fn days_before(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_sub_signed(Duration::days(days))
        .ok_or_else(|| SynthError::DateError {
            message: format!("{} minus {} days is out of range", date, days),
        })
}

fn days_after(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| SynthError::DateError {
            message: format!("{} plus {} days is out of range", date, days),
        })
}

/// Draws random identity records for synthetic passports.
pub struct IdentitySampler {
    rng: StdRng,
    as_of: NaiveDate,
    countries: Vec<String>,
}

impl IdentitySampler {
    /// `countries` empty means every entry of [`COUNTRY_FORMATS`].
    pub fn new(seed: Option<u64>, as_of: NaiveDate, countries: &[String]) -> Result<Self> {
        for code in countries {
            validate_country_code("generator.countries", code)?;
        }
        let countries = if countries.is_empty() {
            COUNTRY_FORMATS.iter().map(|c| c.code.to_string()).collect()
        } else {
            countries.to_vec()
        };

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rng,
            as_of,
            countries,
        })
    }

    pub fn sample(&mut self) -> Result<IdentityRecord> {
        let code = self
            .countries
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| SynthError::ConfigError {
                message: "no countries to sample from".to_string(),
            })?;
        let (number_format, nationality_long) = match find_country(&code) {
            Some(country) => (country.number_format, country.name.to_string()),
            None => (DEFAULT_NUMBER_FORMAT, code.clone()),
        };

        let sex = if self.rng.gen_bool(0.5) {
            Sex::Male
        } else {
            Sex::Female
        };
        let given_pool = match sex {
            Sex::Female => FEMALE_GIVEN_NAMES,
            _ => MALE_GIVEN_NAMES,
        };
        let given_names = given_pool[self.rng.gen_range(0..given_pool.len())].to_string();
        let surname = SURNAMES[self.rng.gen_range(0..SURNAMES.len())].to_string();

        let age_days = self
            .rng
            .gen_range(MIN_AGE_YEARS * 365..=MAX_AGE_YEARS * 365);
        let date_of_birth = days_before(self.as_of, age_days)?;

        let adult_since = days_after(date_of_birth, MIN_AGE_YEARS * 365)?;
        let issue_window = (self.as_of - adult_since).num_days().max(0);
        let date_of_issue = days_after(adult_since, self.rng.gen_range(0..=issue_window))?;

        let validity = VALIDITY_YEARS * 365 - self.rng.gen_range(1..=30);
        let date_of_expiry = days_after(date_of_issue, validity)?;

        Ok(IdentityRecord {
            surname,
            given_names,
            nationality: code,
            nationality_long: Some(nationality_long),
            passport_number: passport_number(&mut self.rng, number_format),
            sex,
            date_of_birth,
            date_of_issue,
            date_of_expiry,
            personal_number: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_passport_number_follows_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let number = passport_number(&mut rng, "LLNNNNLNN");
        assert_eq!(number.len(), 9);
        let chars: Vec<char> = number.chars().collect();
        assert!(chars[0].is_ascii_uppercase() && chars[1].is_ascii_uppercase());
        assert!(chars[2..6].iter().all(|c| c.is_ascii_digit()));
        assert!(chars[6].is_ascii_uppercase());
        assert!(chars[7..].iter().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_seeded_sampler_is_deterministic() {
        let mut a = IdentitySampler::new(Some(42), as_of(), &[]).unwrap();
        let mut b = IdentitySampler::new(Some(42), as_of(), &[]).unwrap();
        for _ in 0..10 {
            assert_eq!(a.sample().unwrap(), b.sample().unwrap());
        }
    }

    #[test]
    fn test_sampled_dates_are_ordered() {
        let mut sampler = IdentitySampler::new(Some(1), as_of(), &[]).unwrap();
        for _ in 0..200 {
            let r = sampler.sample().unwrap();
            let age_days = (as_of() - r.date_of_birth).num_days();
            assert!((18 * 365..=80 * 365).contains(&age_days));
            assert!(r.date_of_issue >= r.date_of_birth + Duration::days(18 * 365));
            assert!(r.date_of_issue <= as_of());
            let validity = (r.date_of_expiry - r.date_of_issue).num_days();
            assert!((10 * 365 - 30..10 * 365).contains(&validity));
        }
    }

    #[test]
    fn test_country_restriction_and_unknown_code() {
        let countries = vec!["CAN".to_string(), "UTO".to_string()];
        let mut sampler = IdentitySampler::new(Some(3), as_of(), &countries).unwrap();
        for _ in 0..50 {
            let r = sampler.sample().unwrap();
            match r.nationality.as_str() {
                "CAN" => assert_eq!(r.passport_number.len(), 8),
                "UTO" => {
                    assert_eq!(r.passport_number.len(), 9);
                    assert_eq!(r.nationality_long.as_deref(), Some("UTO"));
                }
                other => panic!("unexpected nationality {}", other),
            }
        }
    }

    #[test]
    fn test_rejects_invalid_country_code() {
        let countries = vec!["usa".to_string()];
        assert!(IdentitySampler::new(None, as_of(), &countries).is_err());
    }
}
