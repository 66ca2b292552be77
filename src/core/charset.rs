//! MRZ character set: numeric values for check digit arithmetic, and
//! caller-side normalization of free text into the MRZ alphabet.
//!
//! The legal alphabet is `A-Z`, `0-9` and the filler `<` (37 characters).

use crate::utils::error::{Result, SynthError};

pub const FILLER: char = '<';

/// Numeric value of an MRZ character: digits are themselves, `A`..`Z` are
/// 10..35, the filler is 0.
pub fn char_value(ch: char, position: usize) -> Result<u32> {
    match ch {
        '0'..='9' => Ok(ch as u32 - '0' as u32),
        'A'..='Z' => Ok(ch as u32 - 'A' as u32 + 10),
        FILLER => Ok(0),
        _ => Err(SynthError::InvalidCharacter { ch, position }),
    }
}

pub fn is_mrz_char(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == FILLER
}

/// Fails with `InvalidCharacter` at the first character outside the alphabet.
pub fn ensure_mrz_legal(text: &str) -> Result<()> {
    match text.chars().enumerate().find(|(_, c)| !is_mrz_char(*c)) {
        Some((position, ch)) => Err(SynthError::InvalidCharacter { ch, position }),
        None => Ok(()),
    }
}

fn transliterate(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ą' | 'Ă' | 'Ā' => "A",
        'Ä' | 'Æ' => "AE",
        'Å' => "AA",
        'Ç' | 'Č' | 'Ć' | 'Ĉ' | 'Ċ' => "C",
        'Ď' | 'Đ' | 'Ð' => "D",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ę' | 'Ě' | 'Ē' | 'Ė' => "E",
        'Ğ' | 'Ĝ' | 'Ġ' | 'Ģ' => "G",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'İ' | 'Ī' | 'Į' => "I",
        'Ķ' => "K",
        'Ł' | 'Ľ' | 'Ĺ' | 'Ļ' => "L",
        'Ñ' | 'Ń' | 'Ň' | 'Ņ' => "N",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ő' | 'Ō' => "O",
        'Ö' | 'Ø' | 'Œ' => "OE",
        'Ř' | 'Ŕ' => "R",
        'Š' | 'Ś' | 'Ş' | 'Ș' | 'Ŝ' => "S",
        'ẞ' => "SS",
        'Ť' | 'Ţ' | 'Ț' => "T",
        'Þ' => "TH",
        'Ù' | 'Ú' | 'Û' | 'Ů' | 'Ű' | 'Ū' | 'Ų' => "U",
        'Ü' => "UE",
        'Ý' | 'Ÿ' => "Y",
        'Ž' | 'Ź' | 'Ż' => "Z",
        ' ' | '-' | ',' => "<",
        '\'' | '.' | '’' => "",
        _ => return None,
    };
    Some(mapped)
}

/// Uppercases, transliterates Latin diacritics and replaces spaces/hyphens
/// with the filler. Characters with no mapping are kept as-is so the encoder
/// rejects them later instead of dropping them.
///
/// Separator runs collapse to a single filler and leading/trailing fillers
/// are dropped, so the only `<<` in a name field is the one between surname
/// and given names.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.trim().chars().flat_map(char::to_uppercase) {
        let mapped = if is_mrz_char(ch) {
            None
        } else {
            transliterate(ch)
        };
        match mapped {
            Some("<") => push_filler(&mut out),
            Some(s) => out.push_str(s),
            None if ch == FILLER => push_filler(&mut out),
            None => out.push(ch),
        }
    }
    let trimmed = out.trim_end_matches(FILLER).len();
    out.truncate(trimmed);
    out
}

fn push_filler(out: &mut String) {
    if !out.is_empty() && !out.ends_with(FILLER) {
        out.push(FILLER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_values() {
        assert_eq!(char_value('0', 0).unwrap(), 0);
        assert_eq!(char_value('9', 0).unwrap(), 9);
        assert_eq!(char_value('A', 0).unwrap(), 10);
        assert_eq!(char_value('Z', 0).unwrap(), 35);
        assert_eq!(char_value('<', 0).unwrap(), 0);
    }

    #[test]
    fn test_invalid_characters_rejected() {
        for ch in ['a', ' ', '-', 'É', '/', '\n'] {
            assert!(matches!(
                char_value(ch, 7),
                Err(SynthError::InvalidCharacter { position: 7, .. })
            ));
        }
    }

    #[test]
    fn test_ensure_mrz_legal_reports_position() {
        assert!(ensure_mrz_legal("P<UTOERIKSSON<<ANNA").is_ok());
        match ensure_mrz_legal("AB?D") {
            Err(SynthError::InvalidCharacter { ch, position }) => {
                assert_eq!(ch, '?');
                assert_eq!(position, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("anna maria"), "ANNA<MARIA");
        assert_eq!(normalize_text("Müller-Lüdenscheidt"), "MUELLER<LUEDENSCHEIDT");
        assert_eq!(normalize_text("O'Brien"), "OBRIEN");
        assert_eq!(normalize_text("Straße"), "STRASSE");
        assert_eq!(normalize_text("Øster Ångström"), "OESTER<AANGSTROEM");
        assert_eq!(normalize_text("José"), "JOSE");
    }

    #[test]
    fn test_normalize_collapses_separator_runs() {
        assert_eq!(normalize_text("Smith - Jones"), "SMITH<JONES");
        assert_eq!(normalize_text("Anna  Maria"), "ANNA<MARIA");
        assert_eq!(normalize_text("Doe, Jr."), "DOE<JR");
        assert_eq!(normalize_text("ERIKSSON<<ANNA"), "ERIKSSON<ANNA");
    }

    #[test]
    fn test_normalize_trims_edge_fillers() {
        assert_eq!(normalize_text("-Anna-"), "ANNA");
        assert_eq!(normalize_text("<Maria, "), "MARIA");
        assert_eq!(normalize_text(" - "), "");
    }

    #[test]
    fn test_normalize_keeps_unmapped_characters() {
        let normalized = normalize_text("李");
        assert_eq!(normalized, "李");
        assert!(ensure_mrz_legal(&normalized).is_err());
    }
}
