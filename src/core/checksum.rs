use crate::core::charset::char_value;
use crate::utils::error::Result;

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// ICAO 9303 check digit: weights 7, 3, 1 repeating from the first
/// character, sum of `value * weight` modulo 10.
pub fn check_digit(data: &str) -> Result<u8> {
    let mut total: u32 = 0;
    for (position, ch) in data.chars().enumerate() {
        let value = char_value(ch, position)?;
        total = (total + value * WEIGHTS[position % 3]) % 10;
    }
    Ok(total as u8)
}

pub fn check_digit_char(data: &str) -> Result<char> {
    let digit = check_digit(data)?;
    Ok(char::from(b'0' + digit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SynthError;

    #[test]
    fn test_icao_specimen_fields() {
        assert_eq!(check_digit("L898902C3").unwrap(), 6);
        assert_eq!(check_digit("740812").unwrap(), 2);
        assert_eq!(check_digit("120415").unwrap(), 9);
        assert_eq!(check_digit("ZE184226B<<<<<").unwrap(), 1);
    }

    #[test]
    fn test_composite_specimen() {
        // line 2 的 1-10, 14-20, 22-43 位置
        let line2 = "L898902C36UTO7408122F1204159ZE184226B<<<<<10";
        let composite = format!("{}{}{}", &line2[0..10], &line2[13..20], &line2[21..43]);
        assert_eq!(composite, "L898902C3674081221204159ZE184226B<<<<<1");
        assert_eq!(check_digit(&composite).unwrap(), 0);
    }

    #[test]
    fn test_filler_and_empty_are_zero() {
        assert_eq!(check_digit("").unwrap(), 0);
        assert_eq!(check_digit("<<<<<<<<<<<<<<").unwrap(), 0);
    }

    #[test]
    fn test_check_digit_char() {
        assert_eq!(check_digit_char("L898902C3").unwrap(), '6');
    }

    #[test]
    fn test_rejects_lowercase() {
        assert!(matches!(
            check_digit("l898902c3"),
            Err(SynthError::InvalidCharacter { ch: 'l', position: 0 })
        ));
    }

    #[test]
    fn test_stateless_reuse() {
        let first = check_digit("740812").unwrap();
        let _ = check_digit("ZZZZZZZZZ").unwrap();
        assert_eq!(check_digit("740812").unwrap(), first);
    }
}
