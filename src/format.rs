//! Display formatting helpers: country flags and date labels

use crate::error::SkyNowError;
use chrono::{NaiveDate, NaiveDateTime};

/// Offset from an ASCII uppercase letter to its Unicode regional indicator symbol
const REGIONAL_INDICATOR_OFFSET: u32 = 0x1F1E6 - 'A' as u32;

/// Encode an ISO 3166-1 alpha-2 country code as its flag emoji sequence.
///
/// The code is upper-cased defensively; input that is not exactly two ASCII
/// letters is rejected rather than producing garbage glyphs.
///
/// # Errors
/// Returns a validation error for input that is not two ASCII letters.
pub fn country_flag(country_code: &str) -> Result<String, SkyNowError> {
    let code = country_code.trim().to_ascii_uppercase();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(SkyNowError::validation(format!(
            "Country code must be two ASCII letters, got: '{country_code}'"
        )));
    }

    code.chars()
        .map(|c| {
            char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET).ok_or_else(|| {
                SkyNowError::validation(format!("Country code not encodable: '{country_code}'"))
            })
        })
        .collect()
}

/// Format a date as its short weekday label (e.g. "Mon").
///
/// The label is pinned to English so output does not vary by deployment
/// environment.
#[must_use]
pub fn format_weekday(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Format a timestamp as a 24-hour clock label (e.g. "14:00").
#[must_use]
pub fn format_clock_time(timestamp: NaiveDateTime) -> String {
    timestamp.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_country_flag_is_case_insensitive() {
        let lower = country_flag("tr").unwrap();
        let upper = country_flag("TR").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper, "🇹🇷");
    }

    #[test]
    fn test_country_flag_is_two_scalars() {
        let flag = country_flag("CH").unwrap();
        assert_eq!(flag.chars().count(), 2);
        for scalar in flag.chars() {
            // Regional indicator symbols occupy U+1F1E6..=U+1F1FF
            assert!((0x1F1E6..=0x1F1FF).contains(&(scalar as u32)));
        }
    }

    #[rstest]
    #[case("")]
    #[case("T")]
    #[case("TUR")]
    #[case("T1")]
    #[case("🇹🇷")]
    fn test_country_flag_rejects_malformed_input(#[case] input: &str) {
        assert!(matches!(
            country_flag(input),
            Err(SkyNowError::Validation { .. })
        ));
    }

    #[test]
    fn test_format_weekday() {
        // 2023-12-04 was a Monday
        let date = NaiveDate::from_ymd_opt(2023, 12, 4).unwrap();
        assert_eq!(format_weekday(date), "Mon");
    }

    #[test]
    fn test_format_clock_time() {
        let timestamp = NaiveDate::from_ymd_opt(2023, 12, 4)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        assert_eq!(format_clock_time(timestamp), "14:00");
    }
}
