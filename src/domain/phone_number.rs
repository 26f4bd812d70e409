use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use time::OffsetDateTime;

static E164_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").expect("E.164 pattern must compile"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Always E.164 with a leading `+`.
    pub phone: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone number is required")]
    Empty,
    #[error("Phone number is not in E.164 format")]
    Malformed,
    #[error("Country calling code must be 1 to 3 digits")]
    CountryCode,
}

/// Calling code applied to numbers written without a leading `+`.
pub const DEFAULT_COUNTRY_CODE: &str = "1";

/// Turns user input into E.164, reading `+`-less input as a national number
/// of one default country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNormalizer {
    country_code: String,
}

impl Default for PhoneNormalizer {
    fn default() -> Self {
        Self { country_code: DEFAULT_COUNTRY_CODE.to_string() }
    }
}

impl PhoneNormalizer {
    /// # Errors
    /// Returns `PhoneError::CountryCode` unless `country_code` is 1 to 3
    /// digits with a nonzero first digit. A leading `+` is accepted.
    pub fn new(country_code: &str) -> Result<Self, PhoneError> {
        let trimmed = country_code.trim();
        let code = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let valid = (1..=3).contains(&code.len())
            && code.chars().all(|c| c.is_ascii_digit())
            && !code.starts_with('0');
        if !valid {
            return Err(PhoneError::CountryCode);
        }
        Ok(Self { country_code: code.to_string() })
    }

    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Validates `input` and returns its E.164 form.
    ///
    /// Spaces, dashes, dots and parentheses are accepted as separators.
    /// Input starting with `+` (or the `00` international prefix) is taken
    /// as already international. Other input is national: a trunk `0` is
    /// dropped and the default calling code is prepended, unless the digits
    /// already start with that code and are long enough to carry it. The
    /// result must be 7 to 15 digits with a nonzero first digit.
    ///
    /// # Errors
    /// Returns `PhoneError::Empty` for blank input and `PhoneError::Malformed`
    /// when the digits do not fit the E.164 shape.
    pub fn normalize(&self, input: &str) -> Result<String, PhoneError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let compact: String = trimmed.chars().filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')')).collect();
        let candidate = if compact.starts_with('+') {
            compact
        } else if let Some(international) = compact.strip_prefix("00") {
            format!("+{international}")
        } else {
            let national = compact.strip_prefix('0').unwrap_or(&compact);
            if national.starts_with(&self.country_code) && national.len() >= self.country_code.len() + 10 {
                format!("+{national}")
            } else {
                format!("+{}{national}", self.country_code)
            }
        };

        if !E164_PATTERN.is_match(&candidate) {
            return Err(PhoneError::Malformed);
        }
        Ok(candidate)
    }
}

/// Normalizes with the default calling code.
///
/// # Errors
/// See [`PhoneNormalizer::normalize`].
pub fn normalize_e164(input: &str) -> Result<String, PhoneError> {
    PhoneNormalizer::default().normalize(input)
}

#[must_use]
pub fn is_valid_e164(input: &str) -> bool {
    normalize_e164(input).is_ok()
}

/// True when `phone` (already normalized) is present in `existing`.
#[must_use]
pub fn is_duplicate(existing: &[PhoneNumber], phone: &str) -> bool {
    existing.iter().any(|p| p.phone == phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_e164() {
        assert_eq!(normalize_e164("+14155550100").unwrap(), "+14155550100");
        assert_eq!(normalize_e164("  +44 20 7946 0958 ").unwrap(), "+442079460958");
    }

    #[test]
    fn test_national_input_gets_default_country_code() {
        assert_eq!(normalize_e164("(312) 555-0100").unwrap(), "+13125550100");
        assert_eq!(normalize_e164("312.555.0100").unwrap(), "+13125550100");
        assert_eq!(normalize_e164("1 312 555 0100").unwrap(), "+13125550100");
    }

    #[test]
    fn test_international_prefix_replaced_by_plus() {
        assert_eq!(normalize_e164("0044 20 7946 0958").unwrap(), "+442079460958");
    }

    #[test]
    fn test_configured_country_code() {
        let uk = PhoneNormalizer::new("+44").unwrap();

        assert_eq!(uk.country_code(), "44");
        assert_eq!(uk.normalize("020 7946 0958").unwrap(), "+442079460958");
        assert_eq!(uk.normalize("+1 312 555 0100").unwrap(), "+13125550100");
    }

    #[test]
    fn test_rejects_bad_country_codes() {
        assert_eq!(PhoneNormalizer::new(""), Err(PhoneError::CountryCode));
        assert_eq!(PhoneNormalizer::new("0"), Err(PhoneError::CountryCode));
        assert_eq!(PhoneNormalizer::new("1234"), Err(PhoneError::CountryCode));
        assert_eq!(PhoneNormalizer::new("4a"), Err(PhoneError::CountryCode));
    }

    #[test]
    fn test_rejects_short_and_long() {
        assert_eq!(normalize_e164("555"), Err(PhoneError::Malformed));
        assert_eq!(normalize_e164("+123456"), Err(PhoneError::Malformed));
        assert_eq!(normalize_e164("+1234567890123456"), Err(PhoneError::Malformed));
        assert!(is_valid_e164("+1234567"));
        assert!(is_valid_e164("+123456789012345"));
    }

    #[test]
    fn test_rejects_leading_zero_and_letters() {
        assert_eq!(normalize_e164("+0123456789"), Err(PhoneError::Malformed));
        assert_eq!(normalize_e164("+1415CALLNOW"), Err(PhoneError::Malformed));
        assert_eq!(normalize_e164("++14155550100"), Err(PhoneError::Malformed));
    }

    #[test]
    fn test_blank_is_empty() {
        assert_eq!(normalize_e164("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_duplicate_detection() {
        let existing = vec![PhoneNumber {
            id: "phone-01".to_string(),
            user_id: "u1".to_string(),
            name: "Primary".to_string(),
            phone: "+13125550100".to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }];

        assert!(is_duplicate(&existing, "+13125550100"));
        assert!(is_duplicate(&existing, &normalize_e164("(312) 555-0100").unwrap()));
        assert!(!is_duplicate(&existing, "+14155550100"));
    }
}
