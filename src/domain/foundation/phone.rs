//! Phone number validation and normalization.
//!
//! Wraps the `phonenumber` crate behind a validator that never surfaces a
//! parse error: a string that does not parse as a dialable number is simply
//! invalid. The validator gates every outbound call and every directory
//! write, so malformed numbers are rejected at the edges rather than deep
//! in the call flow.

use phonenumber::country;
use phonenumber::Mode;

/// Validates and normalizes phone numbers against an optional default region.
///
/// With a default region, national-format numbers are accepted; without one,
/// numbers must be self-describing international format (`+...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneNumberValidator {
    default_region: Option<country::Id>,
}

impl PhoneNumberValidator {
    pub fn new(default_region: Option<country::Id>) -> Self {
        Self { default_region }
    }

    /// Returns true only for structurally valid, assignable numbers.
    ///
    /// Deterministic, no side effects; parse failure is a normal `false`.
    pub fn validate(&self, raw: &str) -> bool {
        match phonenumber::parse(self.default_region, raw) {
            Ok(number) => phonenumber::is_valid(&number),
            Err(_) => false,
        }
    }

    /// E.164 rendering of a valid number, `None` when invalid.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let number = phonenumber::parse(self.default_region, raw).ok()?;
        if !phonenumber::is_valid(&number) {
            return None;
        }
        Some(number.format().mode(Mode::E164).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn br_validator() -> PhoneNumberValidator {
        PhoneNumberValidator::new(Some(country::BR))
    }

    #[test]
    fn valid_international_number_passes() {
        assert!(br_validator().validate("+5511999999999"));
    }

    #[test]
    fn valid_national_number_passes_with_region() {
        assert!(br_validator().validate("11 99999-9999"));
    }

    #[test]
    fn national_number_fails_without_region() {
        let validator = PhoneNumberValidator::new(None);
        assert!(!validator.validate("11 99999-9999"));
    }

    #[test]
    fn international_number_passes_without_region() {
        let validator = PhoneNumberValidator::new(None);
        assert!(validator.validate("+5511999999999"));
    }

    #[test]
    fn malformed_strings_fail() {
        let validator = br_validator();
        assert!(!validator.validate(""));
        assert!(!validator.validate("123"));
        assert!(!validator.validate("not a number"));
        assert!(!validator.validate("+"));
    }

    #[test]
    fn normalize_yields_e164() {
        let validator = br_validator();
        assert_eq!(
            validator.normalize("11 99999-9999").as_deref(),
            Some("+5511999999999")
        );
        assert_eq!(validator.normalize("123"), None);
    }

    proptest! {
        // The validator must never panic, whatever the input looks like.
        #[test]
        fn validate_never_panics(raw in "\\PC*") {
            let _ = br_validator().validate(&raw);
            let _ = PhoneNumberValidator::new(None).validate(&raw);
        }
    }
}
