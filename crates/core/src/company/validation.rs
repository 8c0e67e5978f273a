//! Company profile rules.

use super::error::CompanyError;
use super::types::CompanyProfile;

/// Maximum company name length.
pub const NAME_MAX: usize = 200;
/// Maximum description length.
pub const DESCRIPTION_MAX: usize = 1000;
/// Maximum address length.
pub const ADDRESS_MAX: usize = 500;
/// Maximum phone length.
pub const PHONE_MAX: usize = 20;
/// Maximum website length.
pub const WEBSITE_MAX: usize = 255;

/// Trims and validates an INN.
///
/// Legal entities have 10 digits, sole proprietors 12.
///
/// # Errors
///
/// Returns `CompanyError::InvalidInn` if the trimmed value is not all digits
/// or has the wrong length.
pub fn normalize_inn(raw: &str) -> Result<String, CompanyError> {
    let inn = raw.trim();
    let all_digits = !inn.is_empty() && inn.bytes().all(|b| b.is_ascii_digit());
    if !all_digits || !matches!(inn.len(), 10 | 12) {
        return Err(CompanyError::InvalidInn);
    }
    Ok(inn.to_string())
}

/// Validates a company name.
///
/// # Errors
///
/// Returns `CompanyError::InvalidName` if the name is blank or too long.
pub fn validate_name(name: &str) -> Result<(), CompanyError> {
    let len = name.chars().count();
    if name.trim().is_empty() || len > NAME_MAX {
        return Err(CompanyError::InvalidName { max: NAME_MAX });
    }
    Ok(())
}

/// Validates a full profile and normalizes its INN in place.
///
/// # Errors
///
/// Returns the first rule the profile breaks.
pub fn validate_profile(profile: &mut CompanyProfile) -> Result<(), CompanyError> {
    validate_name(&profile.name)?;
    profile.inn = normalize_inn(&profile.inn)?;
    validate_optional_fields(
        profile.description.as_deref(),
        profile.address.as_deref(),
        profile.phone.as_deref(),
        profile.website.as_deref(),
    )
}

/// Checks length limits of the optional profile fields.
///
/// # Errors
///
/// Returns `CompanyError::FieldTooLong` for the first field over its limit.
pub fn validate_optional_fields(
    description: Option<&str>,
    address: Option<&str>,
    phone: Option<&str>,
    website: Option<&str>,
) -> Result<(), CompanyError> {
    let limits = [
        ("description", description, DESCRIPTION_MAX),
        ("address", address, ADDRESS_MAX),
        ("phone", phone, PHONE_MAX),
        ("website", website, WEBSITE_MAX),
    ];
    for (field, value, max) in limits {
        if value.is_some_and(|v| v.chars().count() > max) {
            return Err(CompanyError::FieldTooLong { field, max });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::{CompanySize, Industry};
    use rstest::rstest;

    #[rstest]
    #[case("7707083893", "7707083893")]
    #[case("  500100732259 ", "500100732259")]
    fn test_valid_inn(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_inn(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("123456789")]
    #[case("12345678901")]
    #[case("1234567890123")]
    #[case("77070838a3")]
    #[case("7707 083893")]
    #[case("７７０７０８３８９３")]
    fn test_invalid_inn(#[case] raw: &str) {
        assert_eq!(normalize_inn(raw), Err(CompanyError::InvalidInn));
    }

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("ООО Ромашка").is_ok());
        assert!(validate_name(&"я".repeat(200)).is_ok());
        assert!(validate_name(&"я".repeat(201)).is_err());
        assert!(validate_name("  ").is_err());
    }

    #[test]
    fn test_validate_profile_normalizes_inn() {
        let mut profile = CompanyProfile {
            name: "Acme".to_string(),
            inn: " 7707083893 ".to_string(),
            industry: Industry::It,
            size: CompanySize::default(),
            description: None,
            address: None,
            phone: Some("+7 495 000-00-00".to_string()),
            website: None,
        };

        validate_profile(&mut profile).unwrap();

        assert_eq!(profile.inn, "7707083893");
        assert_eq!(profile.size, CompanySize::Small);
    }

    #[test]
    fn test_long_phone_rejected() {
        assert_eq!(
            validate_optional_fields(None, None, Some(&"1".repeat(21)), None),
            Err(CompanyError::FieldTooLong {
                field: "phone",
                max: 20
            })
        );
    }

    #[test]
    fn test_enum_string_round_trip() {
        assert_eq!("it".parse::<Industry>(), Ok(Industry::It));
        assert_eq!(Industry::Construction.to_string(), "construction");
        assert_eq!("medium".parse::<CompanySize>(), Ok(CompanySize::Medium));
        assert_eq!(
            "huge".parse::<CompanySize>(),
            Err(CompanyError::UnknownSize("huge".to_string()))
        );
    }
}
