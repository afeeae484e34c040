use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::UserProfile;

pub const NAME_MIN_CHARS: usize = 2;
pub const BIO_MIN_CHARS: usize = 10;
pub const SKILLS_MIN_CHARS: usize = 5;

/// A single inline error, shown next to the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

const RULES: &[(&str, usize, &str)] = &[
    ("name", NAME_MIN_CHARS, "Name is required"),
    ("bio", BIO_MIN_CHARS, "Bio should be at least 10 characters"),
    ("skills", SKILLS_MIN_CHARS, "Enter at least one skill"),
];

/// Checks the minimum-length rules for every field and collects all failures.
///
/// Lengths are counted in characters after trimming surrounding whitespace,
/// so a name of two spaces is rejected.
pub fn validate_profile(profile: &UserProfile) -> Vec<FieldError> {
    RULES
        .iter()
        .filter_map(|&(field, min, message)| {
            let value = match field {
                "name" => &profile.name,
                "bio" => &profile.bio,
                _ => &profile.skills,
            };
            (value.trim().chars().count() < min).then(|| FieldError {
                field: field.to_string(),
                message: message.to_string(),
            })
        })
        .collect()
}

/// `validate_profile` as a `Result`, for handlers that short-circuit with `?`.
pub fn ensure_valid(profile: &UserProfile) -> Result<(), AppError> {
    let errors = validate_profile(profile);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, bio: &str, skills: &str) -> UserProfile {
        UserProfile {
            name: name.to_string(),
            bio: bio.to_string(),
            skills: skills.to_string(),
            resume: None,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        let p = profile("Al", "Short bio text here", "Go, Rust");
        assert!(validate_profile(&p).is_empty());
        assert!(ensure_valid(&p).is_ok());
    }

    #[test]
    fn test_all_three_fields_reported() {
        let errors = validate_profile(&profile("A", "x", "x"));
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "bio", "skills"]);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert!(validate_profile(&profile("Jo", "0123456789", "Go, C")).is_empty());
        assert_eq!(validate_profile(&profile("Jo", "012345678", "Go, C")).len(), 1);
        assert_eq!(validate_profile(&profile("Jo", "0123456789", "Go,C")).len(), 1);
    }

    #[test]
    fn test_whitespace_does_not_count() {
        let errors = validate_profile(&profile("   A   ", "Short bio text here", "Go, Rust"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Two characters, three bytes
        assert!(validate_profile(&profile("Zö", "Short bio text here", "Go, Rust")).is_empty());
        assert_eq!(validate_profile(&profile("é", "Short bio text here", "Go, Rust")).len(), 1);
    }

    #[test]
    fn test_ensure_valid_returns_validation_error() {
        match ensure_valid(&profile("", "", "")) {
            Err(AppError::Validation(fields)) => assert_eq!(fields.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
