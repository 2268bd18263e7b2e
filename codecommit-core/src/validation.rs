//! Static constraints on a desired record, checked before any remote call.
//!
//! Lengths are counted in characters, not bytes. Values are never truncated.

use crate::error::ReconcileError;
use crate::schema::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::types::{Field, RepositoryConfig};

/// Validate every constrained field, returning the first violation.
pub fn validate(config: &RepositoryConfig) -> Result<(), ReconcileError> {
    check_len(Field::RepositoryName, config.name.as_str(), MAX_NAME_LEN)?;
    if let Some(description) = &config.description {
        check_len(Field::Description, description, MAX_DESCRIPTION_LEN)?;
    }
    Ok(())
}

fn check_len(field: Field, value: &str, max: usize) -> Result<(), ReconcileError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ReconcileError::Validation { field, actual, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_at_limit_is_accepted() {
        let cfg = RepositoryConfig::new("a".repeat(100));
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn name_over_limit_reports_field_and_length() {
        let cfg = RepositoryConfig::new("a".repeat(101));
        match validate(&cfg).unwrap_err() {
            ReconcileError::Validation { field, actual, max } => {
                assert_eq!(field, Field::RepositoryName);
                assert_eq!(actual, 101);
                assert_eq!(max, 100);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn multibyte_characters_count_once() {
        // 100 characters, 300 bytes.
        let cfg = RepositoryConfig::new("日".repeat(100));
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn absent_description_is_valid() {
        assert!(validate(&RepositoryConfig::new("r")).is_ok());
    }

    #[test]
    fn name_is_checked_before_description() {
        let cfg = RepositoryConfig::new("n".repeat(150)).with_description("d".repeat(2000));
        assert!(matches!(
            validate(&cfg),
            Err(ReconcileError::Validation { field: Field::RepositoryName, .. })
        ));
    }
}
