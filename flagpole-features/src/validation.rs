//! Field rules for flags.
//!
//! Lengths are counted in Unicode scalar values, so `"ü"` counts as one
//! character even though it takes two bytes.

use crate::error::{FlagError, FlagResult};

/// Maximum key length in characters.
pub const MAX_KEY_LENGTH: usize = 100;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Lowest accepted rollout percentage.
pub const MIN_ROLLOUT: i64 = 0;

/// Highest accepted rollout percentage.
pub const MAX_ROLLOUT: i64 = 100;

/// Check that `rollout` lies in `[MIN_ROLLOUT, MAX_ROLLOUT]`.
pub fn validate_rollout(rollout: i64) -> FlagResult<()> {
    if (MIN_ROLLOUT..=MAX_ROLLOUT).contains(&rollout) {
        Ok(())
    } else {
        Err(FlagError::InvalidRollout)
    }
}

/// Check that `key` is at most `MAX_KEY_LENGTH` characters.
pub fn validate_key(key: &str) -> FlagResult<()> {
    if key.chars().count() > MAX_KEY_LENGTH {
        return Err(FlagError::InvalidKey);
    }
    Ok(())
}

/// Check that `description` is at most `MAX_DESCRIPTION_LENGTH` characters.
pub fn validate_description(description: &str) -> FlagResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(FlagError::InvalidDescription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollout_bounds_are_inclusive() {
        assert!(validate_rollout(0).is_ok());
        assert!(validate_rollout(50).is_ok());
        assert!(validate_rollout(100).is_ok());
        assert_eq!(validate_rollout(-1), Err(FlagError::InvalidRollout));
        assert_eq!(validate_rollout(101), Err(FlagError::InvalidRollout));
        assert_eq!(validate_rollout(i64::MIN), Err(FlagError::InvalidRollout));
    }

    #[test]
    fn test_key_length_limit() {
        assert!(validate_key("").is_ok());
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH)).is_ok());
        assert_eq!(
            validate_key(&"x".repeat(MAX_KEY_LENGTH + 1)),
            Err(FlagError::InvalidKey)
        );
    }

    #[test]
    fn test_description_length_limit() {
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_LENGTH)).is_ok());
        assert_eq!(
            validate_description(&"d".repeat(MAX_DESCRIPTION_LENGTH + 1)),
            Err(FlagError::InvalidDescription)
        );
    }

    #[test]
    fn test_multibyte_characters_count_once() {
        // 100 chars but 200 bytes
        let key = "é".repeat(MAX_KEY_LENGTH);
        assert_eq!(key.len(), MAX_KEY_LENGTH * 2);
        assert!(validate_key(&key).is_ok());

        // 4-byte scalars
        let description = "🚩".repeat(MAX_DESCRIPTION_LENGTH);
        assert!(validate_description(&description).is_ok());
        assert_eq!(
            validate_description(&format!("{description}🚩")),
            Err(FlagError::InvalidDescription)
        );
    }
}
