//! Feature Flag Aggregate
//!
//! A flag is built either fresh through [`Flag::new`], which validates every
//! guarded field, or from stored values through [`Flag::rehydrate`], which
//! trusts its input. After that, state only changes through the methods on
//! [`Flag`], and each successful change moves `updated_at` forward.

use crate::error::FlagResult;
use crate::validation::{validate_description, validate_key, validate_rollout};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Feature flag scoped to an environment.
///
/// Deserializing a `Flag` is a rehydration: stored data is trusted and is
/// not re-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// Storage identifier, `None` until an allocator assigns one
    id: Option<i64>,

    /// Owning environment
    env_id: i64,

    key: String,

    description: String,

    enabled: bool,

    /// Percentage (0-100)
    rollout: i64,

    created_at: DateTime<Utc>,

    updated_at: DateTime<Utc>,
}

impl Flag {
    /// Create a new, not yet persisted flag.
    ///
    /// Checks rollout, then description, then key, and returns the first
    /// failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagpole_features::{Flag, FlagError};
    ///
    /// let flag = Flag::new(1, 25, "new-checkout", "Staged checkout redesign", true).unwrap();
    /// assert_eq!(flag.id(), None);
    /// assert_eq!(flag.created_at(), flag.updated_at());
    ///
    /// let err = Flag::new(1, 101, "new-checkout", "", true).unwrap_err();
    /// assert_eq!(err, FlagError::InvalidRollout);
    /// ```
    pub fn new(
        env_id: i64,
        rollout: i64,
        key: impl Into<String>,
        description: impl Into<String>,
        enabled: bool,
    ) -> FlagResult<Self> {
        let key = key.into();
        let description = description.into();

        validate_rollout(rollout)?;
        validate_description(&description)?;
        validate_key(&key)?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            env_id,
            key,
            description,
            enabled,
            rollout,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a flag from previously persisted values.
    ///
    /// Never fails and runs no validation, so rows written under older,
    /// looser rules still load.
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: i64,
        env_id: i64,
        rollout: i64,
        key: impl Into<String>,
        description: impl Into<String>,
        enabled: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            env_id,
            key: key.into(),
            description: description.into(),
            enabled,
            rollout,
            created_at,
            updated_at,
        }
    }

    // ========== Mutations ==========

    /// Turn the flag on.
    pub fn enable(&mut self) {
        self.enabled = true;
        self.touch();
    }

    /// Turn the flag off.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.touch();
    }

    /// Replace the description. On error the flag is left untouched.
    pub fn set_description(&mut self, description: impl Into<String>) -> FlagResult<()> {
        let description = description.into();
        validate_description(&description)?;
        self.description = description;
        self.touch();
        Ok(())
    }

    /// Replace the key. On error the flag is left untouched.
    pub fn set_key(&mut self, key: impl Into<String>) -> FlagResult<()> {
        let key = key.into();
        validate_key(&key)?;
        self.key = key;
        self.touch();
        Ok(())
    }

    /// Replace the rollout percentage. On error the flag is left untouched.
    pub fn set_rollout(&mut self, rollout: i64) -> FlagResult<()> {
        validate_rollout(rollout)?;
        self.rollout = rollout;
        self.touch();
        Ok(())
    }

    // Clock reads can repeat or go backwards; updated_at must not. A stored
    // value already at DateTime::<Utc>::MAX_UTC saturates: mutations from
    // there on leave updated_at unchanged.
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at
                .checked_add_signed(Duration::nanoseconds(1))
                .unwrap_or(self.updated_at)
        };
    }

    // ========== Accessors ==========

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Whether the flag carries a storage identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn env_id(&self) -> i64 {
        self.env_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn rollout(&self) -> i64 {
        self.rollout
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlagError;
    use crate::validation::{MAX_DESCRIPTION_LENGTH, MAX_KEY_LENGTH};

    fn sample() -> Flag {
        Flag::new(1, 50, "feature-x", "some description", true).unwrap()
    }

    #[test]
    fn test_new_flag_echoes_inputs() {
        let flag = sample();

        assert_eq!(flag.id(), None);
        assert!(!flag.is_persisted());
        assert_eq!(flag.env_id(), 1);
        assert_eq!(flag.rollout(), 50);
        assert_eq!(flag.key(), "feature-x");
        assert_eq!(flag.description(), "some description");
        assert!(flag.is_enabled());
        assert_eq!(flag.created_at(), flag.updated_at());
        assert!(flag.created_at().timestamp() > 0);
    }

    #[test]
    fn test_validation_order() {
        let long_key = "k".repeat(MAX_KEY_LENGTH + 1);
        let long_description = "d".repeat(MAX_DESCRIPTION_LENGTH + 1);

        // rollout is checked before description and key
        assert_eq!(
            Flag::new(1, -5, long_key.clone(), long_description.clone(), false),
            Err(FlagError::InvalidRollout)
        );
        // description before key
        assert_eq!(
            Flag::new(1, 5, long_key.clone(), long_description, false),
            Err(FlagError::InvalidDescription)
        );
        assert_eq!(
            Flag::new(1, 5, long_key, "ok", false),
            Err(FlagError::InvalidKey)
        );
    }

    #[test]
    fn test_toggle_refreshes_updated_at() {
        let mut flag = sample();
        let created = flag.created_at();

        let before = flag.updated_at();
        flag.disable();
        assert!(!flag.is_enabled());
        assert!(flag.updated_at() > before);

        let before = flag.updated_at();
        flag.enable();
        assert!(flag.is_enabled());
        assert!(flag.updated_at() > before);

        // enabling an already enabled flag is still a successful mutation
        let before = flag.updated_at();
        flag.enable();
        assert!(flag.updated_at() > before);

        assert_eq!(flag.created_at(), created);
    }

    #[test]
    fn test_setters_apply_valid_values() {
        let mut flag = sample();

        let before = flag.updated_at();
        flag.set_key("feature-y").unwrap();
        assert_eq!(flag.key(), "feature-y");
        assert!(flag.updated_at() > before);

        let before = flag.updated_at();
        flag.set_description("").unwrap();
        assert_eq!(flag.description(), "");
        assert!(flag.updated_at() > before);

        let before = flag.updated_at();
        flag.set_rollout(100).unwrap();
        assert_eq!(flag.rollout(), 100);
        assert!(flag.updated_at() > before);

        flag.set_rollout(0).unwrap();
        assert_eq!(flag.rollout(), 0);
    }

    #[test]
    fn test_failed_setters_leave_flag_unchanged() {
        let mut flag = sample();
        let snapshot = flag.clone();

        assert_eq!(
            flag.set_key("k".repeat(MAX_KEY_LENGTH + 1)),
            Err(FlagError::InvalidKey)
        );
        assert_eq!(
            flag.set_description("d".repeat(MAX_DESCRIPTION_LENGTH + 1)),
            Err(FlagError::InvalidDescription)
        );
        assert_eq!(flag.set_rollout(101), Err(FlagError::InvalidRollout));
        assert_eq!(flag.set_rollout(-1), Err(FlagError::InvalidRollout));

        assert_eq!(flag, snapshot);
    }

    #[test]
    fn test_updated_at_advances_past_future_timestamp() {
        let created = Utc::now();
        let future = created + Duration::hours(1);
        let mut flag = Flag::rehydrate(9, 2, 10, "legacy", "", false, created, future);

        flag.enable();
        assert!(flag.updated_at() > future);
    }

    #[test]
    fn test_updated_at_saturates_at_max_timestamp() {
        let created = Utc::now();
        let mut flag =
            Flag::rehydrate(9, 2, 10, "legacy", "", false, created, DateTime::<Utc>::MAX_UTC);

        flag.enable();
        assert!(flag.is_enabled());
        assert_eq!(flag.updated_at(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_rehydrate_trusts_input() {
        let created = DateTime::<Utc>::from_timestamp(1_600_000_000, 0).unwrap();
        let updated = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let long_key = "k".repeat(MAX_KEY_LENGTH + 20);

        let flag = Flag::rehydrate(42, 7, 250, long_key.clone(), "legacy", true, created, updated);

        assert_eq!(flag.id(), Some(42));
        assert!(flag.is_persisted());
        assert_eq!(flag.env_id(), 7);
        assert_eq!(flag.rollout(), 250);
        assert_eq!(flag.key(), long_key);
        assert_eq!(flag.description(), "legacy");
        assert!(flag.is_enabled());
        assert_eq!(flag.created_at(), created);
        assert_eq!(flag.updated_at(), updated);
    }
}
