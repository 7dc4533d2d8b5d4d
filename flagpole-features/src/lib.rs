//! Feature Flags for Flagpole
//!
//! The flag aggregate and the field rules that guard it.
//!
//! # Quick Start
//!
//! ```
//! use flagpole_features::*;
//!
//! let mut flag = Flag::new(1, 10, "new-ui", "Redesigned dashboard", false)?;
//!
//! // Widen the rollout and switch it on
//! flag.set_rollout(50)?;
//! flag.enable();
//!
//! // Invalid input is rejected and nothing changes
//! assert_eq!(flag.set_rollout(150), Err(FlagError::InvalidRollout));
//! assert_eq!(flag.rollout(), 50);
//! # Ok::<(), FlagError>(())
//! ```
//!
//! # Loading Stored Flags
//!
//! ```
//! use flagpole_features::Flag;
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let flag = Flag::rehydrate(12, 1, 75, "new-ui", "Redesigned dashboard", true, now, now);
//! assert_eq!(flag.id(), Some(12));
//! ```

pub mod error;
pub mod flag;
pub mod validation;

pub use error::{FlagError, FlagResult};
pub use flag::Flag;
pub use validation::{
    MAX_DESCRIPTION_LENGTH, MAX_KEY_LENGTH, MAX_ROLLOUT, MIN_ROLLOUT, validate_description,
    validate_key, validate_rollout,
};
