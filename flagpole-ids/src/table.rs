//! Table names: the namespaces identifiers are allocated in.

use crate::error::{AllocationError, AllocationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic name of an entity category, e.g. `flags`.
///
/// Each table owns an independent identifier space.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Table that stores feature flags.
    pub const FLAGS: &'static str = "flags";

    /// Create a table name. Surrounding whitespace is trimmed and empty
    /// names are rejected.
    ///
    /// ```
    /// use flagpole_ids::TableName;
    ///
    /// let table = TableName::new(" flags ").unwrap();
    /// assert_eq!(table.as_str(), "flags");
    /// assert!(TableName::new("   ").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> AllocationResult<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AllocationError::InvalidTable(name));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The `flags` table.
    pub fn flags() -> Self {
        Self(Self::FLAGS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TableName {
    type Error = AllocationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for TableName {
    type Error = AllocationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableName> for String {
    fn from(table: TableName) -> Self {
        table.0
    }
}
