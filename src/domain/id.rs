use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of an entity within a single harness.
///
/// Identifiers are free-form but never empty, and are compared as plain
/// strings. They can be borrowed as `&str`, so maps keyed by `EntityId` are
/// queried with ordinary string slices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(NonEmptyString);

impl EntityId {
    /// Creates a new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyIdError`] if the string is empty.
    pub fn new(s: impl Into<String>) -> Result<Self, EmptyIdError> {
        NonEmptyString::new(s.into())
            .map(Self)
            .map_err(|_| EmptyIdError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Error returned when an identifier is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("entity identifiers must not be empty")]
pub struct EmptyIdError;

impl TryFrom<String> for EntityId {
    type Error = EmptyIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EntityId {
    type Error = EmptyIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for EntityId {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Deref for EntityId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn empty_identifiers_are_rejected() {
        assert_eq!(EntityId::new(""), Err(EmptyIdError));
        assert!("".parse::<EntityId>().is_err());
    }

    #[test]
    fn maps_can_be_queried_by_str() {
        let mut map = HashMap::new();
        map.insert(EntityId::new("W1").unwrap(), 3);
        assert_eq!(map.get("W1"), Some(&3));
    }

    #[test]
    fn deserializing_empty_string_fails() {
        assert!(serde_yaml::from_str::<EntityId>("''").is_err());
        let id: EntityId = serde_yaml::from_str("C1").unwrap();
        assert_eq!(id.as_str(), "C1");
    }
}
