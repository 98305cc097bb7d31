//! Shared value types for archivotron.
//!
//! Attribute names end up embedded in rendered file-system paths, so they are validated once
//! at the boundary and carried as [`AttributeName`] from then on.

use std::borrow::Borrow;

/// Errors that can occur when creating an [`AttributeName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// The input was empty
    #[error("attribute name cannot be empty")]
    Empty,
    /// The input contained whitespace
    #[error("attribute name {0:?} contains whitespace")]
    Whitespace(String),
    /// The input contained a path separator
    #[error("attribute name {0:?} contains a path separator")]
    Separator(String),
}

/// An attribute name that is safe to embed in a path.
///
/// Guarantees the name is non-empty and contains neither whitespace nor one of the two
/// path-separator characters (`/` and `\`). Unlike free text, the input is **not** trimmed:
/// `" sub"` is rejected rather than silently becoming `"sub"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeName(String);

impl AttributeName {
    /// Creates a new `AttributeName` from the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(AttributeName)` if the input is a valid name, or the matching
    /// [`NameError`] otherwise.
    pub fn new(input: impl AsRef<str>) -> Result<Self, NameError> {
        let name = input.as_ref();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(NameError::Whitespace(name.to_owned()));
        }
        if name.contains(['/', '\\']) {
            return Err(NameError::Separator(name.to_owned()));
        }
        Ok(Self(name.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name and returns the inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AttributeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AttributeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AttributeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for AttributeName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for AttributeName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for AttributeName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AttributeName::new(&s).map_err(serde::de::Error::custom)
    }
}
