// ABOUTME: Validated slot (service) name following RFC 1123 label rules.
// ABOUTME: Provides colour-suffix and timestamp-suffix derivation for cutovers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum slot name length. Leaves no headroom for suffixes; derived names
/// are re-validated so an over-long result fails instead of truncating.
const MAX_LEN: usize = 63;

#[derive(Debug, Error)]
pub enum SlotNameError {
    #[error("slot name cannot be empty")]
    Empty,

    #[error("slot name '{0}' exceeds maximum length of 63 characters")]
    TooLong(String),

    #[error("slot name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("slot name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("slot name must be lowercase")]
    NotLowercase,

    #[error("invalid character in slot name: '{0}'")]
    InvalidChar(char),
}

/// The two colours used by the alternating-colour naming policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotColour {
    Blue,
    Green,
}

impl SlotColour {
    pub fn suffix(self) -> &'static str {
        match self {
            SlotColour::Blue => "blue",
            SlotColour::Green => "green",
        }
    }
}

/// A named deployment slot within a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotName(String);

impl SlotName {
    pub fn new(value: &str) -> Result<Self, SlotNameError> {
        if value.is_empty() {
            return Err(SlotNameError::Empty);
        }

        if value.len() > MAX_LEN {
            return Err(SlotNameError::TooLong(value.to_string()));
        }

        if value.starts_with('-') {
            return Err(SlotNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(SlotNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(SlotNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(SlotNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the coloured sibling of this name, e.g. `api` -> `api-blue`.
    pub fn coloured(&self, colour: SlotColour) -> Result<Self, SlotNameError> {
        Self::new(&format!("{}-{}", self.0, colour.suffix()))
    }

    /// Derive a timestamp-qualified name, used when an explicit target name
    /// resolves to a decommissioned slot whose identity must not be reused.
    pub fn timestamped(&self, at: DateTime<Utc>) -> Result<Self, SlotNameError> {
        Self::new(&format!("{}-{}", self.0, at.format("%Y%m%d%H%M%S")))
    }

}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SlotName {
    type Error = SlotNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SlotName> for String {
    fn from(name: SlotName) -> String {
        name.0
    }
}
