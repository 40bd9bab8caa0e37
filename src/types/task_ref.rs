// ABOUTME: Opaque reference to a registered task definition revision.
// ABOUTME: Assigned by the control plane; never parsed, only passed back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one immutable task definition revision, e.g. `api:7`.
/// The format is owned by the control plane and treated as opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDefinitionRef(String);

impl TaskDefinitionRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDefinitionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskDefinitionRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
