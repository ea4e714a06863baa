//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the identifiers a swap case carries.
//! You cannot pass a [`PilotId`] where a [`CaseId`] is expected.
//!
//! Both are opaque strings assigned by external systems (the case store and
//! the crew directory), so validation is limited to rejecting blank values.
//! Surrounding whitespace is trimmed at construction.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of a swap case, assigned by the case store at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaseId(String);

impl CaseId {
    /// Create a case identifier, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCaseId`] if the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCaseId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CaseId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CaseId> for String {
    fn from(id: CaseId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a pilot in the crew directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PilotId(String);

impl PilotId {
    /// Create a pilot identifier, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPilotId`] if the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyPilotId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PilotId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PilotId> for String {
    fn from(id: PilotId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PilotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
