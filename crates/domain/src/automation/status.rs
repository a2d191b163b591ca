//! Lifecycle status of an automation.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const ACTIVE: &str = "active";

/// Lifecycle status reported by the backend.
///
/// Only `active` carries meaning on the client (it is rendered distinctly);
/// every other value is preserved verbatim so it round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AutomationStatus {
    #[default]
    Active,
    Other(String),
}

impl AutomationStatus {
    /// Whether this is the `active` status.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => ACTIVE,
            Self::Other(value) => value,
        }
    }
}

impl From<String> for AutomationStatus {
    fn from(value: String) -> Self {
        if value == ACTIVE {
            Self::Active
        } else {
            Self::Other(value)
        }
    }
}

impl From<&str> for AutomationStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<AutomationStatus> for String {
    fn from(status: AutomationStatus) -> Self {
        match status {
            AutomationStatus::Active => ACTIVE.to_string(),
            AutomationStatus::Other(value) => value,
        }
    }
}

impl FromStr for AutomationStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for AutomationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
