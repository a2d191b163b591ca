//! Editable fields of an automation, as produced by the edit form.

use serde::{Deserialize, Serialize};

use super::{Automation, AutomationStatus};
use crate::error::{PanelError, ValidationError};

/// The set of fields a user may change on an existing automation.
///
/// Identity and timestamps are deliberately absent: they belong to the
/// backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationChanges {
    pub name: String,
    pub description: String,
    pub status: AutomationStatus,
}

impl AutomationChanges {
    /// Seed a change set with the current values of `automation`.
    #[must_use]
    pub fn from_automation(automation: &Automation) -> Self {
        Self {
            name: automation.name.clone(),
            description: automation.description.clone(),
            status: automation.status.clone(),
        }
    }

    /// Check the fields a backend would reject outright.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] when `name` or `status` is blank.
    pub fn validate(&self) -> Result<(), PanelError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.status.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyStatus.into());
        }
        Ok(())
    }

    /// Produce the record `automation` would become with these changes,
    /// keeping identity and timestamps.
    #[must_use]
    pub fn apply_to(&self, automation: &Automation) -> Automation {
        Automation {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            ..automation.clone()
        }
    }
}
