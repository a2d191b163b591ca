//! Automation: a named, stateful job definition managed by the backend.
//!
//! The client never invents automations: every [`Automation`] it holds was
//! produced by the backend, either in the initial snapshot or as the
//! confirmed result of an update.

mod changes;
mod status;

pub use changes::AutomationChanges;
pub use status::AutomationStatus;

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, ValidationError};
use crate::id::AutomationId;
use crate::time::{self, Timestamp};

/// A job definition as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automation {
    #[serde(rename = "automation_id")]
    pub id: AutomationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: AutomationStatus,
    #[serde(with = "time::flexible")]
    pub created_at: Timestamp,
    #[serde(with = "time::flexible")]
    pub updated_at: Timestamp,
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] when `name` is empty
    /// ([`ValidationError::EmptyName`]).
    pub fn validate(&self) -> Result<(), PanelError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    name: Option<String>,
    description: Option<String>,
    status: Option<AutomationStatus>,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<AutomationStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    #[must_use]
    pub fn updated_at(mut self, ts: Timestamp) -> Self {
        self.updated_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return an [`Automation`].
    ///
    /// Missing timestamps default to now; `updated_at` defaults to
    /// `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] if the id is missing or the name
    /// is empty.
    pub fn build(self) -> Result<Automation, PanelError> {
        let id = self.id.ok_or(ValidationError::EmptyId)?;
        let created_at = self.created_at.unwrap_or_else(time::now);
        let automation = Automation {
            id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        };
        automation.validate()?;
        Ok(automation)
    }
}
