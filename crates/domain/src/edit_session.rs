//! Edit session: which automation, if any, is open in the edit form.
//!
//! ```text
//! Closed ──open(r)──▶ Editing(r) ──close / confirmed update──▶ Closed
//!                         │
//!                         └──open(r')──▶ Editing(r')   (draft of r is discarded)
//! ```

use crate::automation::{Automation, AutomationChanges};
use crate::id::AutomationId;

/// The exclusive, single-record editing state of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Closed,
    Editing {
        /// The record as it was when the form opened.
        original: Automation,
        /// Unsaved field values, seeded from `original`.
        draft: AutomationChanges,
    },
}

impl EditSession {
    /// Open the form on `record`.
    ///
    /// Any session already open is discarded together with its draft, which
    /// is returned so callers can report what was dropped.
    pub fn open(&mut self, record: Automation) -> Option<Automation> {
        let draft = AutomationChanges::from_automation(&record);
        let previous = std::mem::replace(
            self,
            Self::Editing {
                original: record,
                draft,
            },
        );
        previous.into_original()
    }

    /// Close the form, returning the record that was being edited.
    pub fn close(&mut self) -> Option<Automation> {
        std::mem::take(self).into_original()
    }

    /// Close the form only if it is editing `id`.
    pub fn close_if_editing(&mut self, id: &AutomationId) -> bool {
        if self.is_editing(id) {
            *self = Self::Closed;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    #[must_use]
    pub fn is_editing(&self, id: &AutomationId) -> bool {
        self.original().is_some_and(|original| &original.id == id)
    }

    #[must_use]
    pub fn original(&self) -> Option<&Automation> {
        match self {
            Self::Closed => None,
            Self::Editing { original, .. } => Some(original),
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&AutomationChanges> {
        match self {
            Self::Closed => None,
            Self::Editing { draft, .. } => Some(draft),
        }
    }

    /// Mutable access to the unsaved values, if a session is open.
    pub fn draft_mut(&mut self) -> Option<&mut AutomationChanges> {
        match self {
            Self::Closed => None,
            Self::Editing { draft, .. } => Some(draft),
        }
    }

    fn into_original(self) -> Option<Automation> {
        match self {
            Self::Closed => None,
            Self::Editing { original, .. } => Some(original),
        }
    }
}
