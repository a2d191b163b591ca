//! Ordered list of automations keyed by identity.

use crate::automation::Automation;
use crate::error::NotFoundError;
use crate::id::AutomationId;

/// The automations visible in one view, in backend order.
///
/// Holds at most one record per [`AutomationId`]. Replacing a record keeps
/// its position; removing one shifts later records up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomationList {
    items: Vec<Automation>,
}

impl AutomationList {
    /// Build a list from a backend snapshot.
    ///
    /// Returns the list together with the records dropped because an earlier
    /// record already carried the same identity (first occurrence wins).
    #[must_use]
    pub fn from_snapshot(snapshot: Vec<Automation>) -> (Self, Vec<Automation>) {
        let mut items: Vec<Automation> = Vec::with_capacity(snapshot.len());
        let mut duplicates = Vec::new();
        for automation in snapshot {
            if items.iter().any(|existing| existing.id == automation.id) {
                duplicates.push(automation);
            } else {
                items.push(automation);
            }
        }
        (Self { items }, duplicates)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Automation] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Automation> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &AutomationId) -> Option<&Automation> {
        self.items.iter().find(|a| &a.id == id)
    }

    #[must_use]
    pub fn position(&self, id: &AutomationId) -> Option<usize> {
        self.items.iter().position(|a| &a.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &AutomationId) -> bool {
        self.position(id).is_some()
    }

    /// Remove the record with `id`, returning it when it was present.
    pub fn remove(&mut self, id: &AutomationId) -> Option<Automation> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Replace the record sharing `updated`'s identity, in place.
    ///
    /// Returns the previous record.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no record carries that identity; the
    /// list is left untouched.
    pub fn replace(&mut self, updated: Automation) -> Result<Automation, NotFoundError> {
        let Some(index) = self.position(&updated.id) else {
            return Err(NotFoundError {
                entity: "Automation",
                id: updated.id.to_string(),
            });
        };
        Ok(std::mem::replace(&mut self.items[index], updated))
    }
}

impl<'a> IntoIterator for &'a AutomationList {
    type Item = &'a Automation;
    type IntoIter = std::slice::Iter<'a, Automation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
