//! Registry of automations with a mutation awaiting the backend.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use autopanel_domain::id::AutomationId;

/// Set of identities with a pending delete or update.
///
/// At most one mutation per identity may be in flight. Cloning yields
/// another handle to the same set.
#[derive(Clone, Default)]
pub struct InFlight {
    ids: Arc<Mutex<HashSet<AutomationId>>>,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id` for a mutation.
    ///
    /// Returns `None` when another mutation already holds it. The claim is
    /// released when the returned guard is dropped.
    #[must_use]
    pub fn try_acquire(&self, id: &AutomationId) -> Option<InFlightGuard> {
        if !lock(&self.ids).insert(id.clone()) {
            return None;
        }
        Some(InFlightGuard {
            ids: Arc::clone(&self.ids),
            id: id.clone(),
        })
    }

    #[must_use]
    pub fn contains(&self, id: &AutomationId) -> bool {
        lock(&self.ids).contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.ids).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.ids).is_empty()
    }
}

/// Claim on one identity; releases it on drop.
pub struct InFlightGuard {
    ids: Arc<Mutex<HashSet<AutomationId>>>,
    id: AutomationId,
}

impl InFlightGuard {
    #[must_use]
    pub fn id(&self) -> &AutomationId {
        &self.id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.ids).remove(&self.id);
    }
}

// The set stays consistent even if a holder panicked mid-operation.
fn lock(ids: &Mutex<HashSet<AutomationId>>) -> MutexGuard<'_, HashSet<AutomationId>> {
    ids.lock().unwrap_or_else(PoisonError::into_inner)
}
