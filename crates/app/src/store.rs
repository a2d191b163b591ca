//! Resource list store: the session's authoritative view of automations.
//!
//! Backed by a tokio [`watch`] channel: every effective mutation bumps the
//! channel version so subscribed views know to re-render. Mutations that
//! leave the list unchanged do not notify.

use std::sync::Arc;

use tokio::sync::watch;

use autopanel_domain::automation::Automation;
use autopanel_domain::automation_list::AutomationList;
use autopanel_domain::id::AutomationId;

/// In-memory list of automations for one view.
///
/// Cloning yields another handle to the same list.
#[derive(Clone)]
pub struct ResourceListStore {
    state: Arc<watch::Sender<AutomationList>>,
}

impl ResourceListStore {
    /// Seed the store from the backend snapshot.
    ///
    /// This is the only way to populate a store; there is no re-sync.
    #[must_use]
    pub fn initialize(snapshot: Vec<Automation>) -> Self {
        let (list, duplicates) = AutomationList::from_snapshot(snapshot);
        for duplicate in &duplicates {
            tracing::warn!(
                automation_id = %duplicate.id,
                "snapshot repeats an automation id, keeping the first record"
            );
        }
        tracing::debug!(count = list.len(), "automation list initialized");
        let (sender, _) = watch::channel(list);
        Self {
            state: Arc::new(sender),
        }
    }

    /// Remove the automation with `id`.
    ///
    /// Absent ids are a no-op. Returns whether a record was removed.
    pub fn remove(&self, id: &AutomationId) -> bool {
        let removed = self.state.send_if_modified(|list| list.remove(id).is_some());
        if removed {
            tracing::debug!(automation_id = %id, "automation removed from list");
        } else {
            tracing::debug!(automation_id = %id, "automation already absent from list");
        }
        removed
    }

    /// Replace the automation sharing `updated`'s identity, keeping its
    /// position.
    ///
    /// An unknown identity is a caller error: it is logged and ignored, the
    /// list never grows. Returns whether a record was replaced.
    pub fn replace(&self, updated: Automation) -> bool {
        let id = updated.id.clone();
        let mut outcome = Ok(());
        self.state.send_if_modified(|list| match list.replace(updated) {
            Ok(_) => true,
            Err(err) => {
                outcome = Err(err);
                false
            }
        });
        match outcome {
            Ok(()) => {
                tracing::debug!(automation_id = %id, "automation replaced in list");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring replacement for unknown automation");
                false
            }
        }
    }

    /// Copy of the current list, in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Automation> {
        self.state.borrow().as_slice().to_vec()
    }

    /// Run `f` against the current list without copying it.
    pub fn read<R>(&self, f: impl FnOnce(&AutomationList) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Copy of one automation.
    #[must_use]
    pub fn get(&self, id: &AutomationId) -> Option<Automation> {
        self.state.borrow().get(id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &AutomationId) -> bool {
        self.state.borrow().contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }

    /// Subscribe to list changes.
    ///
    /// The receiver sees the current list immediately and is woken after
    /// each effective mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AutomationList> {
        self.state.subscribe()
    }
}
