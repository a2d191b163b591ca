//! Automation panel: the use-cases behind the automation table.
//!
//! Owns the list store, the mutation dispatcher and the edit session for one
//! view. Every user action resolves to an [`ActionOutcome`]; failures are
//! logged and pushed as notices, never propagated.

use tokio::sync::{broadcast, watch};

use autopanel_domain::automation::{Automation, AutomationChanges};
use autopanel_domain::automation_list::AutomationList;
use autopanel_domain::edit_session::EditSession;
use autopanel_domain::error::PanelError;
use autopanel_domain::id::AutomationId;

use crate::notices::{Notice, Notifier};
use crate::ports::{AutomationGateway, EditForm};
use crate::services::mutation_dispatcher::{Dispatch, MutationDispatcher};
use crate::store::ResourceListStore;
use crate::view::{self, AutomationRow};

/// Result of a user action on the panel.
#[derive(Debug)]
pub enum ActionOutcome {
    /// The backend confirmed and local state follows it.
    Applied,
    /// A mutation for the same automation is still pending.
    Busy,
    /// Nothing to do (no edit session open).
    Ignored,
    /// The backend did not confirm; local state is unchanged.
    Failed(PanelError),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Automation table state for one view.
pub struct AutomationPanel<G, F> {
    dispatcher: MutationDispatcher<G>,
    form: F,
    session: watch::Sender<EditSession>,
    notifier: Notifier,
}

impl<G: AutomationGateway, F: EditForm> AutomationPanel<G, F> {
    /// Build the panel from the snapshot handed over by the host.
    pub fn new(automations_data: Vec<Automation>, gateway: G, form: F) -> Self {
        let store = ResourceListStore::initialize(automations_data);
        let (session, _) = watch::channel(EditSession::Closed);
        Self {
            dispatcher: MutationDispatcher::new(gateway, store),
            form,
            session,
            notifier: Notifier::default(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &ResourceListStore {
        self.dispatcher.store()
    }

    #[must_use]
    pub fn automations(&self) -> Vec<Automation> {
        self.store().snapshot()
    }

    /// Display rows for the current list.
    #[must_use]
    pub fn rows(&self) -> Vec<AutomationRow> {
        self.store().read(view::rows)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AutomationList> {
        self.store().subscribe()
    }

    #[must_use]
    pub fn subscribe_session(&self) -> watch::Receiver<EditSession> {
        self.session.subscribe()
    }

    #[must_use]
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notifier.subscribe()
    }

    /// Current edit session.
    #[must_use]
    pub fn session(&self) -> EditSession {
        self.session.borrow().clone()
    }

    #[must_use]
    pub fn is_pending(&self, id: &AutomationId) -> bool {
        self.dispatcher.is_pending(id)
    }

    /// Delete an automation once the backend confirms.
    ///
    /// A confirmed delete of the record being edited also closes the form.
    pub async fn delete(&self, id: &AutomationId) -> ActionOutcome {
        match self.dispatcher.delete(id).await {
            Ok(Dispatch::Applied(())) => {
                self.session.send_if_modified(|session| session.close_if_editing(id));
                ActionOutcome::Applied
            }
            Ok(Dispatch::Busy) => {
                self.notifier.push(Notice::info(
                    Some(id.clone()),
                    "A change to this automation is already in progress",
                ));
                ActionOutcome::Busy
            }
            Err(err) => {
                tracing::error!(automation_id = %id, error = %err, "failed to delete automation");
                self.notifier
                    .push(Notice::error(Some(id.clone()), "Failed to delete automation"));
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Open the edit form on a visible automation.
    ///
    /// Any open session is replaced and its unsaved draft discarded. Returns
    /// the record now being edited, or `None` when `id` is not in the list.
    pub fn edit(&self, id: &AutomationId) -> Option<Automation> {
        let Some(record) = self.store().get(id) else {
            tracing::warn!(automation_id = %id, "cannot edit an automation that is not listed");
            return None;
        };
        self.session.send_modify(|session| {
            if let Some(discarded) = session.open(record.clone()) {
                tracing::debug!(
                    automation_id = %discarded.id,
                    "discarding unsaved edit session"
                );
            }
        });
        Some(record)
    }

    /// Change the unsaved values of the open session.
    ///
    /// Returns `false` when no session is open.
    pub fn revise_draft(&self, revise: impl FnOnce(&mut AutomationChanges)) -> bool {
        self.session.send_if_modified(|session| match session.draft_mut() {
            Some(draft) => {
                revise(draft);
                true
            }
            None => false,
        })
    }

    /// Close the form without saving ("on close").
    pub fn dismiss_edit(&self) -> bool {
        self.session
            .send_if_modified(|session| session.close().is_some())
    }

    /// Reconcile a backend-confirmed record and close its form ("on
    /// updated").
    ///
    /// Used by forms that perform the update themselves.
    pub fn on_updated(&self, confirmed: Automation) -> bool {
        let id = confirmed.id.clone();
        let replaced = self.store().replace(confirmed);
        self.session
            .send_if_modified(|session| session.close_if_editing(&id));
        replaced
    }

    /// Submit the draft of the open session.
    pub async fn save_edit(&self) -> ActionOutcome {
        let draft = self.session.borrow().draft().cloned();
        match draft {
            Some(draft) => self.save_edit_with(draft).await,
            None => ActionOutcome::Ignored,
        }
    }

    /// Submit `changes` for the record of the open session.
    ///
    /// On success the list shows the backend's version and the form closes;
    /// on failure the form stays open with its draft.
    pub async fn save_edit_with(&self, changes: AutomationChanges) -> ActionOutcome {
        let Some(original) = self.session.borrow().original().cloned() else {
            tracing::debug!("no edit session to save");
            return ActionOutcome::Ignored;
        };
        let id = original.id.clone();
        match self.dispatcher.update(&self.form, &original, changes).await {
            Ok(Dispatch::Applied(_)) => {
                self.session
                    .send_if_modified(|session| session.close_if_editing(&id));
                ActionOutcome::Applied
            }
            Ok(Dispatch::Busy) => {
                self.notifier.push(Notice::info(
                    Some(id),
                    "A change to this automation is already in progress",
                ));
                ActionOutcome::Busy
            }
            Err(err) => {
                tracing::error!(automation_id = %id, error = %err, "failed to update automation");
                self.notifier
                    .push(Notice::error(Some(id), "Failed to update automation"));
                ActionOutcome::Failed(err)
            }
        }
    }
}
