//! Mutation dispatcher: sends deletes and updates to the backend and
//! reconciles confirmed outcomes into the [`ResourceListStore`].
//!
//! Local state only changes after the backend confirms. A failed request
//! leaves the store exactly as it was.

use autopanel_domain::automation::{Automation, AutomationChanges};
use autopanel_domain::error::PanelError;
use autopanel_domain::id::AutomationId;

use crate::in_flight::InFlight;
use crate::ports::{AutomationGateway, EditForm};
use crate::store::ResourceListStore;

/// What happened to a mutation request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<T = ()> {
    /// The backend confirmed and the store was updated.
    Applied(T),
    /// Another mutation for the same automation is still pending; nothing
    /// was sent.
    Busy,
}

/// Issues one backend mutation at a time per automation.
pub struct MutationDispatcher<G> {
    gateway: G,
    store: ResourceListStore,
    in_flight: InFlight,
}

impl<G: AutomationGateway> MutationDispatcher<G> {
    /// Create a dispatcher that reconciles into `store`.
    pub fn new(gateway: G, store: ResourceListStore) -> Self {
        Self {
            gateway,
            store,
            in_flight: InFlight::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &ResourceListStore {
        &self.store
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Whether a mutation for `id` is awaiting the backend.
    #[must_use]
    pub fn is_pending(&self, id: &AutomationId) -> bool {
        self.in_flight.contains(id)
    }

    /// Delete the automation on the backend, then drop it from the store.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the backend does not confirm; the
    /// store is left untouched.
    #[tracing::instrument(skip_all, fields(automation_id = %id))]
    pub async fn delete(&self, id: &AutomationId) -> Result<Dispatch, PanelError> {
        let Some(_claim) = self.in_flight.try_acquire(id) else {
            tracing::debug!("delete skipped, a mutation is already pending");
            return Ok(Dispatch::Busy);
        };
        self.gateway.delete(id).await?;
        self.store.remove(id);
        tracing::info!("automation deleted");
        Ok(Dispatch::Applied(()))
    }

    /// Let `form` submit `changes` for `original`, then replace the record
    /// with the backend's confirmed version.
    ///
    /// Returns the confirmed record.
    ///
    /// # Errors
    ///
    /// Returns the form's error when the update is rejected or cannot be
    /// sent; the store is left untouched.
    #[tracing::instrument(skip_all, fields(automation_id = %original.id))]
    pub async fn update<F: EditForm>(
        &self,
        form: &F,
        original: &Automation,
        changes: AutomationChanges,
    ) -> Result<Dispatch<Automation>, PanelError> {
        let Some(_claim) = self.in_flight.try_acquire(&original.id) else {
            tracing::debug!("update skipped, a mutation is already pending");
            return Ok(Dispatch::Busy);
        };
        let confirmed = form.submit(original, changes).await?;
        self.store.replace(confirmed.clone());
        tracing::info!("automation updated");
        Ok(Dispatch::Applied(confirmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tokio::sync::Notify;

    use crate::services::edit_form::GatewayEditForm;
    use crate::testing::{StubGateway, id, job};

    fn snapshot() -> Vec<Automation> {
        vec![
            job("a", "A", "active"),
            job("b", "B", "paused"),
            job("c", "C", "active"),
        ]
    }

    fn dispatcher(gateway: StubGateway) -> MutationDispatcher<Arc<StubGateway>> {
        MutationDispatcher::new(
            Arc::new(gateway),
            ResourceListStore::initialize(snapshot()),
        )
    }

    #[tokio::test]
    async fn should_remove_record_when_delete_confirmed() {
        let dispatcher = dispatcher(StubGateway::with_records(snapshot()));

        let outcome = dispatcher.delete(&id("b")).await.unwrap();
        assert_eq!(outcome, Dispatch::Applied(()));

        let remaining = dispatcher.store().snapshot();
        assert_eq!(remaining, vec![snapshot()[0].clone(), snapshot()[2].clone()]);
    }

    #[tokio::test]
    async fn should_leave_store_untouched_when_delete_fails() {
        let dispatcher = dispatcher(StubGateway::with_records(snapshot()).failing(&id("b")));

        let result = dispatcher.delete(&id("b")).await;
        assert!(matches!(result, Err(PanelError::Gateway(_))));
        assert_eq!(dispatcher.store().snapshot(), snapshot());
        assert!(!dispatcher.is_pending(&id("b")));
    }

    #[tokio::test]
    async fn should_treat_second_delete_of_same_id_as_noop() {
        let dispatcher = dispatcher(StubGateway::with_records(snapshot()));

        dispatcher.delete(&id("a")).await.unwrap();
        let outcome = dispatcher.delete(&id("a")).await.unwrap();
        assert_eq!(outcome, Dispatch::Applied(()));
        assert_eq!(dispatcher.store().len(), 2);
    }

    #[tokio::test]
    async fn should_report_busy_when_delete_already_in_flight() {
        let gate = Arc::new(Notify::new());
        let dispatcher = dispatcher(StubGateway::with_records(snapshot()).gated(gate.clone()));

        let (target_first, target_second) = (id("a"), id("a"));
        let (first, second, ()) = tokio::join!(
            dispatcher.delete(&target_first),
            dispatcher.delete(&target_second),
            async {
                tokio::task::yield_now().await;
                gate.notify_one();
            }
        );

        assert_eq!(first.unwrap(), Dispatch::Applied(()));
        assert_eq!(second.unwrap(), Dispatch::Busy);
        assert_eq!(dispatcher.gateway().delete_count(), 1);
        assert!(!dispatcher.store().contains(&id("a")));
    }

    #[tokio::test]
    async fn should_replace_with_confirmed_record_when_update_succeeds() {
        let dispatcher = dispatcher(StubGateway::with_records(snapshot()));
        let form = GatewayEditForm::new(dispatcher.gateway().clone());
        let original = dispatcher.store().get(&id("b")).unwrap();

        let mut changes = AutomationChanges::from_automation(&original);
        changes.name = "  B renamed  ".to_string();

        let outcome = dispatcher.update(&form, &original, changes).await.unwrap();
        let Dispatch::Applied(confirmed) = outcome else {
            panic!("expected the update to be applied");
        };
        // the backend trims names; the store shows its version
        assert_eq!(confirmed.name, "B renamed");

        let names: Vec<String> = dispatcher
            .store()
            .snapshot()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["A", "B renamed", "C"]);
    }

    #[tokio::test]
    async fn should_leave_store_untouched_when_update_fails() {
        let dispatcher = dispatcher(StubGateway::with_records(snapshot()).failing(&id("c")));
        let form = GatewayEditForm::new(dispatcher.gateway().clone());
        let original = dispatcher.store().get(&id("c")).unwrap();

        let mut changes = AutomationChanges::from_automation(&original);
        changes.status = "paused".into();

        let result = dispatcher.update(&form, &original, changes).await;
        assert!(matches!(result, Err(PanelError::Gateway(_))));
        assert_eq!(dispatcher.store().snapshot(), snapshot());
    }

    #[tokio::test]
    async fn should_report_busy_when_update_races_a_pending_delete() {
        let gate = Arc::new(Notify::new());
        let dispatcher = dispatcher(StubGateway::with_records(snapshot()).gated(gate.clone()));
        let form = GatewayEditForm::new(dispatcher.gateway().clone());
        let original = dispatcher.store().get(&id("a")).unwrap();
        let changes = AutomationChanges::from_automation(&original);

        let target = id("a");
        let (deleted, updated, ()) = tokio::join!(
            dispatcher.delete(&target),
            dispatcher.update(&form, &original, changes),
            async {
                tokio::task::yield_now().await;
                gate.notify_one();
            }
        );

        assert_eq!(deleted.unwrap(), Dispatch::Applied(()));
        assert_eq!(updated.unwrap(), Dispatch::Busy);
        assert_eq!(dispatcher.gateway().update_count(), 0);
    }
}
