//! Automation gateway port: the backend's automation endpoints.

use std::future::Future;
use std::sync::Arc;

use autopanel_domain::automation::{Automation, AutomationChanges};
use autopanel_domain::error::PanelError;
use autopanel_domain::id::AutomationId;

/// Request/response access to the automations persisted by the backend.
///
/// Implementations treat every non-success outcome (transport failure,
/// timeout, non-2xx status) as [`PanelError::Gateway`]; callers make no
/// finer distinction.
pub trait AutomationGateway {
    /// Fetch the current automations, in backend order.
    fn list(&self) -> impl Future<Output = Result<Vec<Automation>, PanelError>> + Send;

    /// Delete the automation with the given identity.
    fn delete(&self, id: &AutomationId) -> impl Future<Output = Result<(), PanelError>> + Send;

    /// Apply `changes` to the automation and return the backend's resulting
    /// record.
    fn update(
        &self,
        id: &AutomationId,
        changes: &AutomationChanges,
    ) -> impl Future<Output = Result<Automation, PanelError>> + Send;
}

impl<T: AutomationGateway + Send + Sync> AutomationGateway for Arc<T> {
    fn list(&self) -> impl Future<Output = Result<Vec<Automation>, PanelError>> + Send {
        (**self).list()
    }

    fn delete(&self, id: &AutomationId) -> impl Future<Output = Result<(), PanelError>> + Send {
        (**self).delete(id)
    }

    fn update(
        &self,
        id: &AutomationId,
        changes: &AutomationChanges,
    ) -> impl Future<Output = Result<Automation, PanelError>> + Send {
        (**self).update(id, changes)
    }
}
