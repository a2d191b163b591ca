//! Edit form port: the collaborator that submits an edit to the backend.

use std::future::Future;

use autopanel_domain::automation::{Automation, AutomationChanges};
use autopanel_domain::error::PanelError;

/// Submits the changes made to `original` and yields the record the
/// backend confirmed.
///
/// The form owns the network round-trip; the caller only reconciles the
/// confirmed record into its list.
pub trait EditForm {
    fn submit(
        &self,
        original: &Automation,
        changes: AutomationChanges,
    ) -> impl Future<Output = Result<Automation, PanelError>> + Send;
}
